//! Compact magnitude labels for chart axes and tooltips ("1.2M", "450K", "12").

use crate::constants::tiers::{
    BILLION, MILLION, SCALED_DECIMALS, THOUSAND, UNSCALED_DECIMALS,
};
use crate::error::FormatError;

/// Magnitude band a value is displayed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Unscaled,
    Thousands,
    Millions,
    Billions,
}

impl Tier {
    /// Largest threshold first; thresholds are inclusive.
    pub fn for_value(abs_value: f64) -> Self {
        if abs_value >= BILLION {
            Tier::Billions
        } else if abs_value >= MILLION {
            Tier::Millions
        } else if abs_value >= THOUSAND {
            Tier::Thousands
        } else {
            Tier::Unscaled
        }
    }

    pub fn divisor(self) -> f64 {
        match self {
            Tier::Unscaled => 1.0,
            Tier::Thousands => THOUSAND,
            Tier::Millions => MILLION,
            Tier::Billions => BILLION,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Tier::Unscaled => "",
            Tier::Thousands => "K",
            Tier::Millions => "M",
            Tier::Billions => "B",
        }
    }

    pub fn decimals(self) -> usize {
        match self {
            Tier::Unscaled => UNSCALED_DECIMALS,
            _ => SCALED_DECIMALS,
        }
    }

    fn from_suffix(suffix: char) -> Option<Self> {
        match suffix {
            'K' => Some(Tier::Thousands),
            'M' => Some(Tier::Millions),
            'B' => Some(Tier::Billions),
            _ => None,
        }
    }
}

/// Format `value` as a scaled, suffixed label.
///
/// The signed value is divided by the tier divisor, rounded to the tier's
/// precision and stripped of trailing zeros (and a dangling decimal point).
/// Non-finite input is rejected rather than rendered as "NaN"/"inf".
pub fn format_large_number(value: f64) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NonFinite(value));
    }

    let tier = Tier::for_value(value.abs());
    let scaled = value / tier.divisor();
    let fixed = to_fixed(scaled, tier.decimals());

    let mut mantissa = trim_trailing_zeros(&fixed).to_string();
    // Tiny negatives round to zero; never show "-0"
    if mantissa == "-0" {
        mantissa.remove(0);
    }

    mantissa.push_str(tier.suffix());
    Ok(mantissa)
}

/// Fixed-point rendering that rounds exact ties away from zero, matching
/// the `toFixed` labels the chart front-end has always shown.
///
/// `{:.N}` rounds the exact binary value, which only differs on an exact
/// decimal tie, where it picks the even digit. With `decimals = d`, `x` is an
/// exact tie iff `x * 2^(d+1)` is an odd integer (power-of-two scaling is
/// exact). Ties are pushed one ulp away from zero before formatting.
pub fn to_fixed(x: f64, decimals: usize) -> String {
    let doubled = x * 2f64.powi(decimals as i32 + 1);
    let is_tie = doubled.fract() == 0.0 && (doubled % 2.0).abs() == 1.0;

    let x = if is_tie {
        // Nonzero here; bumping the bit pattern grows the magnitude for either sign
        f64::from_bits(x.to_bits() + 1)
    } else {
        x
    };
    format!("{:.*}", decimals, x)
}

/// "1.50" -> "1.5", "2.00" -> "2", "450" -> "450".
pub fn trim_trailing_zeros(fixed: &str) -> &str {
    if !fixed.contains('.') {
        return fixed;
    }
    fixed.trim_end_matches('0').trim_end_matches('.')
}

/// Approximate value behind a label produced by [`format_large_number`].
pub fn parse_formatted(label: &str) -> Option<f64> {
    let label = label.trim();
    let last = label.chars().last()?;

    let (mantissa, tier) = match Tier::from_suffix(last) {
        Some(tier) => (&label[..label.len() - 1], tier),
        None => (label, Tier::Unscaled),
    };

    mantissa
        .parse::<f64>()
        .ok()
        .map(|m| m * tier.divisor())
}
