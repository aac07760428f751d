//! Catalogue of the stoploss charts the front-end renders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Slider,
    Differentiator,
    Distribution,
}

const SLIDER_DESCRIPTION: &str = "With this chart you can
        test out what stoploss
        would be ideal in order
        to minimize losses and
        maximize wins.";

const DIFFERENTIATOR_DESCRIPTION: &str = "With this chart you can
        compare the Expected Value of the stoploss PnL with the current stoploss PnL.";

const DISTRIBUTION_DESCRIPTION: &str = "With this chart you can
        analyze the risk of different
        stoplosses.";

impl ChartKind {
    /// Display order
    pub fn all() -> [ChartKind; 3] {
        [ChartKind::Slider, ChartKind::Differentiator, ChartKind::Distribution]
    }

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Slider => "slider",
            ChartKind::Differentiator => "differentiator",
            ChartKind::Distribution => "distribution",
        }
    }

    /// Explanatory text with line breaks and indentation collapsed.
    pub fn description(self) -> String {
        let raw = match self {
            ChartKind::Slider => SLIDER_DESCRIPTION,
            ChartKind::Differentiator => DIFFERENTIATOR_DESCRIPTION,
            ChartKind::Distribution => DISTRIBUTION_DESCRIPTION,
        };
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::all()
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown chart '{}' (expected slider|differentiator|distribution)", s))
    }
}

/// Serializable chart entry for the front-end.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChartInfo {
    pub kind: ChartKind,
    pub description: String,
}

pub fn catalogue() -> Vec<ChartInfo> {
    ChartKind::all()
        .into_iter()
        .map(|kind| ChartInfo {
            kind,
            description: kind.description(),
        })
        .collect()
}
