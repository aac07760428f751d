//! Compatibility shim for the upstream serializer.
//!
//! The simulation service writes missing floats as a bare `NaN` token, which
//! is not JSON. Every standalone, case-sensitive `NaN` is rewritten to `null`
//! before the body reaches `serde_json`. Occurrences inside string values are
//! rewritten too; the upstream never emits that word in text fields.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static NAN_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bNaN\b").unwrap());

/// Replace bareword `NaN` tokens with `null`. Borrows when nothing matched.
pub fn sanitize_nan(raw: &str) -> Cow<'_, str> {
    NAN_TOKEN.replace_all(raw, "null")
}

/// Number of tokens [`sanitize_nan`] would replace.
pub fn count_nan_tokens(raw: &str) -> usize {
    NAN_TOKEN.find_iter(raw).count()
}
