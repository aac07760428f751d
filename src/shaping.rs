//! Display shaping for fetched stoploss records.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::formatter::format_large_number;

/// Compact labels for every finite numeric field of an object record.
///
/// Nulls (sanitized `NaN`s), strings and nested values are skipped; a
/// non-object record yields no labels.
pub fn numeric_labels(record: &Value) -> BTreeMap<String, String> {
    let Some(fields) = record.as_object() else {
        return BTreeMap::new();
    };

    fields
        .iter()
        .filter_map(|(key, value)| {
            let number = value.as_f64()?;
            let label = format_large_number(number).ok()?;
            Some((key.clone(), label))
        })
        .collect()
}

/// Labels for a whole result set, in record order.
pub fn label_records(records: &[Value]) -> Vec<BTreeMap<String, String>> {
    records.iter().map(numeric_labels).collect()
}
