// Trend aggregation: filter by ideology, group by year, count

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::dataset::LeaderRecord;
use crate::error::TrendError;

/// Number of leaders of the selected ideology in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCount {
    pub year: i32,
    pub count: usize,
}

/// Count records per year whose ideology equals `selected`.
///
/// Matching is exact and case-sensitive; records were normalized at load.
/// The result is ascending by year with one entry per year, and is empty
/// when nothing matches.
pub fn aggregate(records: &[LeaderRecord], selected: &str) -> Vec<YearlyCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();

    for record in records.iter().filter(|r| r.ideology == selected) {
        *by_year.entry(record.year).or_insert(0) += 1;
    }

    by_year
        .into_iter()
        .map(|(year, count)| YearlyCount { year, count })
        .collect()
}

/// Total of all yearly counts.
pub fn total(counts: &[YearlyCount]) -> usize {
    counts.iter().map(|c| c.count).sum()
}

/// Pull the selection out of a JSON payload such as `{"ideology": "leftist"}`.
///
/// This is the only place a selection can be rejected: the value must be
/// present and a string. Any string is accepted, recognized or not.
pub fn selection_from_json(payload: &Value, field: &'static str) -> Result<String, TrendError> {
    match payload.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(TrendError::InvalidSelection {
            found: json_type_name(other),
        }),
        None => Err(TrendError::InvalidSelection {
            found: "nothing",
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
