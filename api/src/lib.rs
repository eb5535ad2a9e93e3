pub mod chart;
pub mod client;
pub mod select;
pub mod wire;

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the backend wire format
// ---------------------------------------------------------------------------

/// One athlete record as returned by the backend: identity, displayed
/// attributes, career totals, and the sparse per-90 statistics bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub position: String,
    pub age: u8,
    pub nationality: String,
    pub preferred_foot: String,
    pub height: String,
    pub weight: String,
    pub agency: String,
    /// Career totals, distinct from the per-90 rates in `stats`.
    pub goals: u32,
    pub assists: u32,
    pub stats: Statistics,
}

/// Sparse mapping of named performance metrics. Keys follow the backend's
/// naming (`golsper90`, `xg`, `partidas`, ...); any key may be absent.
///
/// Values are kept as raw JSON so that "absent" and "present but malformed"
/// stay distinguishable: absence reads as 0.0, malformedness is an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics(BTreeMap<String, Value>);

impl Statistics {
    pub fn new(values: BTreeMap<String, Value>) -> Self {
        Self(values)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Read one metric with the zero-default policy: an absent key is
    /// "unknown" and reads as `0.0`; a present value must be a JSON number
    /// or a numeric string, anything else fails loudly.
    pub fn metric(&self, key: &str) -> Result<f64, StatError> {
        match self.0.get(key) {
            None => Ok(0.0),
            Some(value) => coerce(value).ok_or_else(|| StatError {
                key: key.to_owned(),
                value: value.clone(),
            }),
        }
    }
}

impl FromIterator<(String, Value)> for Statistics {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        // The upstream scraper is known to stringify some numbers.
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A statistic value that exists but cannot be read as a number.
/// Distinct from absence, which is an expected state and reads as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StatError {
    pub key: String,
    pub value: Value,
}

impl fmt::Display for StatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "statistic '{}' is not numeric: {}", self.key, self.value)
    }
}

impl std::error::Error for StatError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(pairs: &[(&str, Value)]) -> Statistics {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn absent_key_reads_as_zero() {
        let stats = Statistics::default();
        assert_eq!(stats.metric("golsper90"), Ok(0.0));
    }

    #[test]
    fn numeric_value_is_read_directly() {
        let stats = bag(&[("xg", json!(0.42))]);
        assert_eq!(stats.metric("xg"), Ok(0.42));
    }

    #[test]
    fn integer_value_coerces_to_float() {
        let stats = bag(&[("partidas", json!(34))]);
        assert_eq!(stats.metric("partidas"), Ok(34.0));
    }

    #[test]
    fn numeric_string_is_parsed() {
        let stats = bag(&[("assistper90", json!(" 0.31 "))]);
        assert_eq!(stats.metric("assistper90"), Ok(0.31));
    }

    #[test]
    fn non_numeric_value_fails_loudly() {
        let stats = bag(&[("xg", json!("n/a"))]);
        let err = stats.metric("xg").unwrap_err();
        assert_eq!(err.key, "xg");
    }

    #[test]
    fn null_value_is_malformed_not_absent() {
        let stats = bag(&[("prgc", Value::Null)]);
        assert!(stats.metric("prgc").is_err());
    }

    #[test]
    fn empty_bag_is_empty() {
        assert!(Statistics::default().is_empty());
        assert!(!bag(&[("xg", json!(1))]).is_empty());
    }
}
