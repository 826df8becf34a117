//! Shared wire types and utilities used across both datasets.

pub mod timestamp;

pub use timestamp::{normalize, INVALID_DATE};

use serde::{Deserialize, Serialize};

// ─── RawTimestamp ────────────────────────────────────────────────────────────

/// A timestamp exactly as the backend sent it.
///
/// The endpoints are inconsistent: some rows carry Unix seconds as a JSON
/// number, others an ISO-like string. Anything else (null, bool, object)
/// still decodes so that one odd row cannot fail a whole dataset; it simply
/// normalizes to [`INVALID_DATE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    /// Unix seconds, possibly fractional.
    Seconds(f64),
    /// A date/time string in any of the accepted forms.
    Text(String),
    Other(serde_json::Value),
}

impl RawTimestamp {
    /// Canonical UTC display string, or [`INVALID_DATE`].
    pub fn display(&self) -> String {
        normalize(self)
    }
}

impl From<f64> for RawTimestamp {
    fn from(secs: f64) -> Self {
        RawTimestamp::Seconds(secs)
    }
}

impl From<i64> for RawTimestamp {
    fn from(secs: i64) -> Self {
        RawTimestamp::Seconds(secs as f64)
    }
}

impl From<&str> for RawTimestamp {
    fn from(s: &str) -> Self {
        RawTimestamp::Text(s.to_string())
    }
}

impl From<String> for RawTimestamp {
    fn from(s: String) -> Self {
        RawTimestamp::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_timestamp_deserializes_number() {
        let raw: RawTimestamp = serde_json::from_str("1700000000").unwrap();
        assert_eq!(raw, RawTimestamp::Seconds(1_700_000_000.0));
    }

    #[test]
    fn test_raw_timestamp_deserializes_string() {
        let raw: RawTimestamp = serde_json::from_str("\"2023-11-14T22:13:20Z\"").unwrap();
        assert_eq!(raw, RawTimestamp::Text("2023-11-14T22:13:20Z".into()));
    }

    #[test]
    fn test_raw_timestamp_null_is_other() {
        let raw: RawTimestamp = serde_json::from_str("null").unwrap();
        assert_eq!(raw, RawTimestamp::Other(serde_json::Value::Null));
        assert_eq!(raw.display(), INVALID_DATE);
    }

    #[test]
    fn test_raw_timestamp_serializes_untagged() {
        let json = serde_json::to_string(&RawTimestamp::from(1.5)).unwrap();
        assert_eq!(json, "1.5");
        let json = serde_json::to_string(&RawTimestamp::from("x")).unwrap();
        assert_eq!(json, "\"x\"");
    }
}
