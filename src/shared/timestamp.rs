//! Timestamp normalization for chart labels and the block card.
//!
//! Every timestamp is rendered as `YYYY-MM-DD HH:mm:ss` in UTC. Input that
//! does not name a valid instant becomes [`INVALID_DATE`]; this is a display
//! value, not an error, and callers show it like any other label.

use super::RawTimestamp;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Display string substituted for an unparsable timestamp.
pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything after the year, for years written in extended form.
const EXTENDED_YEAR_TAIL: &str = "%m-%d %H:%M:%S";

/// Largest distance from the epoch a display instant may have, in ms.
/// chrono's own range (years -262143..=262142) is narrower and applies too.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Layouts carrying a numeric offset. `%z` accepts both `+0000` and `+00:00`.
const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%a %b %d %Y %H:%M:%S GMT%z",
    "%b %d %Y %H:%M:%S GMT%z",
];

/// Zone-less date-time layouts, tried in order. A trailing `Z` has already
/// been stripped, so these also cover UTC-designated strings.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%a %b %d %Y %H:%M:%S GMT",
    "%b %d %Y %H:%M:%S GMT",
    "%a %b %d %Y %H:%M:%S",
    "%b %d %Y %H:%M:%S",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Normalize a raw timestamp into its UTC display string.
pub fn normalize(raw: &RawTimestamp) -> String {
    parse_instant(raw)
        .map(display)
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Years outside `0000..=9999` are written signed with six digits
/// (`+010000-01-01 00:00:00`).
fn display(dt: DateTime<Utc>) -> String {
    let year = dt.year();
    if (0..=9999).contains(&year) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    let sign = if year < 0 { '-' } else { '+' };
    format!(
        "{sign}{:06}-{}",
        year.unsigned_abs(),
        dt.format(EXTENDED_YEAR_TAIL)
    )
}

/// Normalize Unix seconds.
pub fn normalize_seconds(secs: f64) -> String {
    normalize(&RawTimestamp::Seconds(secs))
}

/// Normalize a date/time string.
pub fn normalize_str(s: &str) -> String {
    normalize(&RawTimestamp::Text(s.to_string()))
}

/// Resolve a raw timestamp to an instant, if it names one.
pub fn parse_instant(raw: &RawTimestamp) -> Option<DateTime<Utc>> {
    match raw {
        RawTimestamp::Seconds(secs) => from_epoch_millis(secs * 1000.0),
        RawTimestamp::Text(s) => parse_str(s),
        RawTimestamp::Other(_) => None,
    }
}

/// Fractional milliseconds are truncated toward zero.
fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64)
}

fn parse_str(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // `Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)`
    let s = strip_zone_comment(s);
    for fmt in OFFSET_DATETIME_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let naive = s
        .strip_suffix('Z')
        .or_else(|| s.strip_suffix('z'))
        .unwrap_or(s);

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(ndt.and_utc());
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(naive, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|ndt| ndt.and_utc());
        }
    }
    None
}

/// Drop a trailing parenthesized zone name.
fn strip_zone_comment(s: &str) -> &str {
    match s.rfind('(') {
        Some(open) if s.ends_with(')') => s[..open].trim_end(),
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::SecondsFormat;

    fn iso_of_millis(millis: i64) -> String {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    #[test]
    fn test_seconds_are_formatted_in_utc() {
        assert_eq!(normalize_seconds(1_700_000_000.0), "2023-11-14 22:13:20");
        assert_eq!(normalize_seconds(0.0), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_sub_second_precision_is_dropped() {
        assert_eq!(normalize_seconds(1_700_000_000.999), "2023-11-14 22:13:20");
        assert_eq!(normalize_str("2023-11-14T22:13:20.987Z"), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_negative_seconds_before_epoch() {
        assert_eq!(normalize_seconds(-1.5), "1969-12-31 23:59:58");
    }

    #[test]
    fn test_seconds_match_their_iso_form() {
        for secs in [0.0, 1.0, 1_700_000_000.0, 1_234_567_890.123, -86_400.25, 4_102_444_800.0] {
            let millis = (secs * 1000.0_f64).trunc() as i64;
            let iso = iso_of_millis(millis);
            assert_eq!(normalize_seconds(secs), normalize_str(&iso), "secs = {secs}");
        }
    }

    #[test]
    fn test_iso_with_offset_is_converted_to_utc() {
        assert_eq!(normalize_str("2023-11-15T00:13:20+02:00"), "2023-11-14 22:13:20");
        assert_eq!(normalize_str("2023-11-14T17:13:20-05:00"), "2023-11-14 22:13:20");
        assert_eq!(normalize_str("2023-11-14T22:13:20+0000"), "2023-11-14 22:13:20");
        assert_eq!(normalize_str("2023-11-14T22:13:20.000+0000"), "2023-11-14 22:13:20");
        assert_eq!(normalize_str("2023-11-15 00:13:20+0200"), "2023-11-14 22:13:20");
        assert_eq!(normalize_str("2023-11-14 23:13:20 +0100"), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_date_to_string_forms() {
        for s in [
            "Nov 14 2023 22:13:20 GMT",
            "Tue Nov 14 2023 22:13:20 GMT",
            "Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)",
            "Wed Nov 15 2023 00:13:20 GMT+0200 (Eastern European Standard Time)",
            "Tue, 14 Nov 2023 22:13:20 GMT",
        ] {
            assert_eq!(normalize_str(s), "2023-11-14 22:13:20", "input = {s:?}");
        }
    }

    #[test]
    fn test_bare_numeric_string_is_not_seconds() {
        assert_eq!(normalize_str("1700000000"), INVALID_DATE);
    }

    #[test]
    fn test_zoneless_strings_are_utc() {
        assert_eq!(normalize_str("2023-11-14T22:13:20"), "2023-11-14 22:13:20");
        assert_eq!(normalize_str("2023-11-14 22:13:20"), "2023-11-14 22:13:20");
        assert_eq!(normalize_str("2023-11-14T22:13"), "2023-11-14 22:13:00");
        assert_eq!(normalize_str("2023/11/14 22:13:20"), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(normalize_str("2023-11-14"), "2023-11-14 00:00:00");
    }

    #[test]
    fn test_rfc2822() {
        assert_eq!(
            normalize_str("Tue, 14 Nov 2023 22:13:20 GMT"),
            "2023-11-14 22:13:20"
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(normalize_str("  2023-11-14T22:13:20Z\n"), "2023-11-14 22:13:20");
    }

    #[test]
    fn test_unparsable_strings_yield_sentinel() {
        for s in ["", "   ", "not a date", "2023-13-01", "2023-02-30T00:00:00Z", "12:00"] {
            assert_eq!(normalize_str(s), INVALID_DATE, "input = {s:?}");
        }
    }

    #[test]
    fn test_non_finite_and_out_of_range_seconds_yield_sentinel() {
        assert_eq!(normalize_seconds(f64::NAN), INVALID_DATE);
        assert_eq!(normalize_seconds(f64::INFINITY), INVALID_DATE);
        assert_eq!(normalize_seconds(1e13), INVALID_DATE);
        assert_eq!(normalize_seconds(-1e13), INVALID_DATE);
        // Within ±8.64e15 ms but past chrono's last representable year.
        assert_eq!(normalize_seconds(8.64e12), INVALID_DATE);
    }

    #[test]
    fn test_extended_years_use_six_digits() {
        assert_eq!(normalize_seconds(253_402_300_799.0), "9999-12-31 23:59:59");
        assert_eq!(normalize_seconds(253_402_300_800.0), "+010000-01-01 00:00:00");
        assert_eq!(normalize_seconds(-62_167_219_200.0), "0000-01-01 00:00:00");
        assert_eq!(normalize_seconds(-62_167_219_201.0), "-000001-12-31 23:59:59");
    }

    #[test]
    fn test_other_json_values_yield_sentinel() {
        assert_eq!(normalize(&RawTimestamp::Other(serde_json::json!(true))), INVALID_DATE);
        assert_eq!(normalize(&RawTimestamp::Other(serde_json::json!({}))), INVALID_DATE);
    }

    #[test]
    fn test_parse_instant_is_some_exactly_when_not_sentinel() {
        let inputs = [
            RawTimestamp::from(1_700_000_000.0),
            RawTimestamp::from("2023-11-14T22:13:20Z"),
            RawTimestamp::from("garbage"),
            RawTimestamp::Other(serde_json::Value::Null),
        ];
        for raw in &inputs {
            assert_eq!(parse_instant(raw).is_none(), normalize(raw) == INVALID_DATE);
        }
    }
}
