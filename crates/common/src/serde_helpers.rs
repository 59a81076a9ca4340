//! Lenient deserializers for request bodies.
//!
//! Clients send dates as RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS`
//! values or plain `YYYY-MM-DD` days; naive values are read as UTC.
//! Identifier fields may arrive as JSON numbers or strings.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

/// Parse a date or timestamp string. Returns `None` when nothing matches.
pub fn parse_datetime(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).into());
        }
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let naive = day.and_hms_opt(0, 0, 0)?;
    Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc).into())
}

pub fn datetime<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
}

/// Use with `#[serde(default, deserialize_with = "...")]`.
pub fn opt_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_datetime(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {raw}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(i) => i.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

/// Use with `#[serde(default, deserialize_with = "...")]`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "datetime")]
        at: DateTime<FixedOffset>,
        #[serde(default, deserialize_with = "opt_datetime")]
        maybe: Option<DateTime<FixedOffset>>,
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "opt_string_or_number")]
        other: Option<String>,
    }

    #[test]
    fn accepts_rfc3339_with_offset() {
        let dt = parse_datetime("2025-03-01T10:30:00+05:30").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn accepts_plain_date_as_utc_midnight() {
        let dt = parse_datetime("2025-12-31").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 12, 31));
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.offset().local_minus_utc(), 0);
    }

    #[test]
    fn accepts_naive_timestamp() {
        let dt = parse_datetime("2025-01-02T03:04:05").unwrap();
        assert_eq!(dt.minute(), 4);
        assert!(parse_datetime("2025-01-02 03:04:05.123").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_datetime("next tuesday").is_none());
        assert!(parse_datetime("2025-13-01").is_none());
    }

    #[test]
    fn probe_deserializes_mixed_inputs() {
        let p: Probe =
            serde_json::from_str(r#"{"at":"2025-06-01","id":42,"other":"x-1"}"#).unwrap();
        assert_eq!(p.id, "42");
        assert_eq!(p.other.as_deref(), Some("x-1"));
        assert!(p.maybe.is_none());
        assert_eq!(p.at.month(), 6);
    }

    #[test]
    fn probe_rejects_bad_date() {
        let err = serde_json::from_str::<Probe>(r#"{"at":"soon","id":"a"}"#)
            .err()
            .unwrap();
        assert!(err.to_string().contains("invalid date"));
    }
}
