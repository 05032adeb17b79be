//! Timestamp parsing, formatting and day arithmetic.

use crate::constants::{DATE_FORMAT_COMPACT, DATE_FORMAT_ISO};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// Parses a stored or user-supplied timestamp.
///
/// Accepts RFC 3339 timestamps with any offset (normalized to UTC), and bare
/// dates in YYYY-MM-DD or YYYYMMDD format, which are read as UTC midnight.
///
/// # Errors
///
/// Returns `AppError::Validation` if the string matches none of the formats.
///
/// # Examples
///
/// ```
/// use growth_diary::journal_core::dates::parse_timestamp;
///
/// let midnight = parse_timestamp("2024-01-01").unwrap();
/// assert_eq!(midnight.to_rfc3339(), "2024-01-01T00:00:00+00:00");
///
/// let shifted = parse_timestamp("2024-01-01T09:00:00+02:00").unwrap();
/// assert_eq!(shifted.to_rfc3339(), "2024-01-01T07:00:00+00:00");
///
/// assert!(parse_timestamp("yesterday").is_err());
/// ```
pub fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_FORMAT_COMPACT))
        .map_err(|e| AppError::Validation(format!("Invalid date format '{}': {}", raw, e)))?;

    date.and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| AppError::Validation(format!("Invalid date: {}", raw)))
}

/// Formats a timestamp the way it is persisted (RFC 3339, `Z` suffix).
pub fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
}

/// Number of complete 24-hour periods from `earlier` to `now`, truncated toward zero.
///
/// Time of day is not discarded: an entry written 23 hours ago is zero days old.
pub fn whole_days_between(now: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    now.signed_duration_since(earlier).num_days()
}

/// Day of the week counted from Sunday (Sunday = 0 .. Saturday = 6).
pub fn weekday_from_sunday(now: DateTime<Utc>) -> u32 {
    now.weekday().num_days_from_sunday()
}

/// Serde adapter for timestamps stored as RFC 3339 strings.
///
/// Reading is lenient (see [`parse_timestamp`]); writing always produces the
/// canonical UTC form.
pub mod timestamp {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(de::Error::custom)
    }
}
