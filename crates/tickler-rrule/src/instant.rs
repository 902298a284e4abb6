//! Instant parsing and normalization.
//!
//! Stored rows carry start and until instants in several textual shapes
//! (RFC 3339 from clients, `YYYY-MM-DD HH:MM:SS` from SQL `TIMESTAMP` columns).
//! Everything is normalized to millisecond precision so that dismissal entries
//! compare by instant value rather than by their serialized form.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};

/// Offset-less timestamp layouts, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// ## Summary
/// Truncates an instant to the millisecond precision used for comparisons.
#[must_use]
pub fn normalize(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(3)
}

/// ## Summary
/// Parses a textual instant in any of the accepted layouts.
///
/// Accepts RFC 3339 with any offset, SQL-style and ISO local timestamps
/// (taken as UTC), and bare `YYYY-MM-DD` dates (midnight UTC).
///
/// ## Errors
/// Returns `None` if the value is empty or matches no accepted layout.
#[must_use]
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(normalize(dt.with_timezone(&Utc)));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(normalize(naive.and_utc()));
        }
    }

    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// ## Summary
/// Converts epoch milliseconds to an instant.
#[must_use]
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}
