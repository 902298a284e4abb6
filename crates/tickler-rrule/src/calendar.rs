//! Calendar arithmetic on a single fixed-offset calendar.
//!
//! Instants are projected into local wall-clock time with the engine's offset,
//! shifted there, and projected back. No timezone database is consulted, so a
//! day is always 24 hours and there are no DST gaps.

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveDateTime, Utc};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
pub const DAYS_PER_WEEK: u64 = 7;

/// Wall-clock time of `instant`, or `None` past the representable range.
#[must_use]
pub fn to_local(instant: DateTime<Utc>, offset: FixedOffset) -> Option<NaiveDateTime> {
    instant.naive_utc().checked_add_offset(offset)
}

#[must_use]
pub fn to_instant(local: NaiveDateTime, offset: FixedOffset) -> Option<DateTime<Utc>> {
    local.checked_sub_offset(offset).map(|naive| naive.and_utc())
}

/// ## Summary
/// Shifts by whole months, clamping the day to the target month's last day.
///
/// The clamp applies to this shift only: callers shift from the series anchor
/// each time, so a short month never shrinks the day of later months.
#[must_use]
pub fn add_months_clamped(local: NaiveDateTime, months: u32) -> Option<NaiveDateTime> {
    local.checked_add_months(Months::new(months))
}

/// Shifts by whole years; Feb 29 lands on Feb 28 in non-leap years.
#[must_use]
pub fn add_years_clamped(local: NaiveDateTime, years: u32) -> Option<NaiveDateTime> {
    add_months_clamped(local, years.checked_mul(12)?)
}

/// Sunday on or before `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_sunday())))
}

/// Calendar-month distance, ignoring day and time.
#[must_use]
pub fn months_between(earlier: NaiveDateTime, later: NaiveDateTime) -> i64 {
    (i64::from(later.year()) - i64::from(earlier.year())) * 12 + i64::from(later.month())
        - i64::from(earlier.month())
}

/// Calendar-year distance, ignoring month, day and time.
#[must_use]
pub fn years_between(earlier: NaiveDateTime, later: NaiveDateTime) -> i64 {
    i64::from(later.year()) - i64::from(earlier.year())
}

/// Smallest multiple of `step` that is `>= value`. `step` must be positive.
#[must_use]
pub fn ceil_to_multiple(value: i64, step: i64) -> i64 {
    let quotient = value.div_euclid(step);
    if value.rem_euclid(step) == 0 {
        quotient * step
    } else {
        (quotient + 1) * step
    }
}

/// `ceil(numerator / denominator)` for a positive denominator.
#[must_use]
pub fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    if numerator.rem_euclid(denominator) == 0 {
        quotient
    } else {
        quotient + 1
    }
}
