//! Fixed-unit series: `anchor + k * interval` days, months or years.

use chrono::{DateTime, Days, FixedOffset, NaiveDateTime, Utc};

use crate::calendar::{
    MILLIS_PER_DAY, add_months_clamped, add_years_clamped, ceil_div, ceil_to_multiple,
    months_between, to_instant, to_local, years_between,
};
use crate::rule::RecurrenceRule;
use crate::window::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Days,
    Months,
    Years,
}

impl Step {
    /// Anchor shifted by `units`. Always computed from the anchor itself.
    fn shift(self, anchor: NaiveDateTime, units: u64) -> Option<NaiveDateTime> {
        match self {
            Self::Days => anchor.checked_add_days(Days::new(units)),
            Self::Months => add_months_clamped(anchor, u32::try_from(units).ok()?),
            Self::Years => add_years_clamped(anchor, u32::try_from(units).ok()?),
        }
    }

    /// Units from the anchor up to `from`. For days this is the rounded-up
    /// elapsed time; for months and years the calendar distance. `None` if
    /// `from` has no wall-clock time in this offset.
    fn units_until(
        self,
        anchor_local: NaiveDateTime,
        anchor: DateTime<Utc>,
        from: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Option<i64> {
        match self {
            Self::Days => Some(ceil_div((from - anchor).num_milliseconds(), MILLIS_PER_DAY)),
            Self::Months => Some(months_between(anchor_local, to_local(from, offset)?)),
            Self::Years => Some(years_between(anchor_local, to_local(from, offset)?)),
        }
    }
}

pub(super) fn candidates(
    step: Step,
    offset: FixedOffset,
    rule: &RecurrenceRule,
    anchor: DateTime<Utc>,
    window: &Window,
) -> Vec<DateTime<Utc>> {
    let interval = u64::from(rule.interval());
    let Some(anchor_local) = to_local(anchor, offset) else {
        return Vec::new();
    };

    // Seek: first multiple of the interval that lands at or after `from`.
    let first = if anchor < window.from {
        // A `from` beyond the calendar's range leaves nothing to generate.
        let Some(units) = step.units_until(anchor_local, anchor, window.from, offset) else {
            return Vec::new();
        };
        ceil_to_multiple(units.max(0), i64::from(rule.interval()))
    } else {
        0
    };
    let Ok(mut units) = u64::try_from(first) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    while let Some(candidate) = step
        .shift(anchor_local, units)
        .and_then(|local| to_instant(local, offset))
    {
        if candidate > window.to || !rule.allows(candidate) {
            break;
        }
        // Month and year seeks can land earlier in the same month or year.
        if candidate >= window.from {
            out.push(candidate);
        }
        let Some(next) = units.checked_add(interval) else {
            break;
        };
        units = next;
    }
    out
}
