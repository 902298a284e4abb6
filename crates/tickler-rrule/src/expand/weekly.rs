//! Weekly series: blocks of `interval` Sunday-aligned weeks, one candidate per
//! selected weekday, wall-clock time copied from the anchor.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveTime, Utc};

use crate::calendar::{DAYS_PER_WEEK, ceil_to_multiple, to_instant, to_local, week_start};
use crate::rule::RecurrenceRule;
use crate::window::Window;

pub(super) fn candidates(
    offset: FixedOffset,
    rule: &RecurrenceRule,
    anchor: DateTime<Utc>,
    window: &Window,
) -> Vec<DateTime<Utc>> {
    let Some(anchor_local) = to_local(anchor, offset) else {
        return Vec::new();
    };
    let weekdays = rule.effective_weekdays(anchor_local.weekday());
    let interval = i64::from(rule.interval());

    let Some(base_week) = week_start(anchor_local.date()) else {
        return Vec::new();
    };

    // Seek to the window's week, keeping the block index a multiple of the
    // interval relative to the anchor's week.
    let weeks_to_window = if window.from <= anchor {
        0
    } else {
        // A `from` beyond the calendar's range leaves nothing to generate.
        let Some(from_local) = to_local(window.from, offset) else {
            return Vec::new();
        };
        week_start(from_local.date()).map_or(0, |window_week| {
            window_week
                .signed_duration_since(base_week)
                .num_days()
                .div_euclid(7)
                .max(0)
        })
    };
    let mut week_index = ceil_to_multiple(weeks_to_window, interval);

    let mut out = Vec::new();
    loop {
        let Some(block_start) = u64::try_from(week_index)
            .ok()
            .and_then(|weeks| weeks.checked_mul(DAYS_PER_WEEK))
            .and_then(|days| base_week.checked_add_days(Days::new(days)))
        else {
            break;
        };
        let Some(block_instant) = to_instant(block_start.and_time(NaiveTime::MIN), offset) else {
            break;
        };
        if block_instant > window.to || !rule.allows(block_instant) {
            break;
        }

        for weekday in &weekdays {
            let Some(candidate) = block_start
                .checked_add_days(Days::new(u64::from(*weekday)))
                .and_then(|day| to_instant(day.and_time(anchor_local.time()), offset))
            else {
                continue;
            };
            // Partial first week is clipped at the anchor, not at the window.
            if candidate < anchor || !window.contains(candidate) || !rule.allows(candidate) {
                continue;
            }
            out.push(candidate);
        }

        let Some(next) = week_index.checked_add(interval) else {
            break;
        };
        week_index = next;
    }
    out
}
