use chrono::{DateTime, TimeZone, Utc};

use tickler_test::tickler::event::MasterEvent;
use tickler_test::tickler::rrule::RecurrenceRule;
use tickler_test::tickler::types::EventId;

/// ## Summary
/// UTC instant on the hour.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid test instant {year}-{month}-{day} {hour}:00"))
}

pub fn single(id: &str, start_at: DateTime<Utc>) -> MasterEvent {
    MasterEvent::new(EventId::new(id), start_at).with_title(id)
}

pub fn recurring(id: &str, start_at: DateTime<Utc>, rule: RecurrenceRule) -> MasterEvent {
    single(id, start_at).with_recurrence(rule)
}
