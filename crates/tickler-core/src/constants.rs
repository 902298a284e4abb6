/// Title given to events created or decoded without one.
pub const DEFAULT_EVENT_TITLE: &str = "Untitled event";

/// How far ahead of an occurrence its reminder fires, in days.
pub const REMINDER_LEAD_DAYS: i64 = 1;

/// Default window length for the upcoming-occurrences query.
pub const DEFAULT_HORIZON_DAYS: u32 = 60;

/// Default calendar offset from UTC, in minutes.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 0;

/// Default `tracing` filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "debug";

pub const SECONDS_PER_MINUTE: i32 = 60;
pub const MINUTES_PER_DAY: i32 = 24 * 60;
