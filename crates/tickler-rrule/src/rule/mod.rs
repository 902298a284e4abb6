//! Recurrence rule grammar: frequency, interval, weekday selection and bound.

mod core;
mod parse;

pub use self::core::{Frequency, RecurrenceRule, weekday_index};
pub use self::parse::RawRecurrence;
