//! Recurrence rule engine.
//!
//! Pure calendar arithmetic: given a rule, a series anchor and a window, produce
//! the instants of the series inside the window. No I/O and no shared state.

pub mod calendar;
pub mod error;
pub mod expand;
pub mod instant;
pub mod rule;
pub mod window;

pub use expand::RuleEngine;
pub use rule::{Frequency, RawRecurrence, RecurrenceRule};
pub use window::Window;
