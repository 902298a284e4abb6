//! Tickler reminder engine - integration test support.
//!
//! Re-exports the workspace crates under a single `tickler::` path so the
//! integration tests read like downstream callers.

pub mod tickler {
    pub use tickler_core::{config, constants, logging, types};
    pub use tickler_rrule as rrule;
    pub use tickler_service::{error, event, expand, reminder, store};
}
