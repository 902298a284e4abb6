//! Master events, their derived occurrences, and stored-row decoding.

pub mod model;
pub mod record;

pub use model::{DismissedOccurrences, EventPatch, MasterEvent, NewEvent, Occurrence};
pub use record::{EventRecord, RecordError, decode_events};
