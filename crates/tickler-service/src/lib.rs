//! Occurrence expansion and reminder services.
//!
//! Turns stored master events into the concrete, time-ordered occurrences a
//! window contains, computes their reminder instants, and applies per-occurrence
//! and per-series dismissal. Storage is an injected [`store::EventStore`].

pub mod error;
pub mod event;
pub mod expand;
pub mod reminder;
pub mod store;
