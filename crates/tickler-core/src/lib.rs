//! Shared building blocks for the tickler workspace.
//!
//! Holds the pieces every other crate needs and nothing domain-heavy:
//! - `error` with the core error type
//! - `config` for loading `Settings`
//! - `constants` for fixed calendar and reminder values
//! - `types` for identifier newtypes
//! - `logging` for installing the `tracing` subscriber

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod types;
