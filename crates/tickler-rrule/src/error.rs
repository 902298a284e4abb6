use thiserror::Error;

/// Recurrence rule parsing and validation errors
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),

    #[error("Rule does not recur")]
    NoRecurrence,
}

pub type RuleResult<T> = std::result::Result<T, RuleError>;
