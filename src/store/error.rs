//! Storage and history-rehydration error types.

use thiserror::Error;

/// Errors from a key-value store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Keys may only contain ASCII letters, digits, `_` and `-`.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A defect found in one rehydrated history entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntryViolation {
    #[error("entry {index}: expression is empty")]
    EmptyExpression { index: usize },

    #[error("entry {index}: result '{result}' is neither a finite number nor the error sentinel")]
    InvalidResult { index: usize, result: String },
}

/// Why persisted history could not be rehydrated.
#[derive(Debug, Error)]
pub enum HistoryLoadError {
    #[error("persisted history is not a list of entries: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("persisted history has {} invalid field(s)", .0.len())]
    Invalid(Vec<EntryViolation>),
}
