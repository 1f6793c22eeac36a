//! Build errors for calculator construction.

use thiserror::Error;

/// Errors that can occur when building a calculator.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("History variant needs a store. Call .store(store) before .build()")]
    MissingStore,

    #[error("History capacity must be at least 1")]
    ZeroCapacity,

    #[error("Storage key '{0}' must be non-empty and use only ASCII letters, digits, '_' or '-'")]
    InvalidStorageKey(String),

    #[error("Invalid calculator configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
