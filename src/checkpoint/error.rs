//! Checkpoint error types.

use crate::machine::Variant;
use thiserror::Error;

/// Why a checkpoint could not be written or read back.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("JSON checkpoint codec failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary checkpoint codec failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("checkpoint format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Every defect found, not just the first.
    #[error("checkpoint describes an impossible session: {}", list(.0))]
    Invalid(Vec<CheckpointViolation>),
}

/// One field of a checkpoint that no calculator session could produce.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckpointViolation {
    #[error("display '{0}' is not a number, typed digits or the error sentinel")]
    Display(String),

    #[error("basic calculator cannot show the scientific keypad")]
    ScientificModeOnBasic,

    #[error("{0:?} calculator cannot carry history")]
    UnexpectedHistory(Variant),

    #[error("{len} history entries exceed capacity {capacity}")]
    HistoryOverCapacity { len: usize, capacity: usize },

    #[error("config: {0}")]
    Config(String),
}

fn list(violations: &[CheckpointViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
