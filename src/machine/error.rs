//! Dispatch errors.

use crate::core::InvalidDigit;
use thiserror::Error;

/// Errors returned when an action cannot be dispatched.
///
/// A rejected action leaves the calculator unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("'{action}' is not available: {reason}")]
    Unavailable {
        action: String,
        reason: &'static str,
    },

    #[error(transparent)]
    InvalidDigit(#[from] InvalidDigit),
}
