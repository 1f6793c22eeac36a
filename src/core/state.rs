//! Calculator input state.
//!
//! The state is a plain value: transitions in [`super::transition`] take a
//! reference to it and return the next state without side effects.

use super::format::{is_typed_number, is_valid_display, parse_display};
use super::operator::BinaryOperator;
use serde::{Deserialize, Serialize};

/// Whether the next digit replaces or extends the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryMode {
    /// Next digit replaces the display.
    #[default]
    Fresh,
    /// Next digit is appended to the display.
    Appending,
}

/// Complete input state of one calculator.
///
/// The display always holds a formatted result, the `"Error"` sentinel, or
/// the digits typed so far. The pending operand is whatever the last
/// operator produced and may be non-finite after an overflow.
///
/// # Example
///
/// ```rust
/// use abacus::core::{CalculatorState, EntryMode};
///
/// let state = CalculatorState::new();
/// assert_eq!(state.display(), "0");
/// assert_eq!(state.entry_mode(), EntryMode::Fresh);
/// assert!(state.pending_operand().is_none());
/// assert!(state.pending_operator().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub(crate) display: String,
    pub(crate) pending_operand: Option<f64>,
    pub(crate) pending_operator: Option<BinaryOperator>,
    pub(crate) entry_mode: EntryMode,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Initial state: display `"0"`, nothing pending.
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            entry_mode: EntryMode::Fresh,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn pending_operand(&self) -> Option<f64> {
        self.pending_operand
    }

    pub fn pending_operator(&self) -> Option<BinaryOperator> {
        self.pending_operator
    }

    pub fn entry_mode(&self) -> EntryMode {
        self.entry_mode
    }

    /// Current display read as a number (NaN for the error sentinel).
    pub fn display_value(&self) -> f64 {
        parse_display(&self.display)
    }

    /// Check the display invariant.
    ///
    /// Used when accepting a state from outside, such as a checkpoint.
    pub fn is_consistent(&self) -> bool {
        is_valid_display(&self.display) || is_typed_number(&self.display)
    }
}
