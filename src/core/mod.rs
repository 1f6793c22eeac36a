//! Core calculator types and logic.
//!
//! This module contains the pure functional core of the calculator:
//! - Input state and entry mode
//! - Operators, functions and display formatting
//! - Reducer-style transitions
//! - The bounded, immutable history log
//!
//! All logic in this module is pure (no side effects), following
//! the "pure core, imperative shell" philosophy.

mod format;
mod history;
mod input;
mod operator;
mod state;
mod transition;

pub use format::{format_number, is_valid_display, parse_display, ERROR_SENTINEL};
pub use history::{HistoryEntry, HistoryLog, DEFAULT_CAPACITY};
pub use input::{Digit, InvalidDigit};
pub use operator::{calculate, BinaryOperator, UnaryFunction};
pub use state::{CalculatorState, EntryMode};
pub use transition::{
    apply_binary_operator, apply_unary_function, clear, equals, input_decimal, input_digit,
    Calculation, Step,
};
