//! Pure input transitions.
//!
//! Each function takes the current [`CalculatorState`] and returns the next
//! one. Transitions that complete a computation also return a
//! [`Calculation`] describing it, which the caller may log.

use super::format::{format_number, parse_display, ERROR_SENTINEL};
use super::input::Digit;
use super::operator::{BinaryOperator, UnaryFunction};
use super::state::{CalculatorState, EntryMode};
use serde::{Deserialize, Serialize};

/// A completed binary operation or function application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    /// Human-readable description, e.g. `"5 + 3"` or `"sqrt(9)"`.
    pub expression: String,
    /// Display-formatted outcome.
    pub result: String,
}

/// Next state plus the calculation it completed, if any.
pub type Step = (CalculatorState, Option<Calculation>);

/// Enter a digit.
///
/// # Example
///
/// ```rust
/// use abacus::core::{input_digit, CalculatorState, Digit};
///
/// let state = CalculatorState::new();
/// let state = input_digit(&state, Digit::new(0).unwrap());
/// let state = input_digit(&state, Digit::new(5).unwrap());
/// assert_eq!(state.display(), "5");
/// ```
pub fn input_digit(state: &CalculatorState, digit: Digit) -> CalculatorState {
    let display = match state.entry_mode {
        EntryMode::Fresh => digit.to_string(),
        EntryMode::Appending if state.display == "0" => digit.to_string(),
        EntryMode::Appending => format!("{}{}", state.display, digit),
    };

    CalculatorState {
        display,
        entry_mode: EntryMode::Appending,
        ..state.clone()
    }
}

/// Enter a decimal point; a second point in the same number is ignored.
pub fn input_decimal(state: &CalculatorState) -> CalculatorState {
    match state.entry_mode {
        EntryMode::Fresh => CalculatorState {
            display: "0.".to_string(),
            entry_mode: EntryMode::Appending,
            ..state.clone()
        },
        EntryMode::Appending if state.display.contains('.') => state.clone(),
        EntryMode::Appending => CalculatorState {
            display: format!("{}.", state.display),
            ..state.clone()
        },
    }
}

/// Reset to the initial state.
pub fn clear(_state: &CalculatorState) -> CalculatorState {
    CalculatorState::new()
}

/// Press a binary operator.
///
/// The first operator stores the display as the pending operand. A later
/// operator evaluates the pending operation first, so `5 + 3 ×` shows `8`.
pub fn apply_binary_operator(state: &CalculatorState, op: BinaryOperator) -> Step {
    let input = parse_display(&state.display);
    let mut next = CalculatorState {
        pending_operator: Some(op),
        entry_mode: EntryMode::Fresh,
        ..state.clone()
    };

    let calculation = match (state.pending_operand, state.pending_operator) {
        (None, _) => {
            next.pending_operand = Some(input);
            None
        }
        (Some(pending), Some(pending_op)) => {
            let result = pending_op.calculate(pending, input);
            next.display = format_number(result);
            next.pending_operand = Some(result);
            Some(describe_binary(pending, pending_op, input, result))
        }
        (Some(_), None) => None,
    };

    (next, calculation)
}

/// Evaluate the pending operation; does nothing when there is none.
///
/// # Example
///
/// ```rust
/// use abacus::core::{apply_binary_operator, equals, input_digit, BinaryOperator, CalculatorState, Digit};
///
/// let state = input_digit(&CalculatorState::new(), Digit::new(5).unwrap());
/// let (state, _) = apply_binary_operator(&state, BinaryOperator::Add);
/// let state = input_digit(&state, Digit::new(3).unwrap());
/// let (state, calculation) = equals(&state);
///
/// assert_eq!(state.display(), "8");
/// let calculation = calculation.unwrap();
/// assert_eq!(calculation.expression, "5 + 3");
/// assert_eq!(calculation.result, "8");
/// ```
pub fn equals(state: &CalculatorState) -> Step {
    let (Some(pending), Some(op)) = (state.pending_operand, state.pending_operator) else {
        return (state.clone(), None);
    };

    let input = parse_display(&state.display);
    let result = op.calculate(pending, input);
    let next = CalculatorState {
        display: format_number(result),
        pending_operand: None,
        pending_operator: None,
        entry_mode: EntryMode::Fresh,
    };

    (next, Some(describe_binary(pending, op, input, result)))
}

/// Apply a single-argument function to the display.
///
/// A non-finite result shows `"Error"`. Pending operand and operator are
/// left in place.
pub fn apply_unary_function(state: &CalculatorState, function: UnaryFunction) -> Step {
    let value = parse_display(&state.display);
    let display = match function.evaluate(value) {
        Some(output) => format_number(output),
        None => ERROR_SENTINEL.to_string(),
    };

    let calculation = Calculation {
        expression: format!("{}({})", function, format_number(value)),
        result: display.clone(),
    };
    let next = CalculatorState {
        display,
        entry_mode: EntryMode::Fresh,
        ..state.clone()
    };

    (next, Some(calculation))
}

fn describe_binary(left: f64, op: BinaryOperator, right: f64, result: f64) -> Calculation {
    Calculation {
        expression: format!(
            "{} {} {}",
            format_number(left),
            op.symbol(),
            format_number(right)
        ),
        result: format_number(result),
    }
}
