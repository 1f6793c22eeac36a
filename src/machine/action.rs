//! User actions and keypad configuration.

use super::error::ActionError;
use crate::core::{BinaryOperator, Digit, UnaryFunction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which calculator is being driven.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Four-function keypad, no history.
    Basic,
    /// Adds power, unary functions and a mode toggle.
    Scientific,
    /// Scientific plus a persisted calculation log.
    #[default]
    ScientificWithHistory,
}

impl Variant {
    pub fn is_scientific(self) -> bool {
        matches!(self, Self::Scientific | Self::ScientificWithHistory)
    }

    pub fn tracks_history(self) -> bool {
        matches!(self, Self::ScientificWithHistory)
    }

    /// Keypad shown when the calculator starts.
    pub fn initial_mode(self) -> Mode {
        if self.is_scientific() {
            Mode::Scientific
        } else {
            Mode::Basic
        }
    }
}

/// Keypad currently shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Basic,
    Scientific,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Basic => Self::Scientific,
            Self::Scientific => Self::Basic,
        }
    }
}

/// A discrete user action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Digit(Digit),
    Decimal,
    Clear,
    Operator(BinaryOperator),
    Equals,
    Function(UnaryFunction),
    ToggleMode,
    ToggleHistory,
    ClearHistory,
}

impl Action {
    /// Digit action from a keypad character.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::machine::Action;
    ///
    /// assert!(Action::digit('7').is_ok());
    /// assert!(Action::digit('x').is_err());
    /// ```
    pub fn digit(c: char) -> Result<Self, ActionError> {
        Ok(Self::Digit(Digit::try_from(c)?))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "digit {d}"),
            Self::Decimal => f.write_str("decimal point"),
            Self::Clear => f.write_str("clear"),
            Self::Operator(op) => write!(f, "operator {op}"),
            Self::Equals => f.write_str("equals"),
            Self::Function(function) => write!(f, "function {function}"),
            Self::ToggleMode => f.write_str("toggle mode"),
            Self::ToggleHistory => f.write_str("toggle history"),
            Self::ClearHistory => f.write_str("clear history"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InvalidDigit;

    #[test]
    fn variant_capabilities() {
        assert!(!Variant::Basic.is_scientific());
        assert!(Variant::Scientific.is_scientific());
        assert!(!Variant::Scientific.tracks_history());
        assert!(Variant::ScientificWithHistory.tracks_history());
    }

    #[test]
    fn initial_mode_follows_variant() {
        assert_eq!(Variant::Basic.initial_mode(), Mode::Basic);
        assert_eq!(Variant::Scientific.initial_mode(), Mode::Scientific);
        assert_eq!(Variant::ScientificWithHistory.initial_mode(), Mode::Scientific);
    }

    #[test]
    fn mode_toggles_back_and_forth() {
        assert_eq!(Mode::Basic.toggled(), Mode::Scientific);
        assert_eq!(Mode::Basic.toggled().toggled(), Mode::Basic);
    }

    #[test]
    fn actions_describe_themselves() {
        assert_eq!(Action::digit('4').unwrap().to_string(), "digit 4");
        assert_eq!(
            Action::Operator(BinaryOperator::Divide).to_string(),
            "operator ÷"
        );
        assert_eq!(
            Action::Function(UnaryFunction::Sqrt).to_string(),
            "function sqrt"
        );
    }

    #[test]
    fn non_digit_key_is_an_action_error() {
        assert_eq!(
            Action::digit('x'),
            Err(ActionError::InvalidDigit(InvalidDigit::Char('x')))
        );
        assert_eq!(
            Action::digit('x').unwrap_err().to_string(),
            InvalidDigit::Char('x').to_string()
        );
    }

    #[test]
    fn variant_uses_snake_case() {
        let json = serde_json::to_string(&Variant::ScientificWithHistory).unwrap();
        assert_eq!(json, "\"scientific_with_history\"");
    }
}
