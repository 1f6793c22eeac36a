//! Binary operators and single-argument functions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator waiting for its right-hand operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Only reachable from the scientific keypad.
    Power,
}

impl BinaryOperator {
    /// Symbol used when describing a calculation.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
        }
    }

    /// Whether the operator belongs to the scientific keypad.
    pub fn is_scientific(self) -> bool {
        matches!(self, Self::Power)
    }

    /// Apply the operator to two operands.
    ///
    /// Division by zero yields `0` rather than an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::core::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Add.calculate(5.0, 3.0), 8.0);
    /// assert_eq!(BinaryOperator::Divide.calculate(7.0, 0.0), 0.0);
    /// assert_eq!(BinaryOperator::Power.calculate(2.0, 10.0), 1024.0);
    /// ```
    pub fn calculate(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    0.0
                } else {
                    a / b
                }
            }
            Self::Power => a.powf(b),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Free-function form of [`BinaryOperator::calculate`].
pub fn calculate(a: f64, b: f64, op: BinaryOperator) -> f64 {
    op.calculate(a, b)
}

/// Single-argument function from the scientific keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
    Sqrt,
}

impl UnaryFunction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
        }
    }

    /// Raw result of the function; trigonometry works in radians.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Sin => value.sin(),
            Self::Cos => value.cos(),
            Self::Tan => value.tan(),
            Self::Log => value.log10(),
            Self::Ln => value.ln(),
            Self::Sqrt => value.sqrt(),
        }
    }

    /// Evaluate the function, returning `None` when the result is not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use abacus::core::UnaryFunction;
    ///
    /// assert_eq!(UnaryFunction::Sqrt.evaluate(9.0), Some(3.0));
    /// assert_eq!(UnaryFunction::Sqrt.evaluate(-1.0), None);
    /// assert_eq!(UnaryFunction::Log.evaluate(0.0), None);
    /// ```
    pub fn evaluate(self, value: f64) -> Option<f64> {
        Some(self.apply(value)).filter(|output| output.is_finite())
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
