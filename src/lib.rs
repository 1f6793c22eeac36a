//! Abacus: A pure functional calculator state machine
//!
//! Abacus follows the "pure core, imperative shell" philosophy. Calculator
//! input is handled by pure transition functions with no side effects,
//! while history persistence is isolated behind a pluggable key-value store.
//!
//! # Core Concepts
//!
//! - **State**: display, pending operand, pending operator and entry mode
//! - **Transitions**: reducer-style functions from one state to the next
//! - **History**: bounded, newest-first log of completed calculations
//! - **Session**: a [`Calculator`] that dispatches user actions and records
//!   history
//!
//! # Example
//!
//! ```rust
//! use abacus::core::{BinaryOperator, UnaryFunction};
//! use abacus::machine::{Action, Calculator};
//! use abacus::store::MemoryStore;
//!
//! let mut calc = Calculator::with_history(MemoryStore::new());
//!
//! calc.dispatch(Action::digit('9').unwrap()).unwrap();
//! calc.dispatch(Action::Function(UnaryFunction::Sqrt)).unwrap();
//! assert_eq!(calc.display(), "3");
//!
//! calc.dispatch(Action::Operator(BinaryOperator::Power)).unwrap();
//! calc.dispatch(Action::digit('2').unwrap()).unwrap();
//! calc.dispatch(Action::Equals).unwrap();
//! assert_eq!(calc.display(), "9");
//!
//! let rows = calc.history_rows();
//! assert_eq!(rows[0].line, "3 ^ 2 = 9");
//! assert_eq!(rows[1].line, "sqrt(9) = 3");
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod machine;
pub mod store;

// Re-export commonly used types
pub use crate::builder::{CalculatorBuilder, CalculatorConfig};
pub use crate::core::{CalculatorState, HistoryEntry, HistoryLog};
pub use crate::machine::{Action, Calculator, Mode, Variant};
pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
