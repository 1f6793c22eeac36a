//! Checkpoint and resume for calculator sessions.
//!
//! A checkpoint captures everything needed to rebuild a
//! [`Calculator`](crate::machine::Calculator): configuration, keypad mode,
//! input state and history. It does NOT include the store itself.

use crate::builder::CalculatorConfig;
use crate::core::{CalculatorState, HistoryEntry};
use crate::machine::{Mode, Variant};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::{CheckpointError, CheckpointViolation};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a calculator session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Session configuration
    pub config: CalculatorConfig,

    /// Keypad shown at checkpoint time
    pub mode: Mode,

    /// Whether the history panel was open
    pub history_visible: bool,

    /// Input state
    pub state: CalculatorState,

    /// History entries, newest first
    pub history: Vec<HistoryEntry>,
}

impl SessionCheckpoint {
    /// Encode as pretty-printed JSON.
    ///
    /// JSON has no non-finite numbers, so an overflowed pending operand is
    /// written as `null` and resumes as no pending operand.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON, rejecting unsupported versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Encode in compact binary form. Every `f64` survives exactly.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from binary, rejecting unsupported versions.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }

    /// Check that the snapshot describes a session that could have existed.
    ///
    /// Any state the transitions can reach is accepted, including an
    /// overflowed pending operand and arbitrarily long typed entry.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        self.check_version()?;

        match self.check_fields() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(CheckpointError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }

    fn check_fields(&self) -> Validation<(), NonEmptyVec<CheckpointViolation>> {
        let variant = self.config.variant;
        let checks = vec![
            require(self.state.is_consistent(), || {
                CheckpointViolation::Display(self.state.display().to_string())
            }),
            require(variant != Variant::Basic || self.mode == Mode::Basic, || {
                CheckpointViolation::ScientificModeOnBasic
            }),
            require(variant.tracks_history() || self.history.is_empty(), || {
                CheckpointViolation::UnexpectedHistory(variant)
            }),
            require(self.history.len() <= self.config.history_capacity, || {
                CheckpointViolation::HistoryOverCapacity {
                    len: self.history.len(),
                    capacity: self.config.history_capacity,
                }
            }),
            match self.config.validate() {
                Ok(()) => Validation::success(()),
                Err(e) => Validation::fail(CheckpointViolation::Config(e.to_string())),
            },
        ];

        Validation::all_vec(checks).map(|_| ())
    }
}

fn require(
    holds: bool,
    violation: impl FnOnce() -> CheckpointViolation,
) -> Validation<(), NonEmptyVec<CheckpointViolation>> {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BinaryOperator, ERROR_SENTINEL};
    use crate::machine::{Action, Calculator};
    use crate::store::MemoryStore;

    fn sample() -> SessionCheckpoint {
        let mut calc = Calculator::with_history(MemoryStore::new());
        for action in [
            Action::digit('1').unwrap(),
            Action::digit('2').unwrap(),
            Action::Operator(BinaryOperator::Multiply),
            Action::digit('3').unwrap(),
            Action::Equals,
            Action::Operator(BinaryOperator::Subtract),
            Action::Decimal,
            Action::digit('5').unwrap(),
        ] {
            calc.dispatch(action).unwrap();
        }
        calc.checkpoint()
    }

    #[test]
    fn json_round_trip() {
        let checkpoint = sample();
        let json = checkpoint.to_json().unwrap();
        let restored = SessionCheckpoint::from_json(&json).unwrap();
        assert_eq!(restored, checkpoint);
        assert_eq!(restored.state.display(), "0.5");
    }

    #[test]
    fn binary_round_trip() {
        let checkpoint = sample();
        let bytes = checkpoint.to_binary().unwrap();
        let restored = SessionCheckpoint::from_binary(&bytes).unwrap();
        assert_eq!(restored, checkpoint);
    }

    #[test]
    fn rejects_future_version() {
        let mut checkpoint = sample();
        checkpoint.version = CHECKPOINT_VERSION + 1;
        let json = serde_json::to_string(&checkpoint).unwrap();

        let result = SessionCheckpoint::from_json(&json);
        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn rejects_garbage_bytes() {
        let result = SessionCheckpoint::from_binary(&[0xff, 0x00, 0x13]);
        assert!(matches!(
            result,
            Err(CheckpointError::Binary(_))
        ));
    }

    #[test]
    fn validate_rejects_scientific_basic_calculator() {
        let mut checkpoint = Calculator::basic().checkpoint();
        checkpoint.mode = Mode::Scientific;
        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::Invalid(v)) if v == [CheckpointViolation::ScientificModeOnBasic]
        ));
    }

    #[test]
    fn validate_reports_every_violation() {
        let mut checkpoint = Calculator::basic().checkpoint();
        checkpoint.mode = Mode::Scientific;
        checkpoint.history = sample().history;
        checkpoint.state.display = "12x".to_string();

        let Err(CheckpointError::Invalid(violations)) = checkpoint.validate() else {
            panic!("expected validation failure");
        };
        assert_eq!(
            violations,
            vec![
                CheckpointViolation::Display("12x".to_string()),
                CheckpointViolation::ScientificModeOnBasic,
                CheckpointViolation::UnexpectedHistory(Variant::Basic),
            ]
        );
    }

    #[test]
    fn validate_rejects_history_beyond_capacity() {
        let mut checkpoint = sample();
        checkpoint.config.history_capacity = 1;
        checkpoint.history = [checkpoint.history.clone(), checkpoint.history].concat();

        assert!(matches!(
            checkpoint.validate(),
            Err(CheckpointError::Invalid(v))
                if v == [CheckpointViolation::HistoryOverCapacity { len: 2, capacity: 1 }]
        ));
    }

    fn overflowed() -> Calculator {
        let mut calc = Calculator::scientific();
        for action in [
            Action::digit('1').unwrap(),
            Action::digit('0').unwrap(),
            Action::Operator(BinaryOperator::Power),
            Action::digit('4').unwrap(),
            Action::digit('0').unwrap(),
            Action::digit('0').unwrap(),
            Action::Operator(BinaryOperator::Add),
        ] {
            calc.dispatch(action).unwrap();
        }
        calc
    }

    #[test]
    fn overflowed_session_resumes() {
        let calc = overflowed();
        assert_eq!(calc.display(), ERROR_SENTINEL);
        assert_eq!(calc.state().pending_operand(), Some(f64::INFINITY));

        let resumed = Calculator::resume(calc.checkpoint(), MemoryStore::new()).unwrap();
        assert_eq!(resumed.state(), calc.state());

        let bytes = calc.checkpoint().to_binary().unwrap();
        let restored = SessionCheckpoint::from_binary(&bytes).unwrap();
        let resumed = Calculator::resume(restored, MemoryStore::new()).unwrap();
        assert_eq!(resumed.state().pending_operand(), Some(f64::INFINITY));
    }

    #[test]
    fn overflowed_session_resumes_from_json_without_operand() {
        let json = overflowed().checkpoint().to_json().unwrap();
        let restored = SessionCheckpoint::from_json(&json).unwrap();
        let resumed = Calculator::resume(restored, MemoryStore::new()).unwrap();

        assert_eq!(resumed.display(), ERROR_SENTINEL);
        assert_eq!(resumed.state().pending_operand(), None);
    }

    #[test]
    fn long_typed_entry_resumes() {
        let mut calc = Calculator::basic();
        for _ in 0..400 {
            calc.dispatch(Action::digit('9').unwrap()).unwrap();
        }

        let resumed = Calculator::resume(calc.checkpoint(), MemoryStore::new()).unwrap();
        assert_eq!(resumed.display().len(), 400);
    }

    #[test]
    fn each_checkpoint_gets_unique_id() {
        let calc = Calculator::basic();
        assert_ne!(calc.checkpoint().id, calc.checkpoint().id);
    }
}
