//! Calculator session that dispatches user actions.

use crate::builder::CalculatorConfig;
use crate::checkpoint::{CheckpointError, SessionCheckpoint, CHECKPOINT_VERSION};
use crate::core::{
    apply_binary_operator, apply_unary_function, clear, equals, input_decimal, input_digit,
    Calculation, CalculatorState, HistoryEntry, HistoryLog, Step,
};
use crate::machine::action::{Action, Mode, Variant};
use crate::machine::error::ActionError;
use crate::store::{HistoryStore, KeyValueStore, MemoryStore};
use chrono::Utc;
use tracing::{debug, warn};

/// One row of the history panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow {
    /// `"{expression} = {result}"`
    pub line: String,
    /// Local time, `HH:MM:SS`
    pub time: String,
}

/// A single calculator session.
///
/// Owns the input state, the keypad mode and, for the history variant, the
/// persisted history log. Every user action goes through [`dispatch`].
///
/// [`dispatch`]: Calculator::dispatch
///
/// # Example
///
/// ```rust
/// use abacus::core::BinaryOperator;
/// use abacus::machine::{Action, Calculator};
/// use abacus::store::MemoryStore;
///
/// let mut calc = Calculator::with_history(MemoryStore::new());
/// calc.dispatch(Action::digit('5').unwrap()).unwrap();
/// calc.dispatch(Action::Operator(BinaryOperator::Add)).unwrap();
/// calc.dispatch(Action::digit('3').unwrap()).unwrap();
/// let entry = calc.dispatch(Action::Equals).unwrap().unwrap();
///
/// assert_eq!(calc.display(), "8");
/// assert_eq!(entry.display_line(), "5 + 3 = 8");
/// ```
#[derive(Debug)]
pub struct Calculator<K: KeyValueStore = MemoryStore> {
    config: CalculatorConfig,
    state: CalculatorState,
    mode: Mode,
    history_visible: bool,
    history: Option<HistoryStore<K>>,
}

impl Calculator<MemoryStore> {
    /// Four-function calculator without history.
    pub fn basic() -> Self {
        Self::without_history(Variant::Basic)
    }

    /// Scientific calculator without history.
    pub fn scientific() -> Self {
        Self::without_history(Variant::Scientific)
    }

    fn without_history(variant: Variant) -> Self {
        let config = CalculatorConfig {
            variant,
            ..CalculatorConfig::default()
        };
        Self::from_parts(config, None)
    }
}

impl<K: KeyValueStore> Calculator<K> {
    /// Scientific calculator with history persisted to `store`.
    ///
    /// Uses the default slot and capacity and rehydrates any saved log.
    pub fn with_history(store: K) -> Self {
        let config = CalculatorConfig::default();
        let history =
            HistoryStore::load_on_startup(store, &config.storage_key, config.history_capacity);
        Self::from_parts(config, Some(history))
    }

    pub(crate) fn from_parts(config: CalculatorConfig, history: Option<HistoryStore<K>>) -> Self {
        Self {
            mode: config.variant.initial_mode(),
            config,
            state: CalculatorState::new(),
            history_visible: false,
            history,
        }
    }

    /// Apply one user action.
    ///
    /// Returns the history entry recorded by this action, if any. Actions
    /// the current variant or mode does not offer are rejected and leave
    /// the calculator untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<Option<HistoryEntry>, ActionError> {
        self.check_available(action)?;
        debug!(%action, "dispatch");

        let calculation = match action {
            Action::Digit(digit) => {
                self.state = input_digit(&self.state, digit);
                None
            }
            Action::Decimal => {
                self.state = input_decimal(&self.state);
                None
            }
            Action::Clear => {
                self.state = clear(&self.state);
                None
            }
            Action::Operator(op) => self.step(apply_binary_operator(&self.state, op)),
            Action::Equals => self.step(equals(&self.state)),
            Action::Function(function) => {
                self.step(apply_unary_function(&self.state, function))
            }
            Action::ToggleMode => {
                self.mode = self.mode.toggled();
                None
            }
            Action::ToggleHistory => {
                self.history_visible = !self.history_visible;
                None
            }
            Action::ClearHistory => {
                self.clear_history();
                None
            }
        };

        Ok(calculation.and_then(|calculation| self.record(calculation)))
    }

    fn check_available(&self, action: Action) -> Result<(), ActionError> {
        let variant = self.config.variant;
        let reason = match action {
            Action::Operator(op) if op.is_scientific() && self.mode != Mode::Scientific => {
                Some("scientific keypad is not active")
            }
            Action::Function(_) if self.mode != Mode::Scientific => {
                Some("scientific keypad is not active")
            }
            Action::ToggleMode if !variant.is_scientific() => {
                Some("basic calculator has no scientific mode")
            }
            Action::ToggleHistory | Action::ClearHistory if !variant.tracks_history() => {
                Some("calculator does not track history")
            }
            _ => None,
        };

        match reason {
            Some(reason) => Err(ActionError::Unavailable {
                action: action.to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    fn step(&mut self, step: Step) -> Option<Calculation> {
        let (state, calculation) = step;
        self.state = state;
        calculation
    }

    fn record(&mut self, calculation: Calculation) -> Option<HistoryEntry> {
        let history = self.history.as_mut()?;
        let entry = HistoryEntry::from_calculation(calculation, Utc::now());
        if let Err(e) = history.record(entry.clone()) {
            warn!(
                backend = history.store().name(),
                error = %e,
                "failed to persist calculation history"
            );
        }
        Some(entry)
    }

    fn clear_history(&mut self) {
        if let Some(history) = self.history.as_mut() {
            if let Err(e) = history.clear() {
                warn!(
                    backend = history.store().name(),
                    error = %e,
                    "failed to delete persisted history"
                );
            }
        }
    }

    /// Current display text.
    pub fn display(&self) -> &str {
        self.state.display()
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_history_visible(&self) -> bool {
        self.history_visible
    }

    /// History log, when the variant tracks one.
    pub fn history(&self) -> Option<&HistoryLog> {
        self.history.as_ref().map(HistoryStore::log)
    }

    /// Rows for the history panel, newest first.
    pub fn history_rows(&self) -> Vec<HistoryRow> {
        self.history()
            .map(|log| {
                log.entries()
                    .iter()
                    .map(|entry| HistoryRow {
                        line: entry.display_line(),
                        time: entry.time_label(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Release the underlying store, if any.
    pub fn into_store(self) -> Option<K> {
        self.history.map(HistoryStore::into_store)
    }

    /// Capture the session so it can be resumed later.
    pub fn checkpoint(&self) -> SessionCheckpoint {
        SessionCheckpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            config: self.config.clone(),
            mode: self.mode,
            history_visible: self.history_visible,
            state: self.state.clone(),
            history: self
                .history()
                .map(|log| log.entries().to_vec())
                .unwrap_or_default(),
        }
    }

    /// Rebuild a session from a checkpoint.
    ///
    /// For the history variant the checkpointed log is written to `store`,
    /// replacing whatever the slot held. Other variants drop the store.
    pub fn resume(checkpoint: SessionCheckpoint, store: K) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;

        let SessionCheckpoint {
            config,
            mode,
            history_visible,
            state,
            history: entries,
            ..
        } = checkpoint;

        let history = if config.variant.tracks_history() {
            let mut history =
                HistoryStore::new(store, &config.storage_key, config.history_capacity);
            if let Err(e) = history.replace(entries) {
                warn!(error = %e, "failed to persist resumed history");
            }
            Some(history)
        } else {
            None
        };

        Ok(Self {
            config,
            state,
            mode,
            history_visible,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BinaryOperator, UnaryFunction, DEFAULT_CAPACITY};
    use crate::store::DEFAULT_STORAGE_KEY;

    fn press(calc: &mut Calculator<impl KeyValueStore>, keys: &str) {
        for key in keys.chars() {
            let action = match key {
                '.' => Action::Decimal,
                '+' => Action::Operator(BinaryOperator::Add),
                '-' => Action::Operator(BinaryOperator::Subtract),
                '*' => Action::Operator(BinaryOperator::Multiply),
                '/' => Action::Operator(BinaryOperator::Divide),
                '^' => Action::Operator(BinaryOperator::Power),
                '=' => Action::Equals,
                'c' => Action::Clear,
                d => Action::digit(d).unwrap(),
            };
            calc.dispatch(action).unwrap();
        }
    }

    #[test]
    fn basic_calculator_adds() {
        let mut calc = Calculator::basic();
        press(&mut calc, "5+3=");
        assert_eq!(calc.display(), "8");
        assert!(calc.history().is_none());
        assert!(calc.history_rows().is_empty());
    }

    #[test]
    fn basic_rejects_scientific_actions() {
        let mut calc = Calculator::basic();
        press(&mut calc, "4");

        let err = calc
            .dispatch(Action::Function(UnaryFunction::Sqrt))
            .unwrap_err();
        assert!(matches!(err, ActionError::Unavailable { .. }));
        assert!(calc.dispatch(Action::Operator(BinaryOperator::Power)).is_err());
        assert!(calc.dispatch(Action::ToggleMode).is_err());
        assert!(calc.dispatch(Action::ToggleHistory).is_err());
        assert_eq!(calc.display(), "4");
    }

    #[test]
    fn scientific_mode_toggle_gates_functions() {
        let mut calc = Calculator::scientific();
        assert_eq!(calc.mode(), Mode::Scientific);
        press(&mut calc, "9");
        calc.dispatch(Action::Function(UnaryFunction::Sqrt)).unwrap();
        assert_eq!(calc.display(), "3");

        calc.dispatch(Action::ToggleMode).unwrap();
        assert_eq!(calc.mode(), Mode::Basic);
        assert!(calc.dispatch(Action::Function(UnaryFunction::Sqrt)).is_err());
        assert!(calc.dispatch(Action::Operator(BinaryOperator::Power)).is_err());
        press(&mut calc, "*2=");
        assert_eq!(calc.display(), "6");
    }

    #[test]
    fn scientific_without_history_records_nothing() {
        let mut calc = Calculator::scientific();
        press(&mut calc, "4");
        let entry = calc.dispatch(Action::Function(UnaryFunction::Sqrt)).unwrap();
        assert!(entry.is_none());
        assert!(calc.dispatch(Action::ClearHistory).is_err());
    }

    #[test]
    fn equals_records_history() {
        let mut calc = Calculator::with_history(MemoryStore::new());
        press(&mut calc, "5+3=");

        let log = calc.history().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].expression, "5 + 3");
        assert_eq!(log.entries()[0].result, "8");
        assert_eq!(calc.history_rows()[0].line, "5 + 3 = 8");
    }

    #[test]
    fn unary_function_records_history() {
        let mut calc = Calculator::with_history(MemoryStore::new());
        press(&mut calc, "0");
        let entry = calc
            .dispatch(Action::Function(UnaryFunction::Sqrt))
            .unwrap()
            .unwrap();
        assert_eq!(calc.display(), "0");
        assert_eq!(entry.expression, "sqrt(0)");
        assert_eq!(entry.result, "0");
    }

    #[test]
    fn history_persists_across_sessions() {
        let mut calc = Calculator::with_history(MemoryStore::new());
        press(&mut calc, "6*7=");
        let recorded = calc.history().unwrap().latest().cloned().unwrap();

        let store = calc.into_store().unwrap();
        let reloaded = Calculator::with_history(store);
        assert_eq!(reloaded.history().unwrap().latest(), Some(&recorded));
        assert_eq!(reloaded.display(), "0");
    }

    #[test]
    fn history_toggle_and_clear() {
        let mut calc = Calculator::with_history(MemoryStore::new());
        assert!(!calc.is_history_visible());
        calc.dispatch(Action::ToggleHistory).unwrap();
        assert!(calc.is_history_visible());

        press(&mut calc, "1+1=");
        calc.dispatch(Action::ClearHistory).unwrap();
        assert!(calc.history().unwrap().is_empty());

        let store = calc.into_store().unwrap();
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn clear_keeps_history() {
        let mut calc = Calculator::with_history(MemoryStore::new());
        press(&mut calc, "2+2=c");
        assert_eq!(calc.display(), "0");
        assert!(calc.state().pending_operand().is_none());
        assert_eq!(calc.history().unwrap().len(), 1);
    }

    #[test]
    fn rejected_action_leaves_state() {
        let mut calc = Calculator::basic();
        press(&mut calc, "12+");
        let before = calc.state().clone();
        assert!(calc.dispatch(Action::Function(UnaryFunction::Ln)).is_err());
        assert_eq!(calc.state(), &before);
    }

    #[test]
    fn checkpoint_resume_restores_session() {
        let mut calc = Calculator::with_history(MemoryStore::new());
        press(&mut calc, "2^8=");
        press(&mut calc, "3+4");
        calc.dispatch(Action::ToggleHistory).unwrap();

        let checkpoint = calc.checkpoint();
        assert_eq!(checkpoint.history.len(), 1);

        let resumed = Calculator::resume(checkpoint, MemoryStore::new()).unwrap();
        assert_eq!(resumed.display(), "4");
        assert_eq!(resumed.state(), calc.state());
        assert!(resumed.is_history_visible());
        assert_eq!(resumed.history(), calc.history());
        assert_eq!(resumed.config().history_capacity, DEFAULT_CAPACITY);

        let store = resumed.into_store().unwrap();
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn resume_without_history_drops_store() {
        let mut calc = Calculator::basic();
        press(&mut calc, "7");
        let resumed = Calculator::resume(calc.checkpoint(), MemoryStore::new()).unwrap();
        assert_eq!(resumed.display(), "7");
        assert!(resumed.into_store().is_none());
    }
}
