//! Builder for constructing calculator sessions.

use crate::builder::config::CalculatorConfig;
use crate::builder::error::BuildError;
use crate::machine::{Calculator, Variant};
use crate::store::{HistoryStore, KeyValueStore, MemoryStore};

/// Builder for calculator sessions with a fluent API.
///
/// # Example
///
/// ```rust
/// use abacus::builder::CalculatorBuilder;
/// use abacus::machine::Variant;
/// use abacus::store::MemoryStore;
///
/// let calc = CalculatorBuilder::new()
///     .variant(Variant::ScientificWithHistory)
///     .history_capacity(5)
///     .store(MemoryStore::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(calc.history().unwrap().capacity(), 5);
/// ```
#[derive(Debug)]
pub struct CalculatorBuilder<K: KeyValueStore = MemoryStore> {
    config: CalculatorConfig,
    store: Option<K>,
}

impl<K: KeyValueStore> CalculatorBuilder<K> {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: CalculatorConfig::default(),
            store: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: CalculatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.config.variant = variant;
        self
    }

    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.config.storage_key = key.into();
        self
    }

    /// Set the durable store (required for the history variant).
    pub fn store(mut self, store: K) -> Self {
        self.store = Some(store);
        self
    }

    /// Build the calculator.
    ///
    /// For the history variant this rehydrates the log from the store.
    pub fn build(self) -> Result<Calculator<K>, BuildError> {
        self.config.validate()?;

        let history = if self.config.variant.tracks_history() {
            let store = self.store.ok_or(BuildError::MissingStore)?;
            Some(HistoryStore::load_on_startup(
                store,
                &self.config.storage_key,
                self.config.history_capacity,
            ))
        } else {
            None
        };

        Ok(Calculator::from_parts(self.config, history))
    }
}

impl<K: KeyValueStore> Default for CalculatorBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}
