//! History log mirrored to a key-value store.

use super::error::{EntryViolation, HistoryLoadError, StoreError};
use super::KeyValueStore;
use crate::core::{is_valid_display, HistoryEntry, HistoryLog};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

/// Default slot holding the serialized history.
pub const DEFAULT_STORAGE_KEY: &str = "calculatorHistory";

/// Parse and validate a persisted history slot.
///
/// The slot holds a JSON list of `{expression, result, timestamp}` objects,
/// newest first. Every defect across all entries is reported, not just the
/// first one.
pub fn parse_persisted(text: &str, capacity: usize) -> Result<HistoryLog, HistoryLoadError> {
    let entries: Vec<HistoryEntry> = serde_json::from_str(text)?;

    match validate_entries(&entries) {
        Validation::Success(_) => Ok(HistoryLog::from_entries(entries, capacity)),
        Validation::Failure(violations) => Err(HistoryLoadError::Invalid(
            violations.iter().cloned().collect(),
        )),
    }
}

fn validate_entries(entries: &[HistoryEntry]) -> Validation<(), NonEmptyVec<EntryViolation>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<EntryViolation>>> = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        checks.push(if entry.expression.trim().is_empty() {
            Validation::fail(EntryViolation::EmptyExpression { index })
        } else {
            Validation::success(())
        });

        checks.push(if is_valid_display(&entry.result) {
            Validation::success(())
        } else {
            Validation::fail(EntryViolation::InvalidResult {
                index,
                result: entry.result.clone(),
            })
        });
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Bounded history log that persists itself on every change.
///
/// Persistence is synchronous. The in-memory log is updated even when the
/// write fails; the error is handed back so the caller can decide whether
/// to surface it.
#[derive(Debug)]
pub struct HistoryStore<K: KeyValueStore> {
    store: K,
    key: String,
    log: HistoryLog,
}

impl<K: KeyValueStore> HistoryStore<K> {
    /// Wrap a store with an empty log, without reading it.
    pub fn new(store: K, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            store,
            key: key.into(),
            log: HistoryLog::with_capacity(capacity),
        }
    }

    /// Rehydrate the log from the store.
    ///
    /// A missing slot yields an empty log. An unreadable or malformed slot
    /// also yields an empty log, with a warning.
    pub fn load_on_startup(store: K, key: impl Into<String>, capacity: usize) -> Self {
        let mut history = Self::new(store, key, capacity);

        let text = match history.store.get(&history.key) {
            Ok(Some(text)) => text,
            Ok(None) => return history,
            Err(e) => {
                warn!(
                    backend = history.store.name(),
                    key = %history.key,
                    error = %e,
                    "failed to read persisted history, starting empty"
                );
                return history;
            }
        };

        match parse_persisted(&text, capacity) {
            Ok(log) => {
                debug!(
                    backend = history.store.name(),
                    count = log.len(),
                    "loaded calculation history"
                );
                history.log = log;
            }
            Err(HistoryLoadError::Invalid(violations)) => {
                for violation in &violations {
                    warn!(key = %history.key, %violation, "invalid history entry");
                }
                warn!(
                    key = %history.key,
                    count = violations.len(),
                    "discarding persisted history"
                );
            }
            Err(e) => {
                warn!(key = %history.key, error = %e, "discarding persisted history");
            }
        }

        history
    }

    /// Prepend an entry, drop past capacity, and persist the full log.
    pub fn record(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        self.log = self.log.record(entry);
        self.persist()
    }

    /// Replace the whole log and persist it.
    pub fn replace(&mut self, entries: Vec<HistoryEntry>) -> Result<(), StoreError> {
        self.log = HistoryLog::from_entries(entries, self.log.capacity());
        self.persist()
    }

    /// Empty the log and delete the persisted slot.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.log = self.log.cleared();
        self.store.remove(&self.key)
    }

    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        self.log.entries()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn into_store(self) -> K {
        self.store
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let text = serde_json::to_string(self.log.entries())?;
        self.store.set(&self.key, &text)?;
        debug!(
            backend = self.store.name(),
            count = self.log.len(),
            "persisted calculation history"
        );
        Ok(())
    }
}
