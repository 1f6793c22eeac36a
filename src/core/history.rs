//! Calculation history log.
//!
//! Provides immutable, bounded tracking of completed calculations, newest
//! first.

use super::transition::Calculation;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Default number of entries kept in a [`HistoryLog`].
pub const DEFAULT_CAPACITY: usize = 20;

/// Record of a single completed calculation.
///
/// # Example
///
/// ```rust
/// use abacus::core::HistoryEntry;
/// use chrono::Utc;
///
/// let entry = HistoryEntry::new("5 + 3", "8", Utc::now());
/// assert_eq!(entry.display_line(), "5 + 3 = 8");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// What was computed, e.g. `"5 + 3"`
    pub expression: String,
    /// Display-formatted outcome
    pub result: String,
    /// When the calculation completed
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        expression: impl Into<String>,
        result: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            expression: expression.into(),
            result: result.into(),
            timestamp,
        }
    }

    /// Build an entry from a completed calculation.
    pub fn from_calculation(calculation: Calculation, timestamp: DateTime<Utc>) -> Self {
        Self {
            expression: calculation.expression,
            result: calculation.result,
            timestamp,
        }
    }

    /// Line shown in the history panel: `"{expression} = {result}"`.
    pub fn display_line(&self) -> String {
        format!("{} = {}", self.expression, self.result)
    }

    /// Local wall-clock time of the calculation, `HH:MM:SS`.
    pub fn time_label(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string()
    }
}

/// Ordered, bounded history of calculations, newest first.
///
/// History is immutable - `record` returns a new log with the entry added
/// and the oldest entries dropped past capacity.
///
/// # Example
///
/// ```rust
/// use abacus::core::{HistoryEntry, HistoryLog};
/// use chrono::Utc;
///
/// let log = HistoryLog::new();
/// let log = log.record(HistoryEntry::new("1 + 1", "2", Utc::now()));
/// let log = log.record(HistoryEntry::new("2 × 3", "6", Utc::now()));
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.latest().unwrap().expression, "2 × 3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLog {
    /// Create an empty log holding up to [`DEFAULT_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Build a log from entries already ordered newest first.
    ///
    /// Entries past capacity are dropped from the old end.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Record an entry, returning a new log.
    ///
    /// The original log is left unchanged.
    pub fn record(&self, entry: HistoryEntry) -> Self {
        let mut entries = Vec::with_capacity(self.capacity);
        entries.push(entry);
        entries.extend(self.entries.iter().cloned());
        entries.truncate(self.capacity);
        Self {
            entries,
            capacity: self.capacity,
        }
    }

    /// An empty log with the same capacity.
    pub fn cleared(&self) -> Self {
        Self::with_capacity(self.capacity)
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
