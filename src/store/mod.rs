//! Durable storage for the calculation history.
//!
//! The history log is mirrored to a pluggable [`KeyValueStore`] under a
//! single named slot. Two backends ship with the crate:
//!
//! - [`MemoryStore`]: in-memory, for tests and ephemeral sessions
//! - [`FileStore`]: one JSON file per slot, written atomically
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Slot missing | Empty log |
//! | Slot unreadable or malformed | Empty log, warning logged |
//! | Write fails | In-memory log updated, error returned |
//! | Key outside `[A-Za-z0-9_-]` | Rejected when the calculator is built |

mod error;
mod file;
mod history;
mod memory;

pub use error::{EntryViolation, HistoryLoadError, StoreError, StoreResult};
pub use file::FileStore;
pub use history::{parse_persisted, HistoryStore, DEFAULT_STORAGE_KEY};
pub use memory::MemoryStore;

/// Whether `key` can name a slot in every shipped backend.
///
/// Keys are non-empty runs of ASCII letters, digits, `_` and `-`, which
/// keeps them safe to use as file names.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Backend holding string values under string keys.
///
/// Access is single-threaded; mutation takes `&mut self`.
pub trait KeyValueStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Read a slot; `Ok(None)` when it has never been written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace a slot's value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a slot. Deleting a missing slot is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
