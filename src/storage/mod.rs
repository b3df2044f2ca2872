//! Key-value persistence for the ledgers.
//!
//! Each ledger owns one namespaced key and stores its whole state as a
//! single JSON document under that key. Stores are injected into the
//! ledgers, so tests can substitute [`MemoryStore`] for the file-backed
//! default.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.petflix/
//! ├── petflix-favorites.json    # JSON array of video id strings
//! └── petflix-view-stats.json   # JSON object: video id -> view stats
//! ```

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

mod file;
mod memory;

/// Key under which the favorites set is persisted
pub const FAVORITES_KEY: &str = "petflix-favorites";

/// Key under which the view-statistics map is persisted
pub const VIEW_STATS_KEY: &str = "petflix-view-stats";

/// Errors from the underlying store.
///
/// Consumed by the ledgers' fail-open recovery; callers of the ledgers
/// never see these.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The value under a key could not be read
    #[error("failed to read key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The value under a key could not be written
    #[error("failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A namespaced key-value store holding one document per key.
///
/// `get` distinguishes "key absent" (`Ok(None)`) from "key unreadable"
/// (`Err`); the ledgers treat only the latter as a recovery. Writes replace
/// the whole document; there is no partial update and no cross-key
/// transaction. Interleaved read-modify-write cycles can lose updates,
/// which the single-writer model tolerates.
pub trait KeyValueStore: Send + Sync {
    /// Read the document stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the document stored under `key`
    fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).put(key, value)
    }
}
