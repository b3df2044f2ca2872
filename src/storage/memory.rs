//! In-memory key-value store for tests and ephemeral use.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{KeyValueStore, StorageError};

/// A store that keeps documents in a mutex-guarded map.
///
/// Drops all state with the process; used as the injectable stand-in for
/// [`super::FileStore`] in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key with a raw document (test setup helper)
    pub fn seed(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());

        store.put("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), "v");
    }

    #[test]
    fn test_seed_prepopulates() {
        let store = MemoryStore::new();
        store.seed("k", "doc");
        assert_eq!(store.get("k").unwrap().unwrap(), "doc");
    }
}
