//! File-backed key-value store.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Stores each key as a `<key>.json` document in one directory.
///
/// Writes go through a whole-file replace with no locking; if a
/// multi-process deployment ever needs concurrent writers, an
/// optimistic-concurrency check on the document is the extension point.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::Read {
                key: key.to_string(),
                source,
            })
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write = |err| StorageError::Write {
            key: key.to_string(),
            source: err,
        };

        std::fs::create_dir_all(&self.dir).map_err(write)?;

        let path = self.path_for(key);
        std::fs::write(&path, value).map_err(write)?;

        debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        assert!(store.get("petflix-favorites").unwrap().is_none());
    }

    #[test]
    fn test_put_then_get_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        store.put("petflix-favorites", r#"["1","2"]"#).unwrap();
        let raw = store.get("petflix-favorites").unwrap().unwrap();
        assert_eq!(raw, r#"["1","2"]"#);

        // Documents land as <key>.json
        assert!(temp.path().join("petflix-favorites.json").exists());
    }

    #[test]
    fn test_put_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("profile"));

        store.put("petflix-view-stats", "{}").unwrap();
        assert_eq!(store.get("petflix-view-stats").unwrap().unwrap(), "{}");
    }

    #[test]
    fn test_put_replaces_whole_document() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path());

        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), "second");
    }
}
