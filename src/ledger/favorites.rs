//! The favorites ledger.

use tracing::warn;

use crate::domain::VideoId;
use crate::storage::{KeyValueStore, FAVORITES_KEY};

use super::Persistence;

/// A persisted set of favorited video ids.
///
/// Stored as a JSON array of id strings under [`FAVORITES_KEY`], in
/// insertion order. Ids are not validated against the catalog; favoriting
/// an unknown id is accepted.
pub struct FavoritesLedger<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> FavoritesLedger<S> {
    /// Create a ledger over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether `id` is in the persisted set.
    ///
    /// An unreadable or corrupt document reads as the empty set.
    pub fn is_favorite(&self, id: &VideoId) -> bool {
        let (favorites, _) = self.read();
        favorites.contains(id)
    }

    /// Every favorited id, insertion order
    pub fn all(&self) -> Vec<VideoId> {
        let (favorites, _) = self.read();
        favorites
    }

    /// Add `id` to the set. Idempotent; a no-op if already present.
    pub fn add(&self, id: &VideoId) -> Persistence {
        let (mut favorites, recovered) = self.read();

        if favorites.contains(id) {
            return outcome(recovered, false);
        }

        favorites.push(id.clone());
        outcome(recovered, !self.write(&favorites))
    }

    /// Remove `id` from the set. Idempotent; a no-op if absent.
    pub fn remove(&self, id: &VideoId) -> Persistence {
        let (favorites, recovered) = self.read();

        let remaining: Vec<VideoId> = favorites.into_iter().filter(|f| f != id).collect();
        outcome(recovered, !self.write(&remaining))
    }

    /// Load the full set. The second value is true when the stored
    /// document had to be discarded.
    fn read(&self) -> (Vec<VideoId>, bool) {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (Vec::new(), false),
            Err(err) => {
                warn!("favorites unreadable, treating as empty: {}", err);
                return (Vec::new(), true);
            }
        };

        match serde_json::from_str(&raw) {
            Ok(favorites) => (favorites, false),
            Err(err) => {
                warn!("favorites document corrupt, treating as empty: {}", err);
                (Vec::new(), true)
            }
        }
    }

    /// Rewrite the full set; returns false when the write was dropped
    fn write(&self, favorites: &[VideoId]) -> bool {
        let raw = match serde_json::to_string(favorites) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("favorites not serializable, dropping write: {}", err);
                return false;
            }
        };

        match self.store.put(FAVORITES_KEY, &raw) {
            Ok(()) => true,
            Err(err) => {
                warn!("favorites write dropped: {}", err);
                false
            }
        }
    }
}

fn outcome(recovered: bool, dropped: bool) -> Persistence {
    if dropped {
        Persistence::WriteDropped
    } else if recovered {
        Persistence::RecoveredEmpty
    } else {
        Persistence::Saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn ledger() -> FavoritesLedger<MemoryStore> {
        FavoritesLedger::new(MemoryStore::new())
    }

    #[test]
    fn test_add_then_is_favorite() {
        let ledger = ledger();
        let id = VideoId::new("1");

        assert!(!ledger.is_favorite(&id));
        assert_eq!(ledger.add(&id), Persistence::Saved);
        assert!(ledger.is_favorite(&id));
    }

    #[test]
    fn test_remove_then_not_favorite() {
        let ledger = ledger();
        let id = VideoId::new("1");

        ledger.add(&id);
        assert_eq!(ledger.remove(&id), Persistence::Saved);
        assert!(!ledger.is_favorite(&id));
    }

    #[test]
    fn test_add_is_idempotent() {
        let ledger = ledger();
        let id = VideoId::new("1");

        ledger.add(&id);
        ledger.add(&id);
        ledger.add(&id);

        assert_eq!(ledger.all(), vec![id]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let ledger = ledger();
        ledger.add(&VideoId::new("1"));

        assert_eq!(ledger.remove(&VideoId::new("2")), Persistence::Saved);
        assert_eq!(ledger.all(), vec![VideoId::new("1")]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let ledger = ledger();
        for id in ["3", "1", "2"] {
            ledger.add(&VideoId::new(id));
        }

        let all = ledger.all();
        let ids: Vec<&str> = all.iter().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_unknown_ids_accepted() {
        // The ledger never consults the catalog
        let ledger = ledger();
        let id = VideoId::new("no-such-video");

        assert_eq!(ledger.add(&id), Persistence::Saved);
        assert!(ledger.is_favorite(&id));
    }

    #[test]
    fn test_corrupt_document_recovers_empty() {
        let store = MemoryStore::new();
        store.seed(FAVORITES_KEY, "not json at all");
        let ledger = FavoritesLedger::new(store);

        assert!(!ledger.is_favorite(&VideoId::new("1")));
        assert_eq!(ledger.add(&VideoId::new("1")), Persistence::RecoveredEmpty);

        // The rewrite replaced the corrupt document
        assert_eq!(ledger.all(), vec![VideoId::new("1")]);
        assert_eq!(ledger.add(&VideoId::new("2")), Persistence::Saved);
    }

    #[test]
    fn test_stored_shape_is_string_array() {
        let store = MemoryStore::new();
        let ledger = FavoritesLedger::new(store);

        ledger.add(&VideoId::new("5"));
        ledger.add(&VideoId::new("8"));

        let raw = ledger.store.get(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"["5","8"]"#);
    }
}
