//! The view-statistics ledger.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::warn;

use crate::domain::{VideoId, ViewStats};
use crate::storage::{KeyValueStore, VIEW_STATS_KEY};

use super::Persistence;

/// A persisted map from video id to [`ViewStats`].
///
/// Stored as a JSON object under [`VIEW_STATS_KEY`]. Records are created on
/// first view and never deleted here. Ids are not validated against the
/// catalog, so stats can exist for ids the catalog no longer carries.
pub struct ViewLedger<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ViewLedger<S> {
    /// Create a ledger over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record one view of `id`, refreshing its last-viewed instant.
    ///
    /// Loads the whole map, bumps the one record, writes the whole map
    /// back. Not transactional; interleaved callers can lose an increment,
    /// which the single-writer model accepts.
    pub fn record_view(&self, id: &VideoId) -> Persistence {
        let (mut stats, recovered) = self.read();

        let now = Utc::now();
        stats
            .entry(id.clone())
            .or_insert_with(|| ViewStats::new(id.clone(), now))
            .record(now);

        let dropped = !self.write(&stats);
        if dropped {
            Persistence::WriteDropped
        } else if recovered {
            Persistence::RecoveredEmpty
        } else {
            Persistence::Saved
        }
    }

    /// The stored view count for `id`, 0 if never viewed
    pub fn count_for(&self, id: &VideoId) -> u64 {
        let (stats, _) = self.read();
        stats.get(id).map(|s| s.view_count).unwrap_or(0)
    }

    /// Every stored record, ordered by video id
    pub fn all_stats(&self) -> Vec<ViewStats> {
        let (stats, _) = self.read();
        stats.into_values().collect()
    }

    /// Sum of all stored counts, 0 when the ledger is empty
    pub fn total_views(&self) -> u64 {
        let (stats, _) = self.read();
        stats.values().map(|s| s.view_count).sum()
    }

    /// The full map, for joins against the catalog
    pub fn snapshot(&self) -> BTreeMap<VideoId, ViewStats> {
        let (stats, _) = self.read();
        stats
    }

    /// Load the full map. The second value is true when the stored
    /// document had to be discarded.
    fn read(&self) -> (BTreeMap<VideoId, ViewStats>, bool) {
        let raw = match self.store.get(VIEW_STATS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (BTreeMap::new(), false),
            Err(err) => {
                warn!("view stats unreadable, treating as empty: {}", err);
                return (BTreeMap::new(), true);
            }
        };

        match serde_json::from_str(&raw) {
            Ok(stats) => (stats, false),
            Err(err) => {
                warn!("view stats document corrupt, treating as empty: {}", err);
                (BTreeMap::new(), true)
            }
        }
    }

    /// Rewrite the full map; returns false when the write was dropped
    fn write(&self, stats: &BTreeMap<VideoId, ViewStats>) -> bool {
        let raw = match serde_json::to_string(stats) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("view stats not serializable, dropping write: {}", err);
                return false;
            }
        };

        match self.store.put(VIEW_STATS_KEY, &raw) {
            Ok(()) => true,
            Err(err) => {
                warn!("view stats write dropped: {}", err);
                false
            }
        }
    }
}
