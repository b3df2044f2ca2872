//! Read-only joins of catalog and view data.
//!
//! The only place both the catalog and the view ledger meet. Everything
//! here is pure with respect to its sources: no persisted state, no writes.

use crate::catalog::Catalog;
use crate::domain::RankedVideo;
use crate::ledger::ViewLedger;
use crate::storage::KeyValueStore;

/// Headline counters for the statistics page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSummary {
    /// Sum of every recorded view
    pub total_views: u64,

    /// Number of distinct videos with at least one view
    pub videos_watched: usize,
}

/// The catalog ranked by tracked view count, most viewed first.
///
/// Every catalog record is joined with its view stats (count 0, no
/// last-viewed instant when unseen), sorted descending by count with ties
/// keeping catalog order, and truncated to `limit`. A `limit` of 0 yields
/// nothing; a `limit` beyond the catalog yields the whole catalog.
pub fn most_viewed<S: KeyValueStore>(
    catalog: &Catalog,
    views: &ViewLedger<S>,
    limit: usize,
) -> Vec<RankedVideo> {
    let stats = views.snapshot();

    let mut ranked: Vec<RankedVideo> = catalog
        .list()
        .iter()
        .map(|video| {
            let entry = stats.get(&video.id);
            RankedVideo {
                video: video.clone(),
                view_count: entry.map(|s| s.view_count).unwrap_or(0),
                last_viewed: entry.map(|s| s.last_viewed),
            }
        })
        .collect();

    // Stable sort keeps catalog order between equal counts
    ranked.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    ranked.truncate(limit);

    ranked
}

/// Headline counters over the whole view ledger.
pub fn summary<S: KeyValueStore>(views: &ViewLedger<S>) -> ViewSummary {
    let stats = views.snapshot();

    ViewSummary {
        total_views: stats.values().map(|s| s.view_count).sum(),
        videos_watched: stats.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VideoId;
    use crate::storage::MemoryStore;

    fn fixture() -> Catalog {
        let videos: Vec<String> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| {
                format!(
                    r#"{{
                        "id": "{id}",
                        "title": "Video {id}",
                        "description": "",
                        "thumbnail": "/{id}.jpg",
                        "channel": "Fixture",
                        "views": "0 views",
                        "uploadTime": "today",
                        "duration": "1:00",
                        "category": "dogs",
                        "featured": false
                    }}"#
                )
            })
            .collect();

        Catalog::from_json(&format!(r#"{{"videos": [{}]}}"#, videos.join(","))).unwrap()
    }

    fn view_n_times(ledger: &ViewLedger<MemoryStore>, id: &str, n: usize) {
        for _ in 0..n {
            ledger.record_view(&VideoId::new(id));
        }
    }

    #[test]
    fn test_most_viewed_sorts_descending() {
        let catalog = fixture();
        let views = ViewLedger::new(MemoryStore::new());
        view_n_times(&views, "b", 3);
        view_n_times(&views, "d", 5);
        view_n_times(&views, "a", 1);

        let ranked = most_viewed(&catalog, &views, 10);
        let ids: Vec<&str> = ranked.iter().map(|r| r.video.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b", "a", "c"]);

        let counts: Vec<u64> = ranked.iter().map(|r| r.view_count).collect();
        assert_eq!(counts, vec![5, 3, 1, 0]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = fixture();
        let views = ViewLedger::new(MemoryStore::new());
        view_n_times(&views, "c", 2);
        view_n_times(&views, "a", 2);

        let ranked = most_viewed(&catalog, &views, 10);
        let ids: Vec<&str> = ranked.iter().map(|r| r.video.id.as_str()).collect();
        // a before c (catalog order), b before d likewise
        assert_eq!(ids, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_limit_truncates() {
        let catalog = fixture();
        let views = ViewLedger::new(MemoryStore::new());
        view_n_times(&views, "b", 1);

        assert_eq!(most_viewed(&catalog, &views, 2).len(), 2);
        assert!(most_viewed(&catalog, &views, 0).is_empty());
        assert_eq!(most_viewed(&catalog, &views, 100).len(), catalog.len());
    }

    #[test]
    fn test_unseen_videos_have_no_last_viewed() {
        let catalog = fixture();
        let views = ViewLedger::new(MemoryStore::new());
        view_n_times(&views, "a", 1);

        let ranked = most_viewed(&catalog, &views, 10);
        assert!(ranked[0].last_viewed.is_some());
        assert!(ranked.iter().skip(1).all(|r| r.last_viewed.is_none()));
    }

    #[test]
    fn test_stats_for_ids_outside_the_catalog_are_ignored() {
        let catalog = fixture();
        let views = ViewLedger::new(MemoryStore::new());
        view_n_times(&views, "not-in-catalog", 9);

        let ranked = most_viewed(&catalog, &views, 10);
        assert_eq!(ranked.len(), catalog.len());
        assert!(ranked.iter().all(|r| r.view_count == 0));
    }

    #[test]
    fn test_summary_counts() {
        let views = ViewLedger::new(MemoryStore::new());
        assert_eq!(
            summary(&views),
            ViewSummary {
                total_views: 0,
                videos_watched: 0
            }
        );

        view_n_times(&views, "a", 3);
        view_n_times(&views, "b", 2);

        assert_eq!(
            summary(&views),
            ViewSummary {
                total_views: 5,
                videos_watched: 2
            }
        );
    }
}
