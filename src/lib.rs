//! petflix - Local-first pet video catalog
//!
//! A small catalog browser core: an immutable video catalog bundled with the
//! binary, a persisted favorites set, a persisted per-video view-statistics
//! ledger, and query helpers that join the two.
//!
//! # Architecture
//!
//! - All catalog data is immutable and loaded once (bundled JSON, or an
//!   override file from the config)
//! - Favorites and view statistics live in single JSON documents behind a
//!   key-value store abstraction, rewritten whole on every mutation
//! - Ledger mutations are fail-open: storage failures are absorbed and
//!   reported through a [`ledger::Persistence`] value, never an error
//!
//! # Modules
//!
//! - `domain`: Data structures (VideoRecord, Category, ViewStats)
//! - `catalog`: The immutable catalog and its query operations
//! - `storage`: Key-value persistence (file-backed and in-memory)
//! - `ledger`: Favorites and view-statistics ledgers
//! - `query`: Read-only joins of catalog and view data
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! petflix videos --category cats
//!
//! # Record a view and show the video
//! petflix watch 3
//!
//! # View statistics
//! petflix stats
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ledger;
pub mod query;
pub mod storage;

// Re-export main types at crate root for convenience
pub use catalog::Catalog;
pub use domain::{Category, CategoryFilter, RankedVideo, VideoId, VideoRecord, ViewStats};
pub use ledger::{FavoritesLedger, Persistence, ViewLedger};
pub use query::{most_viewed, summary, ViewSummary};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
