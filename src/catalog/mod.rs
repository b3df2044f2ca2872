//! The immutable video catalog.
//!
//! A catalog is loaded once, either from the JSON bundled into the binary
//! or from an override file named in the config, and only queried after
//! that. A missing or malformed source is fatal to the load; every query
//! is infallible.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::fs;

use crate::domain::{CategoryFilter, VideoId, VideoRecord};

/// The catalog document bundled at build time
const BUNDLED: &str = include_str!("../../data/videos.json");

/// Wire shape of a catalog source (`{"videos": [...]}`)
#[derive(Debug, Deserialize)]
struct CatalogDoc {
    videos: Vec<VideoRecord>,
}

/// The full video catalog, in source order.
#[derive(Debug, Clone)]
pub struct Catalog {
    videos: Vec<VideoRecord>,
}

impl Catalog {
    /// Parse a catalog from raw JSON
    pub fn from_json(raw: &str) -> Result<Self> {
        let doc: CatalogDoc = serde_json::from_str(raw).context("Failed to parse catalog JSON")?;
        Ok(Self { videos: doc.videos })
    }

    /// The catalog compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED).context("Bundled catalog is malformed")
    }

    /// Read a catalog from a JSON file on disk
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        Self::from_json(&raw).with_context(|| format!("Malformed catalog: {}", path.display()))
    }

    /// Load the catalog: the configured override file if one is set,
    /// otherwise the bundled data.
    pub async fn load() -> Result<Self> {
        match crate::config::catalog_override()? {
            Some(path) => Self::from_file(&path).await,
            None => Self::bundled(),
        }
    }

    /// The full catalog, source order
    pub fn list(&self) -> &[VideoRecord] {
        &self.videos
    }

    /// Find a record by id
    pub fn get(&self, id: &VideoId) -> Option<&VideoRecord> {
        self.videos.iter().find(|v| &v.id == id)
    }

    /// Records passing the category filter, order preserved.
    ///
    /// [`CategoryFilter::All`] returns the unfiltered catalog.
    pub fn filter_by_category(&self, filter: CategoryFilter) -> Vec<&VideoRecord> {
        self.videos
            .iter()
            .filter(|v| filter.matches(v.category))
            .collect()
    }

    /// Case-insensitive substring search over title, description, and
    /// channel. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&VideoRecord> {
        let query_lower = query.to_lowercase();

        self.videos
            .iter()
            .filter(|v| {
                v.title.to_lowercase().contains(&query_lower)
                    || v.description.to_lowercase().contains(&query_lower)
                    || v.channel.to_lowercase().contains(&query_lower)
            })
            .collect()
    }

    /// Records on the featured shelf, order preserved
    pub fn featured(&self) -> Vec<&VideoRecord> {
        self.videos.iter().filter(|v| v.featured).collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    /// Whether the catalog has no records
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}
