//! Catalog video records.
//!
//! Records are created once from the bundled catalog source and never
//! mutated or deleted at runtime.

use serde::{Deserialize, Serialize};

/// Video identifier as it appears in the catalog source
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Create a video ID from its string form
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VideoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for VideoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The closed category set of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Dog videos
    Dogs,

    /// Cat videos
    Cats,

    /// Bird videos
    Birds,

    /// Hamster videos
    Hamsters,

    /// Rabbit videos
    Rabbits,
}

impl Category {
    /// All categories, in sidebar order
    pub const ALL: [Category; 5] = [
        Category::Dogs,
        Category::Cats,
        Category::Birds,
        Category::Hamsters,
        Category::Rabbits,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Dogs => write!(f, "dogs"),
            Category::Cats => write!(f, "cats"),
            Category::Birds => write!(f, "birds"),
            Category::Hamsters => write!(f, "hamsters"),
            Category::Rabbits => write!(f, "rabbits"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dogs" | "dog" => Ok(Category::Dogs),
            "cats" | "cat" => Ok(Category::Cats),
            "birds" | "bird" => Ok(Category::Birds),
            "hamsters" | "hamster" => Ok(Category::Hamsters),
            "rabbits" | "rabbit" => Ok(Category::Rabbits),
            _ => anyhow::bail!("Unknown category: {}", s),
        }
    }
}

/// A category filter: a single category, or the `all` pseudo-category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Match every record
    All,

    /// Match records with exactly this category
    Only(Category),
}

impl CategoryFilter {
    /// Check whether a record's category passes the filter
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    /// Every filter value, `all` first (sidebar order)
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(c) => write!(f, "{}", c),
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// A single immutable entry in the video catalog.
///
/// Field names follow the catalog source's camelCase JSON. The `views`,
/// `upload_time` and `duration` fields are human-readable display strings
/// straight from the source; tracked view counts live in the view ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    /// Unique identifier within the catalog
    pub id: VideoId,

    /// Human-readable title
    pub title: String,

    /// Short description
    pub description: String,

    /// Thumbnail reference (path or URL)
    pub thumbnail: String,

    /// Channel name
    pub channel: String,

    /// Display view-count string (e.g. "2.1M views")
    pub views: String,

    /// Display upload-time string (e.g. "3 weeks ago")
    pub upload_time: String,

    /// Display duration string (e.g. "4:12")
    pub duration: String,

    /// Category this record belongs to
    pub category: Category,

    /// Whether the record appears on the featured shelf
    pub featured: bool,

    /// Direct download reference, if the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl VideoRecord {
    /// The download link for this record.
    ///
    /// Falls back to the conventional `/videos/<id>.mp4` location when the
    /// catalog source carries no explicit URL.
    pub fn download_link(&self) -> String {
        self.download_url
            .clone()
            .unwrap_or_else(|| format!("https://example.com/videos/{}.mp4", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("cats".parse::<Category>().unwrap(), Category::Cats);
        assert_eq!("Dog".parse::<Category>().unwrap(), Category::Dogs);
        assert!("fish".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "rabbits".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Rabbits)
        );
        assert!("everything".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_video_record_wire_names() {
        let json = r#"{
            "id": "42",
            "title": "Test",
            "description": "A test record",
            "thumbnail": "/t.jpg",
            "channel": "Testers",
            "views": "1K views",
            "uploadTime": "1 day ago",
            "duration": "0:30",
            "category": "birds",
            "featured": false
        }"#;

        let record: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, VideoId::new("42"));
        assert_eq!(record.upload_time, "1 day ago");
        assert_eq!(record.category, Category::Birds);
        assert!(record.download_url.is_none());

        // camelCase names survive the round trip
        let out = serde_json::to_string(&record).unwrap();
        assert!(out.contains("\"uploadTime\""));
        assert!(!out.contains("\"downloadUrl\""));
    }

    #[test]
    fn test_download_link_fallback() {
        let json = r#"{
            "id": "7",
            "title": "T",
            "description": "D",
            "thumbnail": "/t.jpg",
            "channel": "C",
            "views": "1 view",
            "uploadTime": "now",
            "duration": "1:00",
            "category": "cats",
            "featured": true
        }"#;

        let mut record: VideoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.download_link(), "https://example.com/videos/7.mp4");

        record.download_url = Some("https://cdn.example.com/7.mp4".to_string());
        assert_eq!(record.download_link(), "https://cdn.example.com/7.mp4");
    }
}
