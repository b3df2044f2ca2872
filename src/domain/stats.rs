//! View-statistics records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::video::{VideoId, VideoRecord};

/// Per-video view statistics.
///
/// Created on the first view of a video and updated on every subsequent
/// view; never deleted. The persisted form uses camelCase names, matching
/// the view-stats document (`{"videoId": ..., "viewCount": ..., "lastViewed": ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStats {
    /// The video these counters belong to
    pub video_id: VideoId,

    /// Number of recorded views, non-decreasing
    pub view_count: u64,

    /// When the video was last viewed
    pub last_viewed: DateTime<Utc>,
}

impl ViewStats {
    /// A fresh record with zero views, as of `now`
    pub fn new(video_id: VideoId, now: DateTime<Utc>) -> Self {
        Self {
            video_id,
            view_count: 0,
            last_viewed: now,
        }
    }

    /// Record one view at `now`
    pub fn record(&mut self, now: DateTime<Utc>) {
        self.view_count += 1;
        self.last_viewed = now;
    }
}

/// A catalog record joined with its tracked view data.
///
/// `last_viewed` is absent for videos that have never been viewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedVideo {
    /// The catalog record
    pub video: VideoRecord,

    /// Tracked view count (0 when never viewed)
    pub view_count: u64,

    /// Last view instant, if any
    pub last_viewed: Option<DateTime<Utc>>,
}
