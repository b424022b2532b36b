//! Post representation.

use chrono::{DateTime, Utc};

/// A post yielded by profile enumeration.
///
/// Only the video flag drives sorting; the shortcode identifies the post when
/// it is handed back to the download action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Short identifier used in post URLs.
    pub shortcode: String,

    /// Whether the post is a video.
    pub is_video: bool,

    /// When the post was published.
    pub taken_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(shortcode: impl Into<String>, is_video: bool) -> Self {
        Self {
            shortcode: shortcode.into(),
            is_video,
            taken_at: None,
        }
    }

    /// Human readable label for log lines.
    pub fn label(&self) -> String {
        match self.taken_at {
            Some(ts) => format!("{} ({})", self.shortcode, ts.format("%Y-%m-%d %H:%M:%S")),
            None => self.shortcode.clone(),
        }
    }
}
