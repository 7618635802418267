//! Feed assembly configuration.

use serde::{Deserialize, Serialize};

/// Settings for personalized feed assembly.
///
/// The followed/popular blend ratio itself is fixed at 70/30 and not
/// configurable; only the recency window of the popular source is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// How far back (in days) a post may have been created and still
    /// qualify for the popular portion of the feed.
    #[serde(default = "default_popular_window_days")]
    pub popular_window_days: i64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            popular_window_days: default_popular_window_days(),
        }
    }
}

fn default_popular_window_days() -> i64 {
    7
}
