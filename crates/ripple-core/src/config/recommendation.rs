//! Recommendation cascade configuration.

use serde::{Deserialize, Serialize};

/// Settings for the suggested-users cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// How many of the viewer's most recent likes are scanned when
    /// deriving interest-affinity categories.
    #[serde(default = "default_recent_like_scan")]
    pub recent_like_scan: i64,
    /// How many top categories feed the interest-affinity stage.
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
    /// TTL for cached suggestion lists in seconds.
    #[serde(default = "default_suggestion_ttl")]
    pub suggestion_ttl_seconds: u64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            recent_like_scan: default_recent_like_scan(),
            top_categories: default_top_categories(),
            suggestion_ttl_seconds: default_suggestion_ttl(),
        }
    }
}

fn default_recent_like_scan() -> i64 {
    50
}

fn default_top_categories() -> usize {
    3
}

fn default_suggestion_ttl() -> u64 {
    300
}
