//! Notification configuration.

use serde::{Deserialize, Serialize};

/// Settings for notification creation and deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Rolling window (in hours) within which an identical
    /// (recipient, actor, kind, post, comment) notification is suppressed.
    #[serde(default = "default_dedup_window_hours")]
    pub dedup_window_hours: i64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dedup_window_hours: default_dedup_window_hours(),
        }
    }
}

fn default_dedup_window_hours() -> i64 {
    24
}
