//! Cache key builders for all Ripple cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Prefix applied to all Ripple cache keys.
const PREFIX: &str = "ripple";

/// Cache key for a viewer's suggestion list at a given limit.
pub fn suggestions(viewer_id: Uuid, limit: usize) -> String {
    format!("{PREFIX}:suggest:{viewer_id}:{limit}")
}

/// Prefix invalidating every cached suggestion list for a viewer.
pub fn suggestions_prefix(viewer_id: Uuid) -> String {
    format!("{PREFIX}:suggest:{viewer_id}:")
}
