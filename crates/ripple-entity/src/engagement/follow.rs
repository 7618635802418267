//! Follow edge model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A follow edge between two users.
///
/// The (`follower_id`, `following_id`) pair is unique; the uniqueness
/// constraint on the edge table is the sole guard against duplicate
/// follows. Self-follows are rejected before any mutation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Follow {
    /// Unique edge identifier.
    pub id: Uuid,
    /// The user doing the following.
    pub follower_id: Uuid,
    /// The user being followed.
    pub following_id: Uuid,
    /// When the edge was created.
    pub created_at: DateTime<Utc>,
}

/// The denormalized counter values after a follow/unfollow transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FollowCounts {
    /// The target's updated follower count.
    pub follower_count: i32,
    /// The actor's updated following count.
    pub following_count: i32,
}
