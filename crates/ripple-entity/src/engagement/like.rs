//! Like edge model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A like edge from a user to a post. The (`user_id`, `post_id`) pair
/// is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    /// Unique edge identifier.
    pub id: Uuid,
    /// The liking user.
    pub user_id: Uuid,
    /// The liked post.
    pub post_id: Uuid,
    /// When the edge was created.
    pub created_at: DateTime<Utc>,
}
