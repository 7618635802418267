//! Comment model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A comment on a post.
///
/// Only the counter-bearing write path lives in this core; comment
/// listing and editing are handled elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// The commented post.
    pub post_id: Uuid,
    /// The commenting user.
    pub user_id: Uuid,
    /// Comment text.
    pub content: String,
    /// When the comment was created.
    pub created_at: DateTime<Utc>,
}
