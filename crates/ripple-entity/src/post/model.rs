//! Post entity model and the hydrated feed projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::PostCategory;
use crate::user::UserProfile;

/// A published post.
///
/// `like_count`, `save_count`, and `comment_count` are denormalized from
/// the corresponding edge tables and are only ever mutated inside the
/// transaction that creates or deletes the edge. Read paths never touch
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique post identifier.
    pub id: Uuid,
    /// The authoring user.
    pub author_id: Uuid,
    /// Post title.
    pub title: String,
    /// Longer description text.
    pub description: Option<String>,
    /// Image URL.
    pub image_url: String,
    /// Content category.
    pub category: PostCategory,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Number of likes (denormalized).
    pub like_count: i32,
    /// Number of saves (denormalized).
    pub save_count: i32,
    /// Number of comments (denormalized).
    pub comment_count: i32,
    /// Whether the post is publicly visible.
    pub is_public: bool,
    /// When the post was created.
    pub created_at: DateTime<Utc>,
    /// When the post was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A post hydrated with its author summary and the viewer's engagement
/// state. This is the shape every read path returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPost {
    /// The underlying post.
    #[serde(flatten)]
    pub post: Post,
    /// Public profile of the post's author.
    pub author: UserProfile,
    /// Whether the viewer has liked this post. Always `false` for
    /// anonymous viewers.
    pub is_liked: bool,
    /// Whether the viewer has saved this post. Always `false` for
    /// anonymous viewers.
    pub is_saved: bool,
}
