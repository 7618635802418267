//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered user.
///
/// `follower_count` and `following_count` are denormalized from the follow
/// edge table and are only ever mutated inside the follow/unfollow
/// transaction that creates or deletes the corresponding edge.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Free-form profile bio.
    pub bio: Option<String>,
    /// User role.
    pub role: UserRole,
    /// Number of users following this user (denormalized).
    pub follower_count: i32,
    /// Number of users this user follows (denormalized).
    pub following_count: i32,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Project the public profile fields.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar_url: self.avatar_url.clone(),
            bio: self.bio.clone(),
            follower_count: self.follower_count,
            following_count: self.following_count,
        }
    }
}

/// The public projection of a user, as returned by suggestion and
/// follower/following listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Free-form profile bio.
    pub bio: Option<String>,
    /// Number of users following this user.
    pub follower_count: i32,
    /// Number of users this user follows.
    pub following_count: i32,
}
