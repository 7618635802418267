//! Store trait seams between the services and the persistent store.
//!
//! The services depend only on these traits; the repositories in this
//! crate implement them against PostgreSQL, and the service test suite
//! implements them in memory. Methods that mutate a denormalized counter
//! are specified to do so in the same transaction as the edge mutation —
//! the counter and the edge must never diverge.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use ripple_core::result::AppResult;
use ripple_entity::engagement::{Comment, FollowCounts};
use ripple_entity::notification::{Notification, NotificationKind};
use ripple_entity::post::{Post, PostCategory};
use ripple_entity::user::{User, UserProfile};

/// User lookups and ranked profile scans.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Fetch the public profiles for a batch of user IDs. Order is
    /// unspecified.
    async fn profiles_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<UserProfile>>;

    /// Users who have authored public posts in any of the given
    /// categories, excluding `exclude`, ordered by follower count
    /// descending.
    async fn profiles_by_categories(
        &self,
        categories: &[PostCategory],
        exclude: &[Uuid],
        limit: i64,
    ) -> AppResult<Vec<UserProfile>>;

    /// The most-followed users not in `exclude`, ordered by follower
    /// count descending.
    async fn most_followed(&self, exclude: &[Uuid], limit: i64) -> AppResult<Vec<UserProfile>>;
}

/// Post lookups and the two feed source scans.
#[async_trait]
pub trait PostStore: Send + Sync + 'static {
    /// Find a post by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>>;

    /// Public posts authored by any of the given users, newest first.
    async fn public_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>>;

    /// Public posts created at or after `since`, excluding the given
    /// IDs, ordered by like count desc, save count desc, then recency.
    async fn popular_since(
        &self,
        since: DateTime<Utc>,
        exclude: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>>;

    /// Public posts by a single author, newest first.
    async fn public_by_author(
        &self,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>>;

    /// Count of all public posts.
    async fn count_public(&self) -> AppResult<u64>;

    /// Count of public posts by a single author.
    async fn count_public_by_author(&self, author_id: Uuid) -> AppResult<u64>;
}

/// Follow edge queries and the transactional follow/unfollow mutations.
#[async_trait]
pub trait FollowStore: Send + Sync + 'static {
    /// IDs of all users the given user follows.
    async fn following_ids(&self, follower_id: Uuid) -> AppResult<Vec<Uuid>>;

    /// Whether a follow edge exists.
    async fn exists(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool>;

    /// Insert the edge and adjust both endpoints' counters in one
    /// transaction. Returns the updated counter values.
    async fn create(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<FollowCounts>;

    /// Delete the edge and adjust both endpoints' counters in one
    /// transaction. Returns the updated counter values.
    async fn delete(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<FollowCounts>;

    /// Distinct users followed by any of `follower_ids`, excluding
    /// `exclude`.
    async fn second_degree_ids(
        &self,
        follower_ids: &[Uuid],
        exclude: &[Uuid],
        limit: i64,
    ) -> AppResult<Vec<Uuid>>;

    /// Profiles of the user's followers, newest edge first.
    async fn followers_of(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserProfile>>;

    /// Profiles of the users this user follows, newest edge first.
    async fn following_of(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserProfile>>;

    /// Count of follow edges pointing at the user.
    async fn count_followers(&self, user_id: Uuid) -> AppResult<u64>;

    /// Count of follow edges originating from the user.
    async fn count_following(&self, user_id: Uuid) -> AppResult<u64>;
}

/// Like and save edges: batched membership lookups and the transactional
/// counter-bearing mutations.
#[async_trait]
pub trait EngagementStore: Send + Sync + 'static {
    /// Which of the given posts the user has liked. One query for the
    /// whole batch.
    async fn liked_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> AppResult<HashSet<Uuid>>;

    /// Which of the given posts the user has saved. One query for the
    /// whole batch.
    async fn saved_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> AppResult<HashSet<Uuid>>;

    /// Whether a like edge exists.
    async fn like_exists(&self, user_id: Uuid, post_id: Uuid) -> AppResult<bool>;

    /// Whether a save edge exists.
    async fn save_exists(&self, user_id: Uuid, post_id: Uuid) -> AppResult<bool>;

    /// Insert the like edge and increment the post's like counter in one
    /// transaction. Returns the updated count.
    async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32>;

    /// Delete the like edge and decrement the counter in one
    /// transaction. Returns the updated count.
    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32>;

    /// Insert the save edge and increment the post's save counter in one
    /// transaction. Returns the updated count.
    async fn create_save(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32>;

    /// Delete the save edge and decrement the counter in one
    /// transaction. Returns the updated count.
    async fn delete_save(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32>;

    /// Categories of the user's most recently liked posts, newest like
    /// first, bounded by `limit`.
    async fn recent_liked_categories(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PostCategory>>;
}

/// Comment storage: only the counter-bearing write path.
#[async_trait]
pub trait CommentStore: Send + Sync + 'static {
    /// Find a comment by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>>;

    /// Insert the comment and increment the post's comment counter in
    /// one transaction. Returns the comment and the updated count.
    async fn create(&self, post_id: Uuid, user_id: Uuid, content: &str)
    -> AppResult<(Comment, i32)>;

    /// Delete the comment and decrement the counter in one transaction.
    /// Returns the updated count.
    async fn delete(&self, comment_id: Uuid) -> AppResult<i32>;
}

/// Notification persistence.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// The most recent notification matching the exact tuple created at
    /// or after `since`, if any.
    async fn find_duplicate(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        kind: NotificationKind,
        post_id: Option<Uuid>,
        comment_id: Option<Uuid>,
        since: DateTime<Utc>,
    ) -> AppResult<Option<Notification>>;

    /// Insert a notification row.
    async fn insert(&self, notification: &Notification) -> AppResult<Notification>;

    /// Find a notification by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>>;

    /// Notifications for a recipient, newest first.
    async fn find_by_recipient(
        &self,
        recipient_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Notification>>;

    /// Total notifications for a recipient.
    async fn count_by_recipient(&self, recipient_id: Uuid) -> AppResult<u64>;

    /// Unread notifications for a recipient.
    async fn count_unread(&self, recipient_id: Uuid) -> AppResult<u64>;

    /// Mark one notification read.
    async fn mark_read(&self, id: Uuid) -> AppResult<()>;

    /// Mark all of a recipient's notifications read. Returns the number
    /// updated.
    async fn mark_all_read(&self, recipient_id: Uuid) -> AppResult<u64>;

    /// Delete a notification row.
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}
