//! Engagement write paths.
//!
//! Every path validates first, then runs the edge+counter transaction,
//! then emits the notification. The notification is secondary: its
//! failure is logged and swallowed so it can never roll back or mask a
//! committed engagement.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use ripple_cache::keys;
use ripple_core::error::AppError;
use ripple_core::result::AppResult;
use ripple_core::traits::cache::CacheProvider;
use ripple_core::types::pagination::{PageRequest, PageResponse};
use ripple_database::store::{
    CommentStore, EngagementStore, FollowStore, PostStore, UserStore,
};
use ripple_entity::engagement::{Comment, FollowCounts};
use ripple_entity::notification::NotificationKind;
use ripple_entity::user::UserProfile;

use crate::notification::NotificationService;

/// Handles the engagement write paths and the follower/following
/// listings.
#[derive(Clone)]
pub struct SocialService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Post store.
    posts: Arc<dyn PostStore>,
    /// Follow edge store.
    follows: Arc<dyn FollowStore>,
    /// Like/save edge store.
    engagements: Arc<dyn EngagementStore>,
    /// Comment store.
    comments: Arc<dyn CommentStore>,
    /// Notification delivery.
    notifications: NotificationService,
    /// Cache, for suggestion invalidation on follow changes.
    cache: Arc<dyn CacheProvider>,
}

impl SocialService {
    /// Creates a new social service.
    pub fn new(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        follows: Arc<dyn FollowStore>,
        engagements: Arc<dyn EngagementStore>,
        comments: Arc<dyn CommentStore>,
        notifications: NotificationService,
        cache: Arc<dyn CacheProvider>,
    ) -> Self {
        Self {
            users,
            posts,
            follows,
            engagements,
            comments,
            notifications,
            cache,
        }
    }

    /// Follow a user. Returns the updated counter pair.
    pub async fn follow(&self, viewer_id: Uuid, target_id: Uuid) -> AppResult<FollowCounts> {
        if viewer_id == target_id {
            return Err(AppError::validation("Cannot follow yourself"));
        }

        self.users
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if self.follows.exists(viewer_id, target_id).await? {
            return Err(AppError::conflict("Already following this user"));
        }

        let counts = self.follows.create(viewer_id, target_id).await?;

        self.notify(target_id, viewer_id, NotificationKind::Follow, None, None)
            .await;
        self.invalidate_suggestions(viewer_id).await;

        info!(%viewer_id, %target_id, "User followed");
        Ok(counts)
    }

    /// Unfollow a user. Returns the updated counter pair.
    pub async fn unfollow(&self, viewer_id: Uuid, target_id: Uuid) -> AppResult<FollowCounts> {
        if !self.follows.exists(viewer_id, target_id).await? {
            return Err(AppError::conflict("Not following this user"));
        }

        let counts = self.follows.delete(viewer_id, target_id).await?;
        self.invalidate_suggestions(viewer_id).await;

        info!(%viewer_id, %target_id, "User unfollowed");
        Ok(counts)
    }

    /// Like a post. Returns the updated like count.
    pub async fn like(&self, viewer_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        if self.engagements.like_exists(viewer_id, post_id).await? {
            return Err(AppError::conflict("Already liked this post"));
        }

        let count = self.engagements.create_like(viewer_id, post_id).await?;

        self.notify(
            post.author_id,
            viewer_id,
            NotificationKind::Like,
            Some(post_id),
            None,
        )
        .await;

        Ok(count)
    }

    /// Remove a like. Returns the updated like count.
    pub async fn unlike(&self, viewer_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        if !self.engagements.like_exists(viewer_id, post_id).await? {
            return Err(AppError::conflict("Not liked this post"));
        }
        self.engagements.delete_like(viewer_id, post_id).await
    }

    /// Save a post. Returns the updated save count.
    pub async fn save(&self, viewer_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        if self.engagements.save_exists(viewer_id, post_id).await? {
            return Err(AppError::conflict("Already saved this post"));
        }

        // Saves are private bookmarks; no notification is emitted.
        self.engagements.create_save(viewer_id, post_id).await
    }

    /// Remove a save. Returns the updated save count.
    pub async fn unsave(&self, viewer_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        if !self.engagements.save_exists(viewer_id, post_id).await? {
            return Err(AppError::conflict("Not saved this post"));
        }
        self.engagements.delete_save(viewer_id, post_id).await
    }

    /// Comment on a post. Returns the comment and the updated comment
    /// count.
    pub async fn comment(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> AppResult<(Comment, i32)> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("Comment cannot be empty"));
        }

        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        let (comment, count) = self.comments.create(post_id, viewer_id, content).await?;

        self.notify(
            post.author_id,
            viewer_id,
            NotificationKind::Comment,
            Some(post_id),
            Some(comment.id),
        )
        .await;

        Ok((comment, count))
    }

    /// Delete one's own comment. Returns the updated comment count.
    pub async fn delete_comment(&self, viewer_id: Uuid, comment_id: Uuid) -> AppResult<i32> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment not found"))?;

        if comment.user_id != viewer_id {
            return Err(AppError::authorization(
                "Not authorized to delete this comment",
            ));
        }

        self.comments.delete(comment_id).await
    }

    /// List a user's followers, newest edge first.
    pub async fn followers(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<UserProfile>> {
        let (items, total) = tokio::try_join!(
            self.follows
                .followers_of(user_id, page.limit() as i64, page.offset() as i64),
            self.follows.count_followers(user_id),
        )?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// List the users a user follows, newest edge first.
    pub async fn following(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<UserProfile>> {
        let (items, total) = tokio::try_join!(
            self.follows
                .following_of(user_id, page.limit() as i64, page.offset() as i64),
            self.follows.count_following(user_id),
        )?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// Emit a notification for a committed engagement. Failures are
    /// logged, never propagated — the primary mutation already
    /// succeeded.
    async fn notify(
        &self,
        recipient_id: Uuid,
        actor_id: Uuid,
        kind: NotificationKind,
        post_id: Option<Uuid>,
        comment_id: Option<Uuid>,
    ) {
        if let Err(e) = self
            .notifications
            .notify(recipient_id, actor_id, kind, post_id, comment_id)
            .await
        {
            warn!(
                error = %e,
                %recipient_id,
                %actor_id,
                kind = %kind,
                "Failed to deliver notification"
            );
        }
    }

    /// Drop the viewer's cached suggestion lists after a follow change.
    async fn invalidate_suggestions(&self, viewer_id: Uuid) {
        if let Err(e) = self
            .cache
            .delete_prefix(&keys::suggestions_prefix(viewer_id))
            .await
        {
            warn!(error = %e, %viewer_id, "Failed to invalidate suggestion cache");
        }
    }
}
