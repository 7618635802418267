//! Personalized feed assembly.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use ripple_core::config::feed::FeedConfig;
use ripple_core::error::AppError;
use ripple_core::result::AppResult;
use ripple_core::types::pagination::{PageRequest, PageResponse};
use ripple_database::store::{FollowStore, PostStore};
use ripple_entity::post::FeedPost;

use super::hydrate::Hydrator;

/// Share of every feed page allocated to followed-author content; the
/// remainder comes from the globally popular pool.
const FOLLOWED_SHARE: f64 = 0.7;

/// Assembles the personalized feed: a 70/30 blend of posts from
/// followed accounts and globally popular recent posts, deduplicated
/// and hydrated with the viewer's engagement state.
#[derive(Clone)]
pub struct FeedService {
    /// Post store.
    posts: Arc<dyn PostStore>,
    /// Follow edge store.
    follows: Arc<dyn FollowStore>,
    /// Engagement hydrator.
    hydrator: Hydrator,
    /// Feed settings.
    config: FeedConfig,
}

impl FeedService {
    /// Creates a new feed service.
    pub fn new(
        posts: Arc<dyn PostStore>,
        follows: Arc<dyn FollowStore>,
        hydrator: Hydrator,
        config: FeedConfig,
    ) -> Self {
        Self {
            posts,
            follows,
            hydrator,
            config,
        }
    }

    /// Assemble one page of the viewer's feed.
    ///
    /// When the viewer follows nobody the followed portion is empty and
    /// the page comes up short — the popular portion is deliberately
    /// not expanded to fill the gap. `total_items` counts all public
    /// posts and is advisory, not an exact union size.
    pub async fn feed(
        &self,
        viewer_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FeedPost>> {
        let following = self.follows.following_ids(viewer_id).await?;

        let (followed_quota, popular_quota) = blend_quotas(page.page_size);
        let (followed_skip, popular_skip) = scaled_skips(page.offset());

        let followed_posts = if following.is_empty() {
            Vec::new()
        } else {
            self.posts
                .public_by_authors(&following, followed_quota as i64, followed_skip as i64)
                .await?
        };

        // The popular scan excludes what the followed scan already
        // selected, so it has to wait for it; the advisory total has no
        // such dependency and runs concurrently.
        let selected: Vec<Uuid> = followed_posts.iter().map(|p| p.id).collect();
        let since = Utc::now() - Duration::days(self.config.popular_window_days);
        let (popular_posts, total) = tokio::try_join!(
            self.posts
                .popular_since(since, &selected, popular_quota as i64, popular_skip as i64),
            self.posts.count_public(),
        )?;

        debug!(
            %viewer_id,
            followed = followed_posts.len(),
            popular = popular_posts.len(),
            "Feed page assembled"
        );

        let mut posts = followed_posts;
        posts.extend(popular_posts);

        let items = self.hydrator.hydrate(Some(viewer_id), posts).await?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    /// Fetch a single public post, hydrated for the viewer.
    pub async fn post(&self, viewer: Option<Uuid>, post_id: Uuid) -> AppResult<FeedPost> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        if !post.is_public {
            return Err(AppError::authorization("Post is not public"));
        }

        let mut hydrated = self.hydrator.hydrate(viewer, vec![post]).await?;
        hydrated
            .pop()
            .ok_or_else(|| AppError::internal("Hydration dropped the post"))
    }

    /// List an author's public posts, newest first, hydrated for the
    /// viewer.
    pub async fn posts_by_author(
        &self,
        viewer: Option<Uuid>,
        author_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<FeedPost>> {
        let (posts, total) = tokio::try_join!(
            self.posts
                .public_by_author(author_id, page.limit() as i64, page.offset() as i64),
            self.posts.count_public_by_author(author_id),
        )?;

        let items = self.hydrator.hydrate(viewer, posts).await?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}

/// Split a page into its followed/popular sub-quotas.
fn blend_quotas(page_size: u64) -> (u64, u64) {
    let followed = (page_size as f64 * FOLLOWED_SHARE).ceil() as u64;
    (followed, page_size - followed)
}

/// Scale a cumulative skip count into per-source offsets so both
/// sources progress at a stable relative rate without server-side
/// cursor state.
fn scaled_skips(skip: u64) -> (u64, u64) {
    let followed = (skip as f64 * FOLLOWED_SHARE).floor() as u64;
    let popular = (skip as f64 * (1.0 - FOLLOWED_SHARE)).floor() as u64;
    (followed, popular)
}
