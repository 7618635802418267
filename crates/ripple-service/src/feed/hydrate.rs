//! Engagement hydration — attaching viewer-specific liked/saved flags
//! onto viewer-agnostic post records.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use ripple_core::error::AppError;
use ripple_core::result::AppResult;
use ripple_database::store::{EngagementStore, UserStore};
use ripple_entity::post::{FeedPost, Post};
use ripple_entity::user::UserProfile;

/// Attaches author summaries and the viewer's engagement state to an
/// ordered list of posts.
///
/// The engagement lookups are the hot contract here: one batched
/// liked-membership query and one batched saved-membership query per
/// call, regardless of list size. A per-post lookup is a regression,
/// not an optimization.
#[derive(Clone)]
pub struct Hydrator {
    /// Like/save edge store.
    engagements: Arc<dyn EngagementStore>,
    /// User store, for author summaries.
    users: Arc<dyn UserStore>,
}

impl Hydrator {
    /// Creates a new hydrator.
    pub fn new(engagements: Arc<dyn EngagementStore>, users: Arc<dyn UserStore>) -> Self {
        Self { engagements, users }
    }

    /// Hydrate `posts`, preserving their order.
    ///
    /// With an anonymous viewer (`None`) the engagement queries are
    /// skipped entirely and both flags stay `false`; author summaries
    /// are still attached.
    pub async fn hydrate(
        &self,
        viewer: Option<Uuid>,
        posts: Vec<Post>,
    ) -> AppResult<Vec<FeedPost>> {
        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let (liked, saved, authors) = match viewer {
            Some(viewer_id) => {
                tokio::try_join!(
                    self.engagements.liked_ids(viewer_id, &post_ids),
                    self.engagements.saved_ids(viewer_id, &post_ids),
                    self.users.profiles_by_ids(&author_ids),
                )?
            }
            None => {
                let authors = self.users.profiles_by_ids(&author_ids).await?;
                (HashSet::new(), HashSet::new(), authors)
            }
        };

        let authors: HashMap<Uuid, UserProfile> =
            authors.into_iter().map(|p| (p.id, p)).collect();

        posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.author_id).cloned().ok_or_else(|| {
                    AppError::internal(format!(
                        "Post {} references missing author {}",
                        post.id, post.author_id
                    ))
                })?;
                Ok(FeedPost {
                    is_liked: liked.contains(&post.id),
                    is_saved: saved.contains(&post.id),
                    author,
                    post,
                })
            })
            .collect()
    }
}
