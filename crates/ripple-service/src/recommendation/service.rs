//! Suggested-users cascade: interest affinity, then social proximity,
//! then global popularity.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use ripple_cache::keys;
use ripple_core::config::recommendation::RecommendationConfig;
use ripple_core::result::AppResult;
use ripple_core::traits::cache::CacheProvider;
use ripple_database::store::{EngagementStore, FollowStore, UserStore};
use ripple_entity::post::PostCategory;
use ripple_entity::user::UserProfile;

/// Upper bound on the suggestion list length.
pub const MAX_SUGGESTIONS: usize = 50;

/// Produces ranked "users to follow" suggestions for a viewer.
///
/// Each cascade stage only runs if the previous stages under-filled the
/// result, and every stage excludes the viewer, everyone the viewer
/// already follows, and everyone already collected.
#[derive(Clone)]
pub struct RecommendationService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Follow edge store.
    follows: Arc<dyn FollowStore>,
    /// Like/save edge store.
    engagements: Arc<dyn EngagementStore>,
    /// Cache for computed suggestion lists.
    cache: Arc<dyn CacheProvider>,
    /// Cascade settings.
    config: RecommendationConfig,
}

impl RecommendationService {
    /// Creates a new recommendation service.
    pub fn new(
        users: Arc<dyn UserStore>,
        follows: Arc<dyn FollowStore>,
        engagements: Arc<dyn EngagementStore>,
        cache: Arc<dyn CacheProvider>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            users,
            follows,
            engagements,
            cache,
            config,
        }
    }

    /// Suggest up to `limit` users for the viewer to follow.
    pub async fn suggest(&self, viewer_id: Uuid, limit: usize) -> AppResult<Vec<UserProfile>> {
        let limit = limit.clamp(1, MAX_SUGGESTIONS);
        let key = keys::suggestions(viewer_id, limit);

        match self.cache.get(&key).await {
            Ok(Some(cached)) => {
                if let Ok(profiles) = serde_json::from_str::<Vec<UserProfile>>(&cached) {
                    debug!(%viewer_id, limit, "Suggestion cache hit");
                    return Ok(profiles);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Suggestion cache read failed"),
        }

        let following = self.follows.following_ids(viewer_id).await?;

        // Exclusion set grows as candidates are collected so later
        // stages never resurface an earlier pick.
        let mut exclude: Vec<Uuid> = Vec::with_capacity(following.len() + 1 + limit);
        exclude.push(viewer_id);
        exclude.extend(following.iter().copied());

        let mut collected: Vec<UserProfile> = Vec::with_capacity(limit);

        self.interest_affinity(viewer_id, limit, &mut exclude, &mut collected)
            .await?;

        if collected.len() < limit {
            self.social_proximity(&following, limit, &mut exclude, &mut collected)
                .await?;
        }

        if collected.len() < limit {
            let remaining = (limit - collected.len()) as i64;
            let popular = self.users.most_followed(&exclude, remaining).await?;
            collected.extend(popular);
        }

        collected.truncate(limit);

        debug!(%viewer_id, suggested = collected.len(), "Suggestions computed");

        let ttl = Duration::from_secs(self.config.suggestion_ttl_seconds);
        match serde_json::to_string(&collected) {
            Ok(json) => {
                if let Err(e) = self.cache.set_with_ttl(&key, &json, ttl).await {
                    warn!(error = %e, "Suggestion cache write failed");
                }
            }
            Err(e) => warn!(error = %e, "Suggestion serialization failed"),
        }

        Ok(collected)
    }

    /// Stage 1: users who post in the categories the viewer has been
    /// liking recently, ranked by follower count.
    async fn interest_affinity(
        &self,
        viewer_id: Uuid,
        limit: usize,
        exclude: &mut Vec<Uuid>,
        collected: &mut Vec<UserProfile>,
    ) -> AppResult<()> {
        let recent = self
            .engagements
            .recent_liked_categories(viewer_id, self.config.recent_like_scan)
            .await?;
        let top = top_categories(&recent, self.config.top_categories);
        if top.is_empty() {
            return Ok(());
        }

        let matches = self
            .users
            .profiles_by_categories(&top, exclude, limit as i64)
            .await?;
        for profile in matches {
            exclude.push(profile.id);
            collected.push(profile);
        }
        Ok(())
    }

    /// Stage 2: distinct users followed by the people the viewer
    /// follows, truncated to the remaining slots.
    async fn social_proximity(
        &self,
        following: &[Uuid],
        limit: usize,
        exclude: &mut Vec<Uuid>,
        collected: &mut Vec<UserProfile>,
    ) -> AppResult<()> {
        if following.is_empty() {
            return Ok(());
        }

        let remaining = (limit - collected.len()) as i64;
        let candidate_ids = self
            .follows
            .second_degree_ids(following, exclude, remaining)
            .await?;
        if candidate_ids.is_empty() {
            return Ok(());
        }

        let profiles = self.users.profiles_by_ids(&candidate_ids).await?;
        let mut by_id: HashMap<Uuid, UserProfile> =
            profiles.into_iter().map(|p| (p.id, p)).collect();
        for id in candidate_ids {
            if let Some(profile) = by_id.remove(&id) {
                exclude.push(id);
                collected.push(profile);
            }
        }
        Ok(())
    }
}

/// Tally categories and return the most frequent `take`, ties broken by
/// the order a category was first encountered in the scan.
fn top_categories(recent: &[PostCategory], take: usize) -> Vec<PostCategory> {
    let mut counts: HashMap<PostCategory, usize> = HashMap::new();
    let mut ranked: Vec<PostCategory> = Vec::new();
    for &category in recent {
        if !counts.contains_key(&category) {
            ranked.push(category);
        }
        *counts.entry(category).or_insert(0) += 1;
    }
    // Stable sort keeps first-encounter order for equal counts.
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
    ranked.truncate(take);
    ranked
}
