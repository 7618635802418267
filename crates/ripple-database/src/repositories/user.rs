//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ripple_core::error::{AppError, ErrorKind};
use ripple_core::result::AppResult;
use ripple_entity::post::PostCategory;
use ripple_entity::user::{User, UserProfile};

use crate::store::UserStore;

/// Columns selected for [`UserProfile`] projections.
const PROFILE_COLUMNS: &str =
    "id, username, display_name, avatar_url, bio, follower_count, following_count";

/// Repository for user lookups and ranked profile scans.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn profiles_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch profiles", e))
    }

    async fn profiles_by_categories(
        &self,
        categories: &[PostCategory],
        exclude: &[Uuid],
        limit: i64,
    ) -> AppResult<Vec<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users u \
             WHERE u.id <> ALL($2) \
               AND EXISTS (\
                 SELECT 1 FROM posts p \
                 WHERE p.author_id = u.id AND p.is_public = TRUE AND p.category = ANY($1)\
               ) \
             ORDER BY u.follower_count DESC \
             LIMIT $3"
        ))
        .bind(categories)
        .bind(exclude)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch users by category", e)
        })
    }

    async fn most_followed(&self, exclude: &[Uuid], limit: i64) -> AppResult<Vec<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users \
             WHERE id <> ALL($1) \
             ORDER BY follower_count DESC \
             LIMIT $2"
        ))
        .bind(exclude)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch most-followed users", e)
        })
    }
}
