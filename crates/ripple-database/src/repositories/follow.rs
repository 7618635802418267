//! Follow repository implementation.
//!
//! Follow/unfollow mutate the edge and both endpoints' denormalized
//! counters inside a single transaction; a failure anywhere rolls the
//! whole unit back.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ripple_core::error::{AppError, ErrorKind};
use ripple_core::result::AppResult;
use ripple_entity::engagement::FollowCounts;
use ripple_entity::user::UserProfile;

use crate::store::FollowStore;

/// Repository for follow edges and their counter transactions.
#[derive(Debug, Clone)]
pub struct FollowRepository {
    pool: PgPool,
}

impl FollowRepository {
    /// Create a new follow repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowStore for FollowRepository {
    async fn following_ids(&self, follower_id: Uuid) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>("SELECT following_id FROM follows WHERE follower_id = $1")
            .bind(follower_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to fetch following ids", e)
            })
    }

    async fn exists(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check follow edge", e))?;
        Ok(exists)
    }

    async fn create(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<FollowCounts> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("INSERT INTO follows (id, follower_id, following_id) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(follower_id)
            .bind(following_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert follow edge", e)
            })?;

        let follower_count: i32 = sqlx::query_scalar(
            "UPDATE users SET follower_count = follower_count + 1 \
             WHERE id = $1 RETURNING follower_count",
        )
        .bind(following_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump follower count", e)
        })?;

        let following_count: i32 = sqlx::query_scalar(
            "UPDATE users SET following_count = following_count + 1 \
             WHERE id = $1 RETURNING following_count",
        )
        .bind(follower_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump following count", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit follow", e)
        })?;

        Ok(FollowCounts {
            follower_count,
            following_count,
        })
    }

    async fn delete(&self, follower_id: Uuid, following_id: Uuid) -> AppResult<FollowCounts> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let deleted = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
            .bind(follower_id)
            .bind(following_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete follow edge", e)
            })?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::conflict("Not following this user"));
        }

        let follower_count: i32 = sqlx::query_scalar(
            "UPDATE users SET follower_count = follower_count - 1 \
             WHERE id = $1 RETURNING follower_count",
        )
        .bind(following_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to drop follower count", e)
        })?;

        let following_count: i32 = sqlx::query_scalar(
            "UPDATE users SET following_count = following_count - 1 \
             WHERE id = $1 RETURNING following_count",
        )
        .bind(follower_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to drop following count", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit unfollow", e)
        })?;

        Ok(FollowCounts {
            follower_count,
            following_count,
        })
    }

    async fn second_degree_ids(
        &self,
        follower_ids: &[Uuid],
        exclude: &[Uuid],
        limit: i64,
    ) -> AppResult<Vec<Uuid>> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT DISTINCT following_id FROM follows \
             WHERE follower_id = ANY($1) AND following_id <> ALL($2) \
             LIMIT $3",
        )
        .bind(follower_ids)
        .bind(exclude)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch second-degree follows", e)
        })
    }

    async fn followers_of(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT u.id, u.username, u.display_name, u.avatar_url, u.bio, \
                    u.follower_count, u.following_count \
             FROM follows f JOIN users u ON u.id = f.follower_id \
             WHERE f.following_id = $1 \
             ORDER BY f.created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch followers", e))
    }

    async fn following_of(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<UserProfile>> {
        sqlx::query_as::<_, UserProfile>(
            "SELECT u.id, u.username, u.display_name, u.avatar_url, u.bio, \
                    u.follower_count, u.following_count \
             FROM follows f JOIN users u ON u.id = f.following_id \
             WHERE f.follower_id = $1 \
             ORDER BY f.created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch following", e))
    }

    async fn count_followers(&self, user_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE following_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count followers", e)
            })?;
        Ok(count as u64)
    }

    async fn count_following(&self, user_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count following", e)
            })?;
        Ok(count as u64)
    }
}
