//! Like and save repository implementation.
//!
//! The membership lookups are batched: one `ANY($n)` query answers
//! "which of these posts has this user liked/saved" for an entire feed
//! page. Counter-bearing mutations run inside a single transaction with
//! their edge insert/delete.

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ripple_core::error::{AppError, ErrorKind};
use ripple_core::result::AppResult;
use ripple_entity::post::PostCategory;

use crate::store::EngagementStore;

/// Repository for like and save edges.
#[derive(Debug, Clone)]
pub struct EngagementRepository {
    pool: PgPool,
}

impl EngagementRepository {
    /// Create a new engagement repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn membership(
        &self,
        table: &str,
        user_id: Uuid,
        post_ids: &[Uuid],
    ) -> AppResult<HashSet<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(&format!(
            "SELECT post_id FROM {table} WHERE user_id = $1 AND post_id = ANY($2)"
        ))
        .bind(user_id)
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch engagement membership", e)
        })?;
        Ok(ids.into_iter().collect())
    }

    async fn edge_exists(&self, table: &str, user_id: Uuid, post_id: Uuid) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {table} WHERE user_id = $1 AND post_id = $2)"
        ))
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check engagement edge", e)
        })?;
        Ok(exists)
    }

    async fn create_edge(
        &self,
        table: &str,
        counter: &str,
        user_id: Uuid,
        post_id: Uuid,
    ) -> AppResult<i32> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(&format!(
            "INSERT INTO {table} (id, user_id, post_id) VALUES ($1, $2, $3)"
        ))
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert engagement edge", e)
        })?;

        let count: i32 = sqlx::query_scalar(&format!(
            "UPDATE posts SET {counter} = {counter} + 1 WHERE id = $1 RETURNING {counter}"
        ))
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump engagement counter", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit engagement", e)
        })?;

        Ok(count)
    }

    async fn delete_edge(
        &self,
        table: &str,
        counter: &str,
        user_id: Uuid,
        post_id: Uuid,
    ) -> AppResult<i32> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let deleted = sqlx::query(&format!(
            "DELETE FROM {table} WHERE user_id = $1 AND post_id = $2"
        ))
        .bind(user_id)
        .bind(post_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete engagement edge", e)
        })?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::conflict("Engagement does not exist"));
        }

        let count: i32 = sqlx::query_scalar(&format!(
            "UPDATE posts SET {counter} = {counter} - 1 WHERE id = $1 RETURNING {counter}"
        ))
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to drop engagement counter", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit unengagement", e)
        })?;

        Ok(count)
    }
}

#[async_trait]
impl EngagementStore for EngagementRepository {
    async fn liked_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> AppResult<HashSet<Uuid>> {
        self.membership("likes", user_id, post_ids).await
    }

    async fn saved_ids(&self, user_id: Uuid, post_ids: &[Uuid]) -> AppResult<HashSet<Uuid>> {
        self.membership("saves", user_id, post_ids).await
    }

    async fn like_exists(&self, user_id: Uuid, post_id: Uuid) -> AppResult<bool> {
        self.edge_exists("likes", user_id, post_id).await
    }

    async fn save_exists(&self, user_id: Uuid, post_id: Uuid) -> AppResult<bool> {
        self.edge_exists("saves", user_id, post_id).await
    }

    async fn create_like(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        self.create_edge("likes", "like_count", user_id, post_id).await
    }

    async fn delete_like(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        self.delete_edge("likes", "like_count", user_id, post_id).await
    }

    async fn create_save(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        self.create_edge("saves", "save_count", user_id, post_id).await
    }

    async fn delete_save(&self, user_id: Uuid, post_id: Uuid) -> AppResult<i32> {
        self.delete_edge("saves", "save_count", user_id, post_id).await
    }

    async fn recent_liked_categories(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> AppResult<Vec<PostCategory>> {
        sqlx::query_scalar::<_, PostCategory>(
            "SELECT p.category FROM likes l \
             JOIN posts p ON p.id = l.post_id \
             WHERE l.user_id = $1 \
             ORDER BY l.created_at DESC \
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch liked categories", e)
        })
    }
}
