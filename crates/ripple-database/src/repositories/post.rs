//! Post repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use ripple_core::error::{AppError, ErrorKind};
use ripple_core::result::AppResult;
use ripple_entity::post::Post;

use crate::store::PostStore;

/// Repository for post lookups and the feed source scans.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post by id", e))
    }

    async fn public_by_authors(
        &self,
        author_ids: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT * FROM posts \
             WHERE author_id = ANY($1) AND is_public = TRUE \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(author_ids)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch followed posts", e)
        })
    }

    async fn popular_since(
        &self,
        since: DateTime<Utc>,
        exclude: &[Uuid],
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT * FROM posts \
             WHERE is_public = TRUE AND created_at >= $1 AND id <> ALL($2) \
             ORDER BY like_count DESC, save_count DESC, created_at DESC \
             LIMIT $3 OFFSET $4",
        )
        .bind(since)
        .bind(exclude)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch popular posts", e)
        })
    }

    async fn public_by_author(
        &self,
        author_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT * FROM posts \
             WHERE author_id = $1 AND is_public = TRUE \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to fetch author posts", e))
    }

    async fn count_public(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE is_public = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count public posts", e)
            })?;
        Ok(count as u64)
    }

    async fn count_public_by_author(&self, author_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM posts WHERE author_id = $1 AND is_public = TRUE",
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count author posts", e))?;
        Ok(count as u64)
    }
}
