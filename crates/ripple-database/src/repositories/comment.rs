//! Comment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ripple_core::error::{AppError, ErrorKind};
use ripple_core::result::AppResult;
use ripple_entity::engagement::Comment;

use crate::store::CommentStore;

/// Repository for the counter-bearing comment write path.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Create a new comment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Comment>> {
        sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find comment", e))
    }

    async fn create(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> AppResult<(Comment, i32)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let comment = sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (id, post_id, user_id, content) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert comment", e))?;

        let count: i32 = sqlx::query_scalar(
            "UPDATE posts SET comment_count = comment_count + 1 \
             WHERE id = $1 RETURNING comment_count",
        )
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump comment count", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit comment", e)
        })?;

        Ok((comment, count))
    }

    async fn delete(&self, comment_id: Uuid) -> AppResult<i32> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let post_id: Option<Uuid> =
            sqlx::query_scalar("DELETE FROM comments WHERE id = $1 RETURNING post_id")
                .bind(comment_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete comment", e)
                })?;

        let Some(post_id) = post_id else {
            return Err(AppError::not_found("Comment not found"));
        };

        let count: i32 = sqlx::query_scalar(
            "UPDATE posts SET comment_count = comment_count - 1 \
             WHERE id = $1 RETURNING comment_count",
        )
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to drop comment count", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit comment deletion", e)
        })?;

        Ok(count)
    }
}
