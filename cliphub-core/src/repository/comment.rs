use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::{
    models::{Comment, CommentId, UserId, VideoId},
    Result,
};

/// Persistence interface for comment records.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: &Comment) -> Result<Comment>;
    async fn get_by_id(&self, comment_id: &CommentId) -> Result<Option<Comment>>;
    /// A video's comments in creation order.
    async fn list_by_video(&self, video_id: &VideoId) -> Result<Vec<Comment>>;
    async fn delete(&self, comment_id: &CommentId) -> Result<bool>;
    /// Remove every comment attached to a video. Returns the number removed.
    async fn delete_by_video(&self, video_id: &VideoId) -> Result<u64>;
}

/// PostgreSQL-backed comment repository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_comment(row: &PgRow) -> Result<Comment> {
        Ok(Comment {
            id: CommentId::from_string(row.try_get("id")?),
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
            video_id: VideoId::from_string(row.try_get("video_id")?),
            user_id: UserId::from_string(row.try_get("user_id")?),
        })
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<Comment> {
        let row = sqlx::query(
            r"
            INSERT INTO comments (id, content, created_at, video_id, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, content, created_at, video_id, user_id
            ",
        )
        .bind(comment.id.as_str())
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.video_id.as_str())
        .bind(comment.user_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_comment(&row)
    }

    async fn get_by_id(&self, comment_id: &CommentId) -> Result<Option<Comment>> {
        let row = sqlx::query(
            r"
            SELECT id, content, created_at, video_id, user_id
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(comment_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_comment(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_by_video(&self, video_id: &VideoId) -> Result<Vec<Comment>> {
        let rows = sqlx::query(
            r"
            SELECT id, content, created_at, video_id, user_id
            FROM comments
            WHERE video_id = $1
            ORDER BY created_at
            ",
        )
        .bind(video_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_comment).collect()
    }

    async fn delete(&self, comment_id: &CommentId) -> Result<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM comments
            WHERE id = $1
            ",
        )
        .bind(comment_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_video(&self, video_id: &VideoId) -> Result<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM comments
            WHERE video_id = $1
            ",
        )
        .bind(video_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {

    #[tokio::test]
    #[ignore = "Requires database"]
    async fn test_create_comment() {
        // Integration test placeholder
    }
}
