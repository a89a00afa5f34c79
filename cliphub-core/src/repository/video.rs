use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use crate::{
    models::{UserId, Video, VideoId},
    Result,
};

/// Persistence interface for video records.
///
/// Detail pages look videos up by filename; deletion addresses them by id.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create(&self, video: &Video) -> Result<Video>;
    async fn get_by_id(&self, video_id: &VideoId) -> Result<Option<Video>>;
    async fn get_by_filename(&self, filename: &str) -> Result<Option<Video>>;
    async fn list_all(&self) -> Result<Vec<Video>>;
    /// Substring match against the title; case sensitivity follows the
    /// store's collation.
    async fn search_by_title(&self, query: &str) -> Result<Vec<Video>>;
    async fn list_by_category(&self, category: &str) -> Result<Vec<Video>>;
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Video>>;
    /// Whether the user already owns a video stored under `filename`.
    async fn exists_for_user(&self, filename: &str, user_id: &UserId) -> Result<bool>;
    /// Overwrite the persisted view counter.
    async fn update_views(&self, video_id: &VideoId, views: i64) -> Result<()>;
    async fn delete(&self, video_id: &VideoId) -> Result<bool>;
}

/// PostgreSQL-backed video repository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

const VIDEO_COLUMNS: &str =
    "id, title, description, category, filename, thumbnail_filename, user_id, views, upload_date";

impl PgVideoRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_video(row: &PgRow) -> Result<Video> {
        Ok(Video {
            id: VideoId::from_string(row.try_get("id")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            filename: row.try_get("filename")?,
            thumbnail_filename: row.try_get("thumbnail_filename")?,
            user_id: UserId::from_string(row.try_get("user_id")?),
            views: row.try_get("views")?,
            upload_date: row.try_get("upload_date")?,
        })
    }

    fn rows_to_videos(rows: Vec<PgRow>) -> Result<Vec<Video>> {
        rows.iter().map(Self::row_to_video).collect()
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn create(&self, video: &Video) -> Result<Video> {
        let sql = format!(
            r"
            INSERT INTO videos (id, title, description, category, filename, thumbnail_filename, user_id, views, upload_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {VIDEO_COLUMNS}
            "
        );
        let row = sqlx::query(&sql)
            .bind(video.id.as_str())
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.category)
            .bind(&video.filename)
            .bind(&video.thumbnail_filename)
            .bind(video.user_id.as_str())
            .bind(video.views)
            .bind(video.upload_date)
            .fetch_one(&self.pool)
            .await?;

        Self::row_to_video(&row)
    }

    async fn get_by_id(&self, video_id: &VideoId) -> Result<Option<Video>> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(video_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_video(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_filename(&self, filename: &str) -> Result<Option<Video>> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE filename = $1");
        let row = sqlx::query(&sql)
            .bind(filename)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::row_to_video(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<Video>> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos ORDER BY upload_date");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Self::rows_to_videos(rows)
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE title LIKE $1 ORDER BY upload_date"
        );
        let pattern = format!("%{query}%");
        let rows = sqlx::query(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        Self::rows_to_videos(rows)
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE category = $1 ORDER BY upload_date"
        );
        let rows = sqlx::query(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        Self::rows_to_videos(rows)
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE user_id = $1 ORDER BY upload_date"
        );
        let rows = sqlx::query(&sql)
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        Self::rows_to_videos(rows)
    }

    async fn exists_for_user(&self, filename: &str, user_id: &UserId) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) as count
            FROM videos
            WHERE filename = $1 AND user_id = $2
            ",
        )
        .bind(filename)
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn update_views(&self, video_id: &VideoId, views: i64) -> Result<()> {
        sqlx::query(
            r"
            UPDATE videos
            SET views = $2
            WHERE id = $1
            ",
        )
        .bind(video_id.as_str())
        .bind(views)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, video_id: &VideoId) -> Result<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM videos
            WHERE id = $1
            ",
        )
        .bind(video_id.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
