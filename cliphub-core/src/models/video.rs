use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{UserId, VideoId};

/// Uploaded video record.
///
/// `filename` is the generated storage name and the detail-page lookup
/// key; it is unique across all uploads. `thumbnail_filename` addresses
/// the generated still image in the thumbnail storage area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    /// Category string as submitted at upload time. Expected to be one of
    /// the configured category names, but not validated.
    pub category: String,
    pub filename: String,
    pub thumbnail_filename: String,
    pub user_id: UserId,
    /// Monotonic view counter, incremented on every detail-page read.
    pub views: i64,
    pub upload_date: DateTime<Utc>,
}

impl Video {
    #[must_use]
    pub fn new(
        title: String,
        description: String,
        category: String,
        filename: String,
        thumbnail_filename: String,
        user_id: UserId,
    ) -> Self {
        Self {
            id: VideoId::new(),
            title,
            description,
            category,
            filename,
            thumbnail_filename,
            user_id,
            views: 0,
            upload_date: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}

/// Multipart upload form fields plus the raw payload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub original_filename: String,
    pub data: bytes::Bytes,
}
