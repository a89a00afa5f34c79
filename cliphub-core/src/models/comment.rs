use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CommentId, UserId, VideoId};

/// Free-text reaction to a video.
///
/// Deletable only by its author, not by the video owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub video_id: VideoId,
    pub user_id: UserId,
}

impl Comment {
    #[must_use]
    pub fn new(video_id: VideoId, user_id: UserId, content: String) -> Self {
        Self {
            id: CommentId::new(),
            content,
            created_at: Utc::now(),
            video_id,
            user_id,
        }
    }
}
