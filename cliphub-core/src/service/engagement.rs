use std::sync::Arc;
use tracing::info;

use crate::{
    models::{Comment, User, Video},
    repository::{CommentRepository, VideoRepository},
    Error, Result,
};

/// View counting and commenting on video detail pages.
#[derive(Clone)]
pub struct EngagementService {
    videos: Arc<dyn VideoRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl std::fmt::Debug for EngagementService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngagementService").finish()
    }
}

impl EngagementService {
    #[must_use]
    pub fn new(videos: Arc<dyn VideoRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { videos, comments }
    }

    /// Resolve a detail-page read: look the video up by filename and count
    /// the view.
    ///
    /// Every read counts, including the uploader's own and repeated
    /// reloads. The increment is a read-modify-write, not an atomic
    /// update; simultaneous reads can lose increments.
    pub async fn view_video(&self, filename: &str) -> Result<Video> {
        let mut video = self
            .videos
            .get_by_filename(filename)
            .await?
            .ok_or_else(|| Error::NotFound(format!("video {filename}")))?;

        video.views += 1;
        self.videos.update_views(&video.id, video.views).await?;

        Ok(video)
    }

    /// Attach a comment to a video, on behalf of the current user.
    pub async fn add_comment(
        &self,
        filename: &str,
        content: String,
        current_user: Option<&User>,
    ) -> Result<Comment> {
        let user = current_user.ok_or(Error::Unauthenticated)?;

        let video = self
            .videos
            .get_by_filename(filename)
            .await?
            .ok_or_else(|| Error::NotFound(format!("video {filename}")))?;

        let comment = Comment::new(video.id.clone(), user.id.clone(), content);
        let created = self.comments.create(&comment).await?;

        info!(
            comment_id = %created.id,
            video_id = %video.id,
            username = %user.username,
            "comment added"
        );

        Ok(created)
    }

    /// A video's comments in creation order, for the detail page.
    pub async fn comments_for(&self, filename: &str) -> Result<Vec<Comment>> {
        let video = self
            .videos
            .get_by_filename(filename)
            .await?
            .ok_or_else(|| Error::NotFound(format!("video {filename}")))?;

        self.comments.list_by_video(&video.id).await
    }
}
