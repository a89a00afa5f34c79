use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    models::{CommentId, User, Video, VideoId},
    repository::{CommentRepository, VideoRepository},
    storage::StorageAdapter,
    Error, Result,
};

/// Removal of videos and comments, permitted only to their owners.
///
/// Both operations report one combined error for "missing" and "owned by
/// someone else" so that non-owners cannot probe for existence; the
/// distinction is logged at debug level only.
#[derive(Clone)]
pub struct DeletionService {
    videos: Arc<dyn VideoRepository>,
    comments: Arc<dyn CommentRepository>,
    media: Arc<dyn StorageAdapter>,
    thumbnails: Arc<dyn StorageAdapter>,
}

impl std::fmt::Debug for DeletionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeletionService").finish()
    }
}

impl DeletionService {
    #[must_use]
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        comments: Arc<dyn CommentRepository>,
        media: Arc<dyn StorageAdapter>,
        thumbnails: Arc<dyn StorageAdapter>,
    ) -> Self {
        Self {
            videos,
            comments,
            media,
            thumbnails,
        }
    }

    /// Delete a video, its backing files, and its comments. Owner only.
    pub async fn delete_video(&self, video_id: &VideoId, current_user: &User) -> Result<()> {
        let Some(video) = self.videos.get_by_id(video_id).await? else {
            debug!(video_id = %video_id, "delete refused: video does not exist");
            return Err(Error::NotFoundOrForbidden);
        };

        if !video.is_owned_by(&current_user.id) {
            debug!(
                video_id = %video_id,
                username = %current_user.username,
                "delete refused: requester does not own the video"
            );
            return Err(Error::NotFoundOrForbidden);
        }

        // Best effort on both files: remove only what is currently there.
        if self.media.exists(&video.filename).await? {
            self.media.remove(&video.filename).await?;
        }
        if self.thumbnails.exists(&video.thumbnail_filename).await? {
            self.thumbnails.remove(&video.thumbnail_filename).await?;
        }

        let swept = self.comments.delete_by_video(&video.id).await?;
        self.videos.delete(&video.id).await?;

        info!(
            video_id = %video.id,
            filename = %video.filename,
            comments_removed = swept,
            username = %current_user.username,
            "video deleted"
        );

        Ok(())
    }

    /// Delete a comment. Author only; the video owner has no say.
    ///
    /// Returns the parent video so the caller can redirect back to its
    /// detail page.
    pub async fn delete_comment(
        &self,
        comment_id: &CommentId,
        current_user: &User,
    ) -> Result<Video> {
        let Some(comment) = self.comments.get_by_id(comment_id).await? else {
            debug!(comment_id = %comment_id, "delete refused: comment does not exist");
            return Err(Error::NotFoundOrForbidden);
        };

        if comment.user_id != current_user.id {
            debug!(
                comment_id = %comment_id,
                username = %current_user.username,
                "delete refused: requester is not the comment author"
            );
            return Err(Error::NotFoundOrForbidden);
        }

        let video = self
            .videos
            .get_by_id(&comment.video_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("video {}", comment.video_id)))?;

        self.comments.delete(&comment.id).await?;

        info!(
            comment_id = %comment.id,
            video_id = %video.id,
            username = %current_user.username,
            "comment deleted"
        );

        Ok(video)
    }
}
