use chrono::Utc;
use rand::RngExt;
use std::sync::Arc;
use tracing::info;

use crate::{
    models::{UploadRequest, User, Video},
    repository::VideoRepository,
    storage::StorageAdapter,
    thumbnail::{thumbnail_name, ThumbnailExtractor},
    Error, Result,
};

const SUFFIX_LEN: usize = 8;
const SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Storage name for an upload: Unix timestamp, an 8-character random
/// alphanumeric suffix, and the original filename, joined with `_`.
fn generate_unique_filename(original: &str) -> String {
    let timestamp = Utc::now().timestamp();
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.random_range(0..SUFFIX_CHARS.len());
            SUFFIX_CHARS[idx] as char
        })
        .collect();
    format!("{timestamp}_{suffix}_{original}")
}

/// Orchestrates an upload: filename generation, storage write, thumbnail
/// extraction, record creation.
///
/// The steps are not transactional: an extraction or record-insert failure
/// leaves the already-written video file in storage.
#[derive(Clone)]
pub struct UploadService {
    videos: Arc<dyn VideoRepository>,
    media: Arc<dyn StorageAdapter>,
    thumbnails: Arc<dyn StorageAdapter>,
    extractor: Arc<dyn ThumbnailExtractor>,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService").finish()
    }
}

impl UploadService {
    #[must_use]
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        media: Arc<dyn StorageAdapter>,
        thumbnails: Arc<dyn StorageAdapter>,
        extractor: Arc<dyn ThumbnailExtractor>,
    ) -> Self {
        Self {
            videos,
            media,
            thumbnails,
            extractor,
        }
    }

    /// Store an uploaded video, generate its thumbnail, and persist the
    /// record. Requires an authenticated user.
    pub async fn upload(
        &self,
        request: UploadRequest,
        current_user: Option<&User>,
    ) -> Result<Video> {
        let user = current_user.ok_or(Error::Unauthenticated)?;

        let filename = generate_unique_filename(&request.original_filename);

        // The timestamp + random suffix makes a collision astronomically
        // unlikely; the store's UNIQUE filename column backs this check.
        if self.videos.exists_for_user(&filename, &user.id).await? {
            return Err(Error::DuplicateUpload(filename));
        }

        self.media.write(&filename, &request.data).await?;

        // Extraction failure leaves the stored video file in place; there
        // is no rollback across storage and persistence.
        let frame = self
            .extractor
            .first_frame(&self.media.resolve(&filename))
            .await?;
        let thumbnail_filename = thumbnail_name(&filename);
        self.thumbnails.write(&thumbnail_filename, &frame).await?;

        let video = Video::new(
            request.title,
            request.description,
            request.category,
            filename,
            thumbnail_filename,
            user.id.clone(),
        );
        let created = self.videos.create(&video).await?;

        info!(
            video_id = %created.id,
            filename = %created.filename,
            username = %user.username,
            "video uploaded"
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_filename_format() {
        let name = generate_unique_filename("cat video.mp4");

        let mut parts = name.splitn(3, '_');
        let timestamp = parts.next().expect("timestamp part");
        let suffix = parts.next().expect("suffix part");
        let original = parts.next().expect("original part");

        assert!(timestamp.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
        assert_eq!(original, "cat video.mp4");
    }

    #[test]
    fn test_generated_filenames_differ() {
        let a = generate_unique_filename("a.mp4");
        let b = generate_unique_filename("a.mp4");
        assert_ne!(a, b);
    }
}
