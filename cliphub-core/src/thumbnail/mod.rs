pub mod ffmpeg;

pub use ffmpeg::FfmpegExtractor;

use async_trait::async_trait;
use std::path::Path;

use crate::Result;

/// Thumbnail canvas size. Frames are scaled onto exactly this canvas,
/// without preserving aspect ratio.
pub const THUMBNAIL_WIDTH: u32 = 320;
pub const THUMBNAIL_HEIGHT: u32 = 240;

/// Storage name of the thumbnail derived from a video's storage name.
#[must_use]
pub fn thumbnail_name(video_filename: &str) -> String {
    format!("thumbnail_{video_filename}.jpg")
}

/// Produces a still image from the first readable frame of a stored video.
#[async_trait]
pub trait ThumbnailExtractor: Send + Sync {
    /// Decode the first readable frame of the video at `video` and render
    /// it as a 320x240 JPEG. Fails when the file has no decodable frame.
    async fn first_frame(&self, video: &Path) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_name() {
        assert_eq!(
            thumbnail_name("1700000000_ab12cd34_cat.mp4"),
            "thumbnail_1700000000_ab12cd34_cat.mp4.jpg"
        );
    }
}
