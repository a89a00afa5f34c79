use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::{ThumbnailExtractor, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};
use crate::{Error, Result};

/// Frame extraction by shelling out to the `ffmpeg` binary.
///
/// One frame is decoded and scaled in a single invocation; the JPEG is
/// streamed over stdout so nothing is written outside the storage areas.
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    ffmpeg_path: String,
}

impl FfmpegExtractor {
    #[must_use]
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

/// Arguments for a single first-frame extraction run.
fn extraction_args(video: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-hide_banner"),
        OsString::from("-loglevel"),
        OsString::from("error"),
        OsString::from("-i"),
        video.as_os_str().to_os_string(),
        OsString::from("-frames:v"),
        OsString::from("1"),
        OsString::from("-vf"),
        OsString::from(format!("scale={THUMBNAIL_WIDTH}:{THUMBNAIL_HEIGHT}")),
        OsString::from("-f"),
        OsString::from("image2pipe"),
        OsString::from("-c:v"),
        OsString::from("mjpeg"),
        OsString::from("pipe:1"),
    ]
}

/// Last few lines of ffmpeg's stderr, for error reporting.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let tail: Vec<&str> = text.lines().rev().take(3).collect();
    tail.into_iter().rev().collect::<Vec<_>>().join("; ")
}

#[async_trait]
impl ThumbnailExtractor for FfmpegExtractor {
    async fn first_frame(&self, video: &Path) -> Result<Vec<u8>> {
        let output = Command::new(&self.ffmpeg_path)
            .args(extraction_args(video))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                Error::ThumbnailExtraction(format!(
                    "failed to run {}: {e}",
                    self.ffmpeg_path
                ))
            })?;

        if !output.status.success() {
            return Err(Error::ThumbnailExtraction(stderr_tail(&output.stderr)));
        }

        // ffmpeg exits 0 on inputs with zero decodable frames; an empty
        // stdout is the only signal.
        if output.stdout.is_empty() {
            return Err(Error::ThumbnailExtraction(
                "no readable video frame".to_string(),
            ));
        }

        Ok(output.stdout)
    }
}
