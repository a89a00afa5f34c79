//! In-memory test doubles for the persistence, storage, and thumbnail
//! interfaces, plus a small harness wiring them into the services.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use cliphub_core::models::{Comment, CommentId, UploadRequest, User, UserId, Video, VideoId};
use cliphub_core::repository::{CommentRepository, UserRepository, VideoRepository};
use cliphub_core::service::{
    CatalogService, DeletionService, EngagementService, SessionManager, UploadService,
};
use cliphub_core::storage::StorageAdapter;
use cliphub_core::thumbnail::ThumbnailExtractor;
use cliphub_core::{Error, Result};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(Error::DuplicateUsername(user.username.clone()));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| u.username == username))
    }
}

#[derive(Default)]
pub struct MemoryVideoRepository {
    videos: RwLock<Vec<Video>>,
}

#[async_trait]
impl VideoRepository for MemoryVideoRepository {
    async fn create(&self, video: &Video) -> Result<Video> {
        let mut videos = self.videos.write().await;
        if videos.iter().any(|v| v.filename == video.filename) {
            return Err(Error::DuplicateUpload(video.filename.clone()));
        }
        videos.push(video.clone());
        Ok(video.clone())
    }

    async fn get_by_id(&self, video_id: &VideoId) -> Result<Option<Video>> {
        let videos = self.videos.read().await;
        Ok(videos.iter().find(|v| v.id == *video_id).cloned())
    }

    async fn get_by_filename(&self, filename: &str) -> Result<Option<Video>> {
        let videos = self.videos.read().await;
        Ok(videos.iter().find(|v| v.filename == filename).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Video>> {
        let videos = self.videos.read().await;
        Ok(videos.clone())
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Video>> {
        let videos = self.videos.read().await;
        Ok(videos
            .iter()
            .filter(|v| v.title.contains(query))
            .cloned()
            .collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Video>> {
        let videos = self.videos.read().await;
        Ok(videos
            .iter()
            .filter(|v| v.category == category)
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<Video>> {
        let videos = self.videos.read().await;
        Ok(videos
            .iter()
            .filter(|v| v.user_id == *user_id)
            .cloned()
            .collect())
    }

    async fn exists_for_user(&self, filename: &str, user_id: &UserId) -> Result<bool> {
        let videos = self.videos.read().await;
        Ok(videos
            .iter()
            .any(|v| v.filename == filename && v.user_id == *user_id))
    }

    async fn update_views(&self, video_id: &VideoId, views: i64) -> Result<()> {
        let mut videos = self.videos.write().await;
        if let Some(video) = videos.iter_mut().find(|v| v.id == *video_id) {
            video.views = views;
        }
        Ok(())
    }

    async fn delete(&self, video_id: &VideoId) -> Result<bool> {
        let mut videos = self.videos.write().await;
        let before = videos.len();
        videos.retain(|v| v.id != *video_id);
        Ok(videos.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryCommentRepository {
    comments: RwLock<Vec<Comment>>,
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<Comment> {
        let mut comments = self.comments.write().await;
        comments.push(comment.clone());
        Ok(comment.clone())
    }

    async fn get_by_id(&self, comment_id: &CommentId) -> Result<Option<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments.iter().find(|c| c.id == *comment_id).cloned())
    }

    async fn list_by_video(&self, video_id: &VideoId) -> Result<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .iter()
            .filter(|c| c.video_id == *video_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, comment_id: &CommentId) -> Result<bool> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|c| c.id != *comment_id);
        Ok(comments.len() < before)
    }

    async fn delete_by_video(&self, video_id: &VideoId) -> Result<u64> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|c| c.video_id != *video_id);
        Ok((before - comments.len()) as u64)
    }
}

/// Blob storage over a plain map; `resolve` returns a synthetic path.
#[derive(Default)]
pub struct MemoryStorage {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub async fn get(&self, name: &str) -> Option<Vec<u8>> {
        let objects = self.objects.read().await;
        objects.get(name).cloned()
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        let mut objects = self.objects.write().await;
        objects.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let objects = self.objects.read().await;
        Ok(objects.contains_key(name))
    }

    async fn remove(&self, name: &str) -> Result<()> {
        let mut objects = self.objects.write().await;
        objects
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(format!("object {name}")))
    }

    fn resolve(&self, name: &str) -> PathBuf {
        PathBuf::from("/memory").join(name)
    }
}

pub const FAKE_JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10];

/// Extractor double that always yields a tiny JPEG.
pub struct StubExtractor;

#[async_trait]
impl ThumbnailExtractor for StubExtractor {
    async fn first_frame(&self, _video: &Path) -> Result<Vec<u8>> {
        Ok(FAKE_JPEG.to_vec())
    }
}

/// Extractor double simulating a video with no readable first frame.
pub struct FailingExtractor;

#[async_trait]
impl ThumbnailExtractor for FailingExtractor {
    async fn first_frame(&self, _video: &Path) -> Result<Vec<u8>> {
        Err(Error::ThumbnailExtraction(
            "no readable video frame".to_string(),
        ))
    }
}

/// All services wired over the in-memory doubles.
pub struct TestApp {
    pub media: Arc<MemoryStorage>,
    pub thumbnails: Arc<MemoryStorage>,
    pub sessions: SessionManager,
    pub catalog: CatalogService,
    pub upload: UploadService,
    pub engagement: EngagementService,
    pub deletion: DeletionService,
}

pub fn test_app() -> TestApp {
    test_app_with_extractor(Arc::new(StubExtractor))
}

pub fn test_app_with_extractor(extractor: Arc<dyn ThumbnailExtractor>) -> TestApp {
    let users = Arc::new(MemoryUserRepository::default());
    let videos = Arc::new(MemoryVideoRepository::default());
    let comments = Arc::new(MemoryCommentRepository::default());
    let media = Arc::new(MemoryStorage::default());
    let thumbnails = Arc::new(MemoryStorage::default());

    TestApp {
        media: media.clone(),
        thumbnails: thumbnails.clone(),
        sessions: SessionManager::new(users.clone()),
        catalog: CatalogService::new(videos.clone(), users.clone()),
        upload: UploadService::new(
            videos.clone(),
            media.clone(),
            thumbnails.clone(),
            extractor,
        ),
        engagement: EngagementService::new(videos.clone(), comments.clone()),
        deletion: DeletionService::new(videos, comments, media, thumbnails),
    }
}

pub fn upload_request(title: &str, category: &str, original_filename: &str) -> UploadRequest {
    UploadRequest {
        title: title.to_string(),
        description: format!("{title} description"),
        category: category.to_string(),
        original_filename: original_filename.to_string(),
        data: Bytes::from_static(b"fake video payload"),
    }
}
