use std::sync::Arc;

use crate::{
    models::Video,
    repository::{UserRepository, VideoRepository},
    Error, Result,
};

/// Read-only listing, search, and filtered retrieval of videos.
#[derive(Clone)]
pub struct CatalogService {
    videos: Arc<dyn VideoRepository>,
    users: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService").finish()
    }
}

impl CatalogService {
    #[must_use]
    pub fn new(videos: Arc<dyn VideoRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { videos, users }
    }

    /// All videos in the store's natural order.
    pub async fn list_all(&self) -> Result<Vec<Video>> {
        self.videos.list_all().await
    }

    /// Substring match against titles. An absent or empty query lists
    /// everything.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<Video>> {
        match query {
            Some(q) if !q.is_empty() => self.videos.search_by_title(q).await,
            _ => self.videos.list_all().await,
        }
    }

    /// Videos whose category equals `category` exactly. Unknown categories
    /// yield an empty list, not an error.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Video>> {
        self.videos.list_by_category(category).await
    }

    /// A user's uploads, for their profile page.
    pub async fn list_by_user(&self, username: &str) -> Result<Vec<Video>> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

        self.videos.list_by_user(&user.id).await
    }
}
