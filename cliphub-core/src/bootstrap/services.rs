//! Service initialization and dependency injection

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::{
    repository::{PgCommentRepository, PgUserRepository, PgVideoRepository},
    service::{CatalogService, DeletionService, EngagementService, SessionManager, UploadService},
    storage::{FsStorage, StorageAdapter},
    thumbnail::FfmpegExtractor,
    Config,
};

/// Container for all initialized services
///
/// Every dependency is an explicit handle passed in here; there are no
/// ambient singletons.
#[derive(Clone)]
pub struct Services {
    /// Credential checks and the logged-in session table
    pub sessions: SessionManager,
    /// Listing, search, and category/profile retrieval
    pub catalog: CatalogService,
    /// Upload orchestration (storage write, thumbnail, record)
    pub upload: UploadService,
    /// View counting and comments
    pub engagement: EngagementService,
    /// Owner-gated removal of videos and comments
    pub deletion: DeletionService,
    /// Category names offered at upload time
    pub categories: Vec<String>,
}

/// Initialize all core services
pub async fn init_services(pool: PgPool, config: &Config) -> Result<Services, anyhow::Error> {
    info!("Initializing services...");

    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let videos = Arc::new(PgVideoRepository::new(pool.clone()));
    let comments = Arc::new(PgCommentRepository::new(pool));
    info!("Repositories initialized");

    let media: Arc<dyn StorageAdapter> =
        Arc::new(FsStorage::open(&config.storage.upload_dir).await?);
    let thumbnails: Arc<dyn StorageAdapter> =
        Arc::new(FsStorage::open(&config.storage.thumbnail_dir).await?);
    info!(
        upload_dir = %config.storage.upload_dir,
        thumbnail_dir = %config.storage.thumbnail_dir,
        "Storage areas opened"
    );

    let extractor = Arc::new(FfmpegExtractor::new(config.thumbnailer.ffmpeg_path.clone()));
    info!(ffmpeg = %config.thumbnailer.ffmpeg_path, "Thumbnail extractor initialized");

    let sessions = SessionManager::new(users.clone());
    let catalog = CatalogService::new(videos.clone(), users.clone());
    let upload = UploadService::new(
        videos.clone(),
        media.clone(),
        thumbnails.clone(),
        extractor,
    );
    let engagement = EngagementService::new(videos.clone(), comments.clone());
    let deletion = DeletionService::new(videos, comments, media, thumbnails);
    info!("Services initialized");

    Ok(Services {
        sessions,
        catalog,
        upload,
        engagement,
        deletion,
        categories: config.categories.names.clone(),
    })
}
