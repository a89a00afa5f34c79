pub mod fs;

pub use fs::FsStorage;

use async_trait::async_trait;
use std::path::PathBuf;

use crate::Result;

/// Durable blob storage addressed by generated filenames.
///
/// The application keeps two independent storage areas: one for raw video
/// uploads and one for generated thumbnails, each behind its own adapter
/// instance.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Store `data` under `name`, replacing any existing object.
    async fn write(&self, name: &str, data: &[u8]) -> Result<()>;

    /// Whether an object is currently stored under `name`.
    async fn exists(&self, name: &str) -> Result<bool>;

    /// Remove the object stored under `name`. The object must exist;
    /// callers performing best-effort cleanup check `exists` first.
    async fn remove(&self, name: &str) -> Result<()>;

    /// Absolute path of the object stored under `name`, for handing the
    /// stored file to external tooling.
    fn resolve(&self, name: &str) -> PathBuf;
}
