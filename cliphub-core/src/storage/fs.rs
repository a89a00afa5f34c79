use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::StorageAdapter;
use crate::{Error, Result};

/// Local-filesystem storage rooted at a single directory.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Open a storage root, creating the directory if it does not exist.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generated filenames never contain separators or parent components;
    /// anything else is a caller bug, rejected before touching the fs.
    fn checked_path(&self, name: &str) -> Result<PathBuf> {
        let candidate = Path::new(name);
        let plain = candidate.components().count() == 1
            && matches!(candidate.components().next(), Some(Component::Normal(_)));
        if !plain {
            return Err(Error::Storage(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid object name: {name}"),
            )));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl StorageAdapter for FsStorage {
    async fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.checked_path(name)?;
        tokio::fs::write(&path, data).await?;
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let path = self.checked_path(name)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }

    async fn remove(&self, name: &str) -> Result<()> {
        let path = self.checked_path(name)?;
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
