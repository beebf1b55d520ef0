//! Directory-backed object storage.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::errors::StorageError;
use crate::domain::ports::ObjectStoragePort;

/// Stores objects as files below a root directory.
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    /// Creates storage rooted at `root`, served from `public_base_url`.
    #[must_use]
    pub fn new(root: PathBuf, public_base_url: impl Into<String>) -> Self {
        Self {
            root,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if path.is_empty() || !is_plain {
            return Err(StorageError::backend(format!("invalid object path: {path}")));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStoragePort for LocalObjectStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let file_path = self.object_path(path)?;
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&file_path).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        debug!(path = %file_path.display(), size = bytes.len(), "Stored object on disk");
        Ok(path.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{path}", self.public_base_url)
    }
}
