//! JSON file cache store.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::entities::CacheEntry;
use crate::domain::errors::StorageError;
use crate::domain::ports::CacheStorePort;

/// Cache store kept in one JSON file, keyed by original URL.
pub struct FileCacheStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl FileCacheStore {
    /// Opens the store, reading existing entries if the file exists.
    ///
    /// A malformed file is ignored and replaced on the next write.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read.
    pub async fn open(path: PathBuf) -> Result<Self, StorageError> {
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<HashMap<String, CacheEntry>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Malformed cache file, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened file cache store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if no entry is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn save_to_file(path: &Path, content: &str) -> Result<(), StorageError> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;
        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[async_trait]
impl CacheStorePort for FileCacheStore {
    async fn find_by_url(&self, url: &str) -> Result<Option<CacheEntry>, StorageError> {
        Ok(self.entries.read().await.get(url).cloned())
    }

    async fn upsert(&self, entry: &CacheEntry) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        let previous = entries.insert(entry.original_url.clone(), entry.clone());
        let content = serde_json::to_string_pretty(&*entries)?;

        let path = self.path.clone();
        let written = tokio::task::spawn_blocking(move || Self::save_to_file(&path, &content))
            .await
            .map_err(|e| StorageError::backend(format!("cache write task failed: {e}")))
            .and_then(|result| result);

        if let Err(e) = written {
            match previous {
                Some(previous) => entries.insert(previous.original_url.clone(), previous),
                None => entries.remove(&entry.original_url),
            };
            return Err(e);
        }
        Ok(())
    }
}
