//! JSON lines error log.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::entities::ErrorRecord;
use crate::domain::errors::StorageError;
use crate::domain::ports::ErrorLogPort;

/// Appends one JSON object per line to a file.
pub struct JsonLinesErrorLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesErrorLog {
    /// Creates a log writing to `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl ErrorLogPort for JsonLinesErrorLog {
    async fn append(&self, record: &ErrorRecord) -> Result<(), StorageError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}
