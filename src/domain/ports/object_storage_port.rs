//! Object storage port definition.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::errors::StorageError;

/// Blob store handing out publicly addressable URLs.
#[async_trait]
pub trait ObjectStoragePort: Send + Sync {
    /// Stores `bytes` at `path` and returns the stored path.
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// Returns the public URL of a stored path.
    fn public_url(&self, path: &str) -> String;
}
