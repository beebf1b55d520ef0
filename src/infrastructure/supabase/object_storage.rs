//! Supabase Storage bucket adapter.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header;
use tracing::debug;

use super::client::SupabaseClient;
use crate::domain::errors::StorageError;
use crate::domain::ports::ObjectStoragePort;

/// Bucket used by the directory for images.
pub const DEFAULT_BUCKET: &str = "images";

/// Object storage in a public Supabase bucket.
#[derive(Debug, Clone)]
pub struct SupabaseObjectStorage {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseObjectStorage {
    /// Creates the adapter for `bucket`.
    #[must_use]
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl ObjectStoragePort for SupabaseObjectStorage {
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let size = bytes.len();
        let response = self
            .client
            .post(&self.client.object_url(&self.bucket, path))
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        SupabaseClient::check(response).await?;
        debug!(bucket = %self.bucket, path = %path, size, "Uploaded object");
        Ok(path.to_string())
    }

    fn public_url(&self, path: &str) -> String {
        self.client.public_object_url(&self.bucket, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    #[tokio::test]
    async fn test_upload_sends_body_under_bucket() -> Result<(), Box<dyn std::error::Error>> {
        let (base, request) = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 29\r\n\
              Connection: close\r\n\r\n{\"Key\":\"images/cached/a.jpg\"}",
        )
        .await?;
        let storage =
            SupabaseObjectStorage::new(SupabaseClient::new(base.clone(), "anon")?, DEFAULT_BUCKET);

        let path = storage
            .upload("cached/a.jpg", Bytes::from_static(b"\xFF\xD8"), "image/jpeg")
            .await?;

        assert_eq!(path, "cached/a.jpg");
        assert_eq!(
            storage.public_url(&path),
            format!("{base}/storage/v1/object/public/images/cached/a.jpg")
        );

        let request = request.await?;
        assert!(request.starts_with("POST /storage/v1/object/images/cached/a.jpg"));
        assert!(request.to_ascii_lowercase().contains("content-type: image/jpeg"));
        Ok(())
    }

    #[tokio::test]
    async fn test_upload_rejection() -> Result<(), Box<dyn std::error::Error>> {
        let (base, _request) = serve_once(
            b"HTTP/1.1 400 Bad Request\r\nContent-Length: 9\r\nConnection: close\r\n\r\nDuplicate",
        )
        .await?;
        let storage =
            SupabaseObjectStorage::new(SupabaseClient::new(base, "anon")?, DEFAULT_BUCKET);

        let result = storage
            .upload("cached/a.jpg", Bytes::from_static(b"\xFF\xD8"), "image/jpeg")
            .await;

        assert!(matches!(result, Err(StorageError::Status { status: 400, .. })));
        Ok(())
    }
}
