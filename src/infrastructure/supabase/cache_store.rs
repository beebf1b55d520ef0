//! `image_cache` table adapter.

use async_trait::async_trait;
use tracing::trace;

use super::client::SupabaseClient;
use crate::domain::entities::CacheEntry;
use crate::domain::errors::StorageError;
use crate::domain::ports::CacheStorePort;

const TABLE: &str = "image_cache";

/// Cache store persisted in the `image_cache` table.
#[derive(Debug, Clone)]
pub struct SupabaseCacheStore {
    client: SupabaseClient,
}

impl SupabaseCacheStore {
    /// Creates the adapter.
    #[must_use]
    pub const fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CacheStorePort for SupabaseCacheStore {
    async fn find_by_url(&self, url: &str) -> Result<Option<CacheEntry>, StorageError> {
        let response = self
            .client
            .get(&self.client.rest_url(TABLE))
            .query(&[
                ("select", "original_url,cached_url,created_at".to_string()),
                ("original_url", format!("eq.{url}")),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<CacheEntry> = SupabaseClient::check(response).await?.json().await?;
        trace!(url = %url, found = !rows.is_empty(), "Queried image cache");
        Ok(rows.into_iter().next())
    }

    async fn upsert(&self, entry: &CacheEntry) -> Result<(), StorageError> {
        let response = self
            .client
            .post(&self.client.rest_url(TABLE))
            .query(&[("on_conflict", "original_url")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(entry)
            .send()
            .await?;

        SupabaseClient::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    #[tokio::test]
    async fn test_find_by_url_returns_first_row() -> Result<(), Box<dyn std::error::Error>> {
        let (base, request) = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 113\r\n\
              Connection: close\r\n\r\n\
              [{\"original_url\":\"https://a.test/x.jpg\",\"cached_url\":\"https://s.test/x.jpg\",\
              \"created_at\":\"2026-01-01T00:00:00Z\"}]",
        )
        .await?;
        let store = SupabaseCacheStore::new(SupabaseClient::new(base, "anon")?);

        let entry = store.find_by_url("https://a.test/x.jpg").await?;

        let entry = entry.ok_or("expected a row")?;
        assert_eq!(entry.cached_url, "https://s.test/x.jpg");

        let request = request.await?;
        assert!(request.starts_with("GET /rest/v1/image_cache?"));
        assert!(request.contains("original_url=eq.https%3A%2F%2Fa.test%2Fx.jpg"));
        assert!(request.to_ascii_lowercase().contains("apikey: anon"));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_url_accepts_null_timestamp() -> Result<(), Box<dyn std::error::Error>> {
        let (base, _request) = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 95\r\n\
              Connection: close\r\n\r\n\
              [{\"original_url\":\"https://a.test/x.jpg\",\"cached_url\":\"https://s.test/x.jpg\",\
              \"created_at\":null}]",
        )
        .await?;
        let store = SupabaseCacheStore::new(SupabaseClient::new(base, "anon")?);

        let entry = store.find_by_url("https://a.test/x.jpg").await?;

        assert_eq!(entry.map(|e| e.cached_url).as_deref(), Some("https://s.test/x.jpg"));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_by_url_empty_result() -> Result<(), Box<dyn std::error::Error>> {
        let (base, _request) = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\n\
              Connection: close\r\n\r\n[]",
        )
        .await?;
        let store = SupabaseCacheStore::new(SupabaseClient::new(base, "anon")?);

        assert!(store.find_by_url("https://a.test/none.jpg").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_merges_duplicates() -> Result<(), Box<dyn std::error::Error>> {
        let (base, request) = serve_once(
            b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await?;
        let store = SupabaseCacheStore::new(SupabaseClient::new(base, "anon")?);

        store
            .upsert(&CacheEntry::new("https://a.test/x.jpg", "https://s.test/x.jpg"))
            .await?;

        let request = request.await?;
        assert!(request.starts_with("POST /rest/v1/image_cache?on_conflict=original_url"));
        assert!(request.contains("resolution=merge-duplicates"));
        assert!(request.contains("\"cached_url\":\"https://s.test/x.jpg\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_upsert_is_status_error() -> Result<(), Box<dyn std::error::Error>> {
        let (base, _request) = serve_once(
            b"HTTP/1.1 401 Unauthorized\r\nContent-Length: 7\r\nConnection: close\r\n\r\ndenied!",
        )
        .await?;
        let store = SupabaseCacheStore::new(SupabaseClient::new(base, "anon")?);

        let result = store
            .upsert(&CacheEntry::new("https://a.test/x.jpg", "https://s.test/x.jpg"))
            .await;

        assert!(matches!(result, Err(StorageError::Status { status: 401, .. })));
        Ok(())
    }
}
