//! Persistent cache store port definition.

use async_trait::async_trait;

use crate::domain::entities::CacheEntry;
use crate::domain::errors::StorageError;

/// Keyed record store mapping original URL to its resolved copy.
#[async_trait]
pub trait CacheStorePort: Send + Sync {
    /// Looks up the entry for an exact URL match.
    async fn find_by_url(&self, url: &str) -> Result<Option<CacheEntry>, StorageError>;

    /// Inserts the entry or replaces the one with the same `original_url`.
    async fn upsert(&self, entry: &CacheEntry) -> Result<(), StorageError>;
}
