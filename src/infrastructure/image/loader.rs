//! Image resolution orchestrator.
//!
//! Implements a two-tier cache in front of the network: Memory -> Cache store -> Network.
//! Network results are migrated to object storage before being cached.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::{CacheEntry, ErrorRecord, ImageSource, LoadOptions, ResolvedImage};
use crate::domain::errors::{ImageLoadError, StorageError};
use crate::domain::ports::{
    CacheStorePort, ErrorLogPort, FetchError, FetchedImage, ImageFetcherPort, ObjectStoragePort,
};

use super::memory_cache::{DEFAULT_CACHE_SIZE, DEFAULT_TTL, MemoryUrlCache};
use super::object_path::{DEFAULT_CONTENT_TYPE, cached_object_path, media_type};
use super::retry::{AttemptOutcome, RetryController, RetryStep};

/// Configuration for the image loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLoaderConfig {
    /// Options used by [`ImageLoader::resolve`].
    #[serde(flatten)]
    pub options: LoadOptions,
    /// Maximum urls in the memory tier.
    pub memory_capacity: usize,
    /// Freshness window of the memory tier, in seconds.
    pub memory_ttl_secs: u64,
    /// Requesting environment, written to every error record.
    pub client_context: String,
}

impl ImageLoaderConfig {
    /// Freshness window of the memory tier.
    #[must_use]
    pub const fn memory_ttl(&self) -> Duration {
        Duration::from_secs(self.memory_ttl_secs)
    }
}

impl Default for ImageLoaderConfig {
    fn default() -> Self {
        Self {
            options: LoadOptions::default(),
            memory_capacity: DEFAULT_CACHE_SIZE,
            memory_ttl_secs: DEFAULT_TTL.as_secs(),
            client_context: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

/// Resolves source image URLs to durable URLs, never failing.
pub struct ImageLoader {
    memory_cache: Arc<MemoryUrlCache>,
    cache_store: Arc<dyn CacheStorePort>,
    object_storage: Arc<dyn ObjectStoragePort>,
    error_log: Arc<dyn ErrorLogPort>,
    fetcher: Arc<dyn ImageFetcherPort>,
    config: ImageLoaderConfig,
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ImageLoader {
    /// Creates a loader with its own memory tier.
    #[must_use]
    pub fn new(
        config: ImageLoaderConfig,
        fetcher: Arc<dyn ImageFetcherPort>,
        cache_store: Arc<dyn CacheStorePort>,
        object_storage: Arc<dyn ObjectStoragePort>,
        error_log: Arc<dyn ErrorLogPort>,
    ) -> Self {
        let memory_cache = Arc::new(MemoryUrlCache::new(
            config.memory_capacity,
            config.memory_ttl(),
        ));
        Self {
            memory_cache,
            cache_store,
            object_storage,
            error_log,
            fetcher,
            config,
        }
    }

    /// Replaces the memory tier, e.g. to share one between loaders.
    #[must_use]
    pub fn with_memory_cache(mut self, memory_cache: Arc<MemoryUrlCache>) -> Self {
        self.memory_cache = memory_cache;
        self
    }

    /// The memory tier used by this loader.
    #[must_use]
    pub fn memory_cache(&self) -> &Arc<MemoryUrlCache> {
        &self.memory_cache
    }

    /// The loader configuration.
    #[must_use]
    pub const fn config(&self) -> &ImageLoaderConfig {
        &self.config
    }

    /// Resolves `url` with the configured options.
    pub async fn resolve(&self, url: &str) -> String {
        self.resolve_with(url, &self.config.options).await
    }

    /// Resolves `url` with per-call options.
    pub async fn resolve_with(&self, url: &str, options: &LoadOptions) -> String {
        self.resolve_detailed(url, options).await.url
    }

    /// Resolves `url`, also reporting which stage produced the result.
    pub async fn resolve_detailed(&self, url: &str, options: &LoadOptions) -> ResolvedImage {
        if let Some(hit) = self.lookup(url).await {
            return hit;
        }
        self.fetch_with_retry(url, options).await
    }

    /// Checks the memory tier, then the cache store.
    async fn lookup(&self, url: &str) -> Option<ResolvedImage> {
        if let Some(cached_url) = self.memory_cache.get_fresh(url) {
            return Some(ResolvedImage::new(url, cached_url, ImageSource::MemoryCache));
        }

        match self.cache_store.find_by_url(url).await {
            Ok(Some(entry)) => {
                debug!(url = %url, "Cache store hit");
                let cached_url = entry.cached_url.clone();
                self.memory_cache.put(CacheEntry::new(url, entry.cached_url));
                Some(ResolvedImage::new(url, cached_url, ImageSource::CacheStore))
            }
            Ok(None) => None,
            Err(e) => {
                warn!(url = %url, error = %e, "Cache store lookup failed, treating as miss");
                None
            }
        }
    }

    async fn fetch_with_retry(&self, url: &str, options: &LoadOptions) -> ResolvedImage {
        let controller = RetryController::new(*options);
        if !controller.allows_attempt() {
            debug!(url = %url, "No attempts allowed, using fallback");
            return ResolvedImage::fallback(url);
        }

        let mut attempt = 1;
        loop {
            match self.attempt(url, attempt, options).await {
                AttemptOutcome::Resolved(cached_url) => {
                    debug!(url = %url, attempt, cached_url = %cached_url, "Image migrated");
                    return ResolvedImage::new(url, cached_url, ImageSource::Network);
                }
                AttemptOutcome::Failed(error) => {
                    warn!(url = %url, attempt, error = %error, "Image load attempt failed");
                    self.record_failure(&error).await;

                    match controller.after_failure(attempt) {
                        RetryStep::Retry {
                            next_attempt,
                            delay,
                        } => {
                            debug!(url = %url, ?delay, "Backing off");
                            tokio::time::sleep(delay).await;
                            attempt = next_attempt;
                        }
                        RetryStep::GiveUp => {
                            warn!(
                                url = %url,
                                attempts = attempt,
                                "Giving up, using fallback image"
                            );
                            return ResolvedImage::fallback(url);
                        }
                    }
                }
            }
        }
    }

    /// One fetch under the deadline, then migration on success.
    async fn attempt(&self, url: &str, attempt: u32, options: &LoadOptions) -> AttemptOutcome {
        debug!(url = %url, attempt, "Downloading image from network");

        let fetched = match tokio::time::timeout(options.timeout, self.fetcher.fetch(url)).await {
            Ok(Ok(fetched)) => fetched,
            Ok(Err(FetchError::Status(status))) => {
                return AttemptOutcome::Failed(ImageLoadError::http(url, status, attempt));
            }
            Ok(Err(FetchError::Transport(message))) => {
                return AttemptOutcome::Failed(ImageLoadError::transport(url, message, attempt));
            }
            Ok(Err(FetchError::Timeout)) | Err(_) => {
                return AttemptOutcome::Failed(ImageLoadError::timeout(
                    url,
                    options.timeout,
                    attempt,
                ));
            }
        };

        match self.persist(url, fetched).await {
            Ok(cached_url) => AttemptOutcome::Resolved(cached_url),
            Err(e) => AttemptOutcome::Failed(ImageLoadError::storage(url, e.to_string(), attempt)),
        }
    }

    /// Uploads the body and records it in both tiers, cache store first.
    async fn persist(&self, url: &str, fetched: FetchedImage) -> Result<String, StorageError> {
        let content_type = fetched
            .content_type
            .as_deref()
            .map(media_type)
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let path = cached_object_path(&content_type);

        let stored_path = self
            .object_storage
            .upload(&path, fetched.bytes, &content_type)
            .await?;
        let public_url = self.object_storage.public_url(&stored_path);

        let entry = CacheEntry::new(url, public_url.clone());
        self.cache_store.upsert(&entry).await?;
        self.memory_cache.put(entry);

        Ok(public_url)
    }

    async fn record_failure(&self, error: &ImageLoadError) {
        let record = ErrorRecord::from_load_error(error, &self.config.client_context);
        if let Err(e) = self.error_log.append(&record).await {
            warn!(url = %record.source_url, error = %e, "Failed to write error log record");
        }
    }
}
