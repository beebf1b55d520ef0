//! Image resolution infrastructure.
//!
//! This module provides:
//! - The resolving loader with retries and fallback
//! - The in-process LRU tier of resolved urls
//! - An HTTP fetcher for source images
//! - Object naming for migrated images

pub mod http_fetcher;
pub mod loader;
pub mod memory_cache;
pub mod object_path;
pub mod retry;

pub use http_fetcher::HttpImageFetcher;
pub use loader::{ImageLoader, ImageLoaderConfig};
pub use memory_cache::{CacheStats, MemoryUrlCache};
pub use retry::{AttemptOutcome, RetryController, RetryStep};
