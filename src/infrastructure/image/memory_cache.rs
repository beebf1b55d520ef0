//! In-process LRU tier of resolved image URLs.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use lru::LruCache;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::domain::entities::CacheEntry;

/// Default maximum number of URLs kept in memory.
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// How long a memory entry is served without consulting the cache store.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct MemoryEntry {
    entry: CacheEntry,
    stored_at: Instant,
}

/// Process-wide memory tier, shared by every resolution of one loader.
///
/// The lock is never held across an await point.
pub struct MemoryUrlCache {
    cache: Mutex<LruCache<String, MemoryEntry>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryUrlCache {
    /// Creates a cache with the given capacity and freshness window.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(cap)),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a cache with the default capacity and 24 hour window.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_CACHE_SIZE, DEFAULT_TTL)
    }

    /// Returns the cached URL if it is still within the freshness window.
    ///
    /// Stale entries are dropped.
    pub fn get_fresh(&self, url: &str) -> Option<String> {
        let mut cache = self.cache.lock();
        let lookup = cache
            .get(url)
            .map(|memory| (memory.stored_at.elapsed() < self.ttl, memory.entry.cached_url.clone()));
        let fresh = match lookup {
            Some((true, cached_url)) => Some(cached_url),
            Some((false, _)) => {
                cache.pop(url);
                trace!(url = %url, "Memory cache entry expired");
                None
            }
            None => None,
        };

        if fresh.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(url = %url, "Memory cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(url = %url, "Memory cache miss");
        }
        fresh
    }

    /// Stores an entry, stamped with the current instant.
    pub fn put(&self, entry: CacheEntry) {
        debug!(url = %entry.original_url, "Storing resolved url in memory cache");
        let key = entry.original_url.clone();
        self.cache.lock().put(
            key,
            MemoryEntry {
                entry,
                stored_at: Instant::now(),
            },
        );
    }

    /// Returns the entry regardless of age, without promoting it.
    pub fn peek(&self, url: &str) -> Option<CacheEntry> {
        self.cache.lock().peek(url).map(|memory| memory.entry.clone())
    }

    /// Removes one URL.
    pub fn evict(&self, url: &str) {
        if self.cache.lock().pop(url).is_some() {
            debug!(url = %url, "Evicted url from memory cache");
        }
    }

    /// Number of entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: self.len(),
        }
    }
}

impl Default for MemoryUrlCache {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached urls.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} urls, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}
