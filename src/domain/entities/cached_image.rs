//! Cache entries and resolution results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Path returned when an image cannot be resolved.
pub const FALLBACK_IMAGE_PATH: &str = "/images/fallback.jpg";

/// Mapping from a source image URL to the URL it was migrated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Source image reference, the unique key.
    pub original_url: String,
    /// Persistently hosted copy.
    pub cached_url: String,
    /// When the entry was last resolved. Rows without one read as "now".
    #[serde(
        rename = "created_at",
        default = "Utc::now",
        deserialize_with = "resolved_at_or_now"
    )]
    pub resolved_at: DateTime<Utc>,
}

fn resolved_at_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DateTime<Utc>>::deserialize(deserializer)?.unwrap_or_else(Utc::now))
}

impl CacheEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(original_url: impl Into<String>, cached_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            cached_url: cached_url.into(),
            resolved_at: Utc::now(),
        }
    }
}

/// Stage of the pipeline that produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    /// Fresh entry in the in-process tier.
    MemoryCache,
    /// Entry found in the persistent cache store.
    CacheStore,
    /// Fetched and migrated during this call.
    Network,
    /// Every attempt failed.
    Fallback,
}

impl ImageSource {
    /// Returns true if the result is the fallback image.
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback)
    }
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemoryCache => write!(f, "memory"),
            Self::CacheStore => write!(f, "cache-store"),
            Self::Network => write!(f, "network"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Outcome of resolving one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    /// URL the caller asked for.
    pub original_url: String,
    /// URL to render.
    pub url: String,
    /// Where `url` came from.
    pub source: ImageSource,
}

impl ResolvedImage {
    /// Creates a resolution from a cache hit or fresh upload.
    #[must_use]
    pub fn new(
        original_url: impl Into<String>,
        url: impl Into<String>,
        source: ImageSource,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            url: url.into(),
            source,
        }
    }

    /// Creates the fallback resolution.
    #[must_use]
    pub fn fallback(original_url: impl Into<String>) -> Self {
        Self::new(original_url, FALLBACK_IMAGE_PATH, ImageSource::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_entry_uses_table_columns() {
        let entry = CacheEntry::new("https://example.com/a.jpg", "https://cdn/cached/a.jpg");
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["original_url"], "https://example.com/a.jpg");
        assert_eq!(json["cached_url"], "https://cdn/cached/a.jpg");
        assert!(json.get("created_at").is_some());
        assert!(json.get("resolved_at").is_none());
    }

    #[test]
    fn test_cache_entry_tolerates_missing_timestamp() {
        let null: CacheEntry = serde_json::from_value(serde_json::json!({
            "original_url": "https://a.test/x.jpg",
            "cached_url": "https://s.test/x.jpg",
            "created_at": null,
        }))
        .unwrap();
        let absent: CacheEntry = serde_json::from_value(serde_json::json!({
            "original_url": "https://a.test/x.jpg",
            "cached_url": "https://s.test/x.jpg",
        }))
        .unwrap();

        assert_eq!(null.cached_url, "https://s.test/x.jpg");
        assert_eq!(absent.cached_url, "https://s.test/x.jpg");
        assert!(Utc::now() - null.resolved_at < chrono::Duration::minutes(1));
    }

    #[test]
    fn test_fallback_resolution() {
        let resolved = ResolvedImage::fallback("https://example.com/missing.jpg");

        assert_eq!(resolved.url, FALLBACK_IMAGE_PATH);
        assert!(resolved.source.is_fallback());
    }
}
