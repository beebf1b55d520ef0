//! Infrastructure layer with external service adapters.

/// Loader assembly for the configured backend.
pub mod backend;
/// Application configuration.
pub mod config;
/// Image resolution (memory tier, retries, fetching).
pub mod image;
/// Filesystem-backed collaborators.
pub mod local;
/// Supabase-backed collaborators.
pub mod supabase;

pub use backend::build_image_loader;
pub use config::{AppConfig, BackendKind, CliArgs, ConfigError, LogLevel, StorageManager};
pub use image::{CacheStats, HttpImageFetcher, ImageLoader, ImageLoaderConfig, MemoryUrlCache};
pub use local::{FileCacheStore, JsonLinesErrorLog, LocalObjectStorage};
pub use supabase::{SupabaseCacheStore, SupabaseClient, SupabaseErrorLog, SupabaseObjectStorage};
