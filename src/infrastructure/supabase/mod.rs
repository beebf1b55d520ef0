//! Supabase backend: `image_cache` / `error_logs` tables and the image bucket.

pub mod cache_store;
pub mod client;
pub mod error_log;
pub mod object_storage;

pub use cache_store::SupabaseCacheStore;
pub use client::SupabaseClient;
pub use error_log::SupabaseErrorLog;
pub use object_storage::{DEFAULT_BUCKET, SupabaseObjectStorage};
