//! Local filesystem backend for offline use.

pub mod cache_store;
pub mod error_log;
pub mod object_storage;

pub use cache_store::FileCacheStore;
pub use error_log::JsonLinesErrorLog;
pub use object_storage::LocalObjectStorage;
