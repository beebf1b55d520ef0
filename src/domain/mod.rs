//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use entities::{CacheEntry, ErrorRecord, ImageSource, LoadOptions, ResolvedImage};
pub use errors::{ImageLoadError, StorageError};
pub use ports::{CacheStorePort, ErrorLogPort, ImageFetcherPort, ObjectStoragePort};
