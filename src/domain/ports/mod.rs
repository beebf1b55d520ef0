mod cache_store_port;
mod error_log_port;
mod image_fetcher_port;
mod object_storage_port;

pub use cache_store_port::CacheStorePort;
pub use error_log_port::ErrorLogPort;
pub use image_fetcher_port::{FetchError, FetchedImage, ImageFetcherPort};
pub use object_storage_port::ObjectStoragePort;
