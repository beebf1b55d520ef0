//! Domain error types.

mod image_load_error;
mod storage_error;

pub use image_load_error::ImageLoadError;
pub use storage_error::StorageError;
