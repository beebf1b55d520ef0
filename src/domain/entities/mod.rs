//! Domain entity definitions.

mod cached_image;
mod error_record;
mod load_options;

pub use cached_image::{CacheEntry, FALLBACK_IMAGE_PATH, ImageSource, ResolvedImage};
pub use error_record::{ErrorCategory, ErrorRecord};
pub use load_options::{DEFAULT_INITIAL_DELAY, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT, LoadOptions};
