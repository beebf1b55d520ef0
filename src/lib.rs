//! Inkdex - remote image resolution for a tattoo artist directory.
//!
//! Every artist image URL resolves to something displayable: a cached copy
//! from memory or the cache store, a freshly migrated copy in object storage,
//! or a local fallback placeholder when the source cannot be fetched.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

#[cfg(test)]
mod test_support;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "inkdex";
