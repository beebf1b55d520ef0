//! Naming of migrated images inside object storage.

use chrono::Utc;
use uuid::Uuid;

/// Prefix under which migrated images are stored.
pub const CACHED_PREFIX: &str = "cached";

/// Content type assumed when the source sends none.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Strips parameters such as `; charset=binary` and lowercases.
#[must_use]
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// File extension for a content type, `jpg` when unknown.
#[must_use]
pub fn extension_for(content_type: &str) -> &'static str {
    match media_type(content_type).as_str() {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        _ => "jpg",
    }
}

/// Fresh, collision-resistant object path for a migrated image.
#[must_use]
pub fn cached_object_path(content_type: &str) -> String {
    format!(
        "{CACHED_PREFIX}/{}-{}.{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        extension_for(content_type)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("image/png", "png" ; "png")]
    #[test_case("image/gif", "gif" ; "gif")]
    #[test_case("image/webp", "webp" ; "webp")]
    #[test_case("IMAGE/PNG; charset=binary", "png" ; "params_and_case")]
    #[test_case("image/jpeg", "jpg" ; "jpeg")]
    #[test_case("text/html", "jpg" ; "unknown_defaults_to_jpg")]
    #[test_case("", "jpg" ; "empty")]
    fn test_extension_for(content_type: &str, expected: &str) {
        assert_eq!(extension_for(content_type), expected);
    }

    #[test]
    fn test_paths_are_prefixed_and_unique() {
        let first = cached_object_path("image/png");
        let second = cached_object_path("image/png");

        assert!(first.starts_with("cached/"));
        assert!(first.ends_with(".png"));
        assert_ne!(first, second);
    }
}
