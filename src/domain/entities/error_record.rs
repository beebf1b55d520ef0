//! Diagnostic records for failed image loads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ImageLoadError;

/// Failure domain tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Failure while resolving a remote image.
    ImageLoading,
}

/// One failed attempt, as written to the error log.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(rename = "type")]
    pub category: ErrorCategory,
    #[serde(rename = "url")]
    pub source_url: String,
    #[serde(rename = "error_message")]
    pub message: String,
    /// Present only for HTTP-level failures.
    pub status_code: Option<u16>,
    /// 1-based ordinal of the failed attempt.
    #[serde(rename = "attempt")]
    pub attempt_number: u32,
    #[serde(rename = "user_agent")]
    pub client_context: String,
    #[serde(rename = "timestamp")]
    pub occurred_at: DateTime<Utc>,
}

impl ErrorRecord {
    /// Builds a record describing a failed attempt.
    #[must_use]
    pub fn from_load_error(error: &ImageLoadError, client_context: impl Into<String>) -> Self {
        Self {
            category: ErrorCategory::ImageLoading,
            source_url: error.original_url().to_string(),
            message: error.to_string(),
            status_code: error.status_code(),
            attempt_number: error.attempt(),
            client_context: client_context.into(),
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_failure_keeps_status() {
        let error = ImageLoadError::http("https://example.com/a.jpg", 404, 2);
        let record = ErrorRecord::from_load_error(&error, "inkdex-test");

        assert_eq!(record.category, ErrorCategory::ImageLoading);
        assert_eq!(record.source_url, "https://example.com/a.jpg");
        assert_eq!(record.status_code, Some(404));
        assert_eq!(record.attempt_number, 2);
        assert_eq!(record.client_context, "inkdex-test");
    }

    #[test]
    fn test_transport_failure_has_no_status() {
        let error = ImageLoadError::transport("https://example.com/a.jpg", "connection reset", 1);
        let record = ErrorRecord::from_load_error(&error, "inkdex-test");

        assert_eq!(record.status_code, None);
        assert!(record.message.contains("connection reset"));
    }

    #[test]
    fn test_serializes_to_log_columns() {
        let error = ImageLoadError::http("https://example.com/a.jpg", 500, 1);
        let json = serde_json::to_value(ErrorRecord::from_load_error(&error, "ua")).unwrap();

        assert_eq!(json["type"], "image_loading");
        assert_eq!(json["url"], "https://example.com/a.jpg");
        assert_eq!(json["status_code"], 500);
        assert_eq!(json["attempt"], 1);
        assert_eq!(json["user_agent"], "ua");
        assert!(json["error_message"].is_string());
        assert!(json["timestamp"].is_string());
    }
}
