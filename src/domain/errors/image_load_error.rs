//! Image load failure types.

use thiserror::Error;

/// Failure of a single resolution attempt.
///
/// Carried from the attempt to the error log; never returned by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ImageLoadError {
    #[error("failed to load image ({status})")]
    Http { url: String, status: u16, attempt: u32 },

    #[error("request failed: {message}")]
    Transport {
        url: String,
        message: String,
        attempt: u32,
    },

    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        url: String,
        timeout_ms: u64,
        attempt: u32,
    },

    #[error("failed to persist image: {message}")]
    Storage {
        url: String,
        message: String,
        attempt: u32,
    },
}

impl ImageLoadError {
    /// Creates an HTTP status error.
    #[must_use]
    pub fn http(url: impl Into<String>, status: u16, attempt: u32) -> Self {
        Self::Http {
            url: url.into(),
            status,
            attempt,
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(url: impl Into<String>, message: impl Into<String>, attempt: u32) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
            attempt,
        }
    }

    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(url: impl Into<String>, timeout: std::time::Duration, attempt: u32) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            attempt,
        }
    }

    /// Creates a storage error.
    #[must_use]
    pub fn storage(url: impl Into<String>, message: impl Into<String>, attempt: u32) -> Self {
        Self::Storage {
            url: url.into(),
            message: message.into(),
            attempt,
        }
    }

    /// Source URL that failed to resolve.
    #[must_use]
    pub fn original_url(&self) -> &str {
        match self {
            Self::Http { url, .. }
            | Self::Transport { url, .. }
            | Self::Timeout { url, .. }
            | Self::Storage { url, .. } => url,
        }
    }

    /// HTTP status, for HTTP-level failures only.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 1-based attempt that produced this error.
    #[must_use]
    pub const fn attempt(&self) -> u32 {
        match self {
            Self::Http { attempt, .. }
            | Self::Transport { attempt, .. }
            | Self::Timeout { attempt, .. }
            | Self::Storage { attempt, .. } => *attempt,
        }
    }
}
