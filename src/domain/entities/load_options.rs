//! Per-call tuning for image resolution.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::duration_millis;

/// Default per-attempt network deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default maximum number of fetch attempts.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default delay before the first retry.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Retry and timeout settings for one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Deadline for a single fetch attempt, body included.
    #[serde(rename = "timeout_ms", with = "duration_millis")]
    pub timeout: Duration,
    /// Maximum number of fetch attempts.
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    #[serde(rename = "initial_delay_ms", with = "duration_millis")]
    pub initial_delay: Duration,
}

impl LoadOptions {
    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum number of attempts.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the backoff base delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Delay to wait before `attempt` (1-based). Attempt 1 never waits.
    ///
    /// Attempt `n >= 2` waits `initial_delay * 2^(n-2)`, saturating.
    #[must_use]
    pub fn backoff_before(&self, attempt: u32) -> Duration {
        if attempt < 2 || self.initial_delay.is_zero() {
            return Duration::ZERO;
        }
        let Some(factor) = 2u32.checked_pow(attempt - 2) else {
            return Duration::MAX;
        };
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}
