//! Attempt outcomes and the retry decision.

use std::time::Duration;

use crate::domain::entities::LoadOptions;
use crate::domain::errors::ImageLoadError;

/// Result of one fetch-and-persist attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The image now lives at this public URL.
    Resolved(String),
    /// The attempt failed; the error is logged before deciding what's next.
    Failed(ImageLoadError),
}

/// What the loop does after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    /// Sleep for `delay`, then run `next_attempt`.
    Retry {
        /// 1-based number of the next attempt.
        next_attempt: u32,
        /// Backoff to wait first.
        delay: Duration,
    },
    /// Attempts are exhausted.
    GiveUp,
}

/// Decides retries from [`LoadOptions`].
#[derive(Debug, Clone, Copy)]
pub struct RetryController {
    options: LoadOptions,
}

impl RetryController {
    /// Creates a controller for one resolution.
    #[must_use]
    pub const fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Returns true if at least one attempt is allowed.
    #[must_use]
    pub const fn allows_attempt(&self) -> bool {
        self.options.max_retries > 0
    }

    /// Step to take after `attempt` failed.
    #[must_use]
    pub fn after_failure(&self, attempt: u32) -> RetryStep {
        if attempt >= self.options.max_retries {
            return RetryStep::GiveUp;
        }
        let next_attempt = attempt + 1;
        RetryStep::Retry {
            next_attempt,
            delay: self.options.backoff_before(next_attempt),
        }
    }
}
