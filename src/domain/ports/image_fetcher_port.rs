//! Remote image fetch port definition.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Body and metadata of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    /// Raw response body.
    pub bytes: Bytes,
    /// Value of the `Content-Type` header, if any.
    pub content_type: Option<String>,
}

/// Why a fetch did not produce a body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The source answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),
    /// The request never completed.
    #[error("{0}")]
    Transport(String),
    /// The client's own deadline expired.
    #[error("request timed out")]
    Timeout,
}

/// Port issuing a single GET for an image.
///
/// Implementations do not retry; the loader owns retries and the deadline.
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Fetches `url` and reads the whole body.
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Scripted reply for one fetch call.
    #[derive(Debug, Clone)]
    pub enum MockReply {
        Ok(&'static [u8], Option<&'static str>),
        Status(u16),
        Transport(&'static str),
        /// Never completes.
        Hang,
        /// Succeeds after `Duration`.
        Slow(Duration, &'static [u8], Option<&'static str>),
    }

    /// Fetcher replaying a script, recording when each call happened.
    pub struct MockImageFetcher {
        script: Mutex<VecDeque<MockReply>>,
        fallback: MockReply,
        calls: Mutex<Vec<(String, Instant)>>,
    }

    impl MockImageFetcher {
        /// Replies with `reply` to every call.
        pub fn always(reply: MockReply) -> Self {
            Self::scripted(Vec::new(), reply)
        }

        /// Plays `script` in order, then `fallback` forever.
        pub fn scripted(script: Vec<MockReply>, fallback: MockReply) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        pub fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().iter().map(|(_, at)| *at).collect()
        }

        pub fn called_urls(&self) -> Vec<String> {
            self.calls.lock().iter().map(|(url, _)| url.clone()).collect()
        }
    }

    #[async_trait]
    impl ImageFetcherPort for MockImageFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
            self.calls.lock().push((url.to_string(), Instant::now()));
            let reply = self
                .script
                .lock()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone());

            match reply {
                MockReply::Ok(bytes, content_type) => Ok(FetchedImage {
                    bytes: Bytes::from_static(bytes),
                    content_type: content_type.map(String::from),
                }),
                MockReply::Status(status) => Err(FetchError::Status(status)),
                MockReply::Transport(message) => Err(FetchError::Transport(message.to_string())),
                MockReply::Hang => std::future::pending().await,
                MockReply::Slow(delay, bytes, content_type) => {
                    tokio::time::sleep(delay).await;
                    Ok(FetchedImage {
                        bytes: Bytes::from_static(bytes),
                        content_type: content_type.map(String::from),
                    })
                }
            }
        }
    }
}
