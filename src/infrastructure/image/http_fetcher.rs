//! HTTP image fetcher backed by reqwest.

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, trace};

use crate::domain::ports::{FetchError, FetchedImage, ImageFetcherPort};

/// Referrer policy sent with every image request.
pub const REFERRER_POLICY: &str = "no-referrer-when-downgrade";

const REFERRER_POLICY_HEADER: &str = "referrer-policy";

/// Fetches source images over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher identifying itself with `user_agent`.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .referer(false)
            .build()
            .map_err(|e| FetchError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

fn map_reqwest_error(e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Transport(format!("failed to connect: {e}"))
    } else {
        FetchError::Transport(e.to_string())
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let response = self
            .client
            .get(url)
            .header(REFERRER_POLICY_HEADER, REFERRER_POLICY)
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Image request rejected");
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(&e))?;

        trace!(url = %url, size = bytes.len(), "Image body received");

        Ok(FetchedImage {
            bytes,
            content_type,
        })
    }
}
