//! `error_logs` table adapter.

use async_trait::async_trait;

use super::client::SupabaseClient;
use crate::domain::entities::ErrorRecord;
use crate::domain::errors::StorageError;
use crate::domain::ports::ErrorLogPort;

const TABLE: &str = "error_logs";

/// Error log persisted in the `error_logs` table.
#[derive(Debug, Clone)]
pub struct SupabaseErrorLog {
    client: SupabaseClient,
}

impl SupabaseErrorLog {
    /// Creates the adapter.
    #[must_use]
    pub const fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ErrorLogPort for SupabaseErrorLog {
    async fn append(&self, record: &ErrorRecord) -> Result<(), StorageError> {
        let response = self
            .client
            .post(&self.client.rest_url(TABLE))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        SupabaseClient::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ImageLoadError;
    use crate::test_support::serve_once;

    #[tokio::test]
    async fn test_append_posts_record_columns() -> Result<(), Box<dyn std::error::Error>> {
        let (base, request) = serve_once(
            b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await?;
        let log = SupabaseErrorLog::new(SupabaseClient::new(base, "anon")?);
        let error = ImageLoadError::http("https://a.test/x.jpg", 404, 2);

        log.append(&ErrorRecord::from_load_error(&error, "inkdex-test"))
            .await?;

        let request = request.await?;
        assert!(request.starts_with("POST /rest/v1/error_logs"));
        assert!(request.contains("\"type\":\"image_loading\""));
        assert!(request.contains("\"status_code\":404"));
        assert!(request.contains("\"attempt\":2"));
        assert!(request.contains("\"user_agent\":\"inkdex-test\""));
        Ok(())
    }
}
