//! Error log sink port definition.

use async_trait::async_trait;

use crate::domain::entities::ErrorRecord;
use crate::domain::errors::StorageError;

/// Append-only sink for failure diagnostics.
#[async_trait]
pub trait ErrorLogPort: Send + Sync {
    /// Appends one record.
    async fn append(&self, record: &ErrorRecord) -> Result<(), StorageError>;
}
