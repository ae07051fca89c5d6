//! File storage port for uploaded post images.

use async_trait::async_trait;

/// Persists an uploaded image and returns the public URL it is served from.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Rejected upload: {0}")]
    Rejected(String),
}
