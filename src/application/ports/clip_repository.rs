use async_trait::async_trait;

use crate::domain::{ClipId, ClipRecord};

#[async_trait]
pub trait ClipRepository: Send + Sync {
    /// Write one clip document keyed by its clip id.
    async fn record(&self, clip: &ClipRecord) -> Result<(), RepositoryError>;

    /// All known clips, newest first. Documents that fail to decode are
    /// skipped individually rather than failing the whole listing.
    async fn list(&self) -> Result<Vec<ClipRecord>, RepositoryError>;

    async fn get(&self, id: ClipId) -> Result<ClipRecord, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("clip not found: {0}")]
    NotFound(String),
    #[error("stored clip could not be decoded: {0}")]
    DeserializationFailed(String),
}
