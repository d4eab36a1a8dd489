use std::path::Path;

use async_trait::async_trait;

use crate::domain::ObjectName;

/// Blob storage for media objects. One instance per bucket.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Copy an object into a local file, returning the number of bytes written.
    async fn download(&self, name: &ObjectName, dest: &Path) -> Result<u64, MediaStoreError>;

    /// Upload a local file as a publicly cacheable audio object, returning
    /// the number of bytes written.
    async fn upload(&self, name: &ObjectName, src: &Path) -> Result<u64, MediaStoreError>;

    /// Deterministic, unsigned address of an object in this store. Assumes
    /// the bucket ACL grants public read.
    fn public_url(&self, name: &ObjectName) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("store configuration failed: {0}")]
    Configuration(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
