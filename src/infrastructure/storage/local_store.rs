use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::domain::ObjectName;

use super::UPLOAD_CHUNK_BYTES;

/// Filesystem-backed store for development and tests. Each bucket maps to a
/// directory under the configured base path.
pub struct LocalMediaStore {
    inner: Arc<LocalFileSystem>,
    bucket: String,
    public_base_url: String,
}

impl LocalMediaStore {
    pub fn new(
        base_path: PathBuf,
        bucket: &str,
        public_base_url: &str,
    ) -> Result<Self, MediaStoreError> {
        let bucket_path = base_path.join(bucket);
        std::fs::create_dir_all(&bucket_path).map_err(MediaStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(bucket_path)
            .map_err(|e| MediaStoreError::Configuration(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(fs),
            bucket: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn download(&self, name: &ObjectName, dest: &Path) -> Result<u64, MediaStoreError> {
        let store_path = StorePath::from(name.as_str());
        let result = self.inner.get(&store_path).await.map_err(|e| match e {
            e @ object_store::Error::NotFound { .. } => MediaStoreError::NotFound(e.to_string()),
            e => MediaStoreError::DownloadFailed(e.to_string()),
        })?;

        let mut file = tokio::fs::File::create(dest).await.map_err(MediaStoreError::Io)?;
        let mut stream = result.into_stream();
        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|e| MediaStoreError::DownloadFailed(e.to_string()))?;
            total_bytes += bytes.len() as u64;
            file.write_all(&bytes).await.map_err(MediaStoreError::Io)?;
        }
        file.flush().await.map_err(MediaStoreError::Io)?;

        Ok(total_bytes)
    }

    async fn upload(&self, name: &ObjectName, src: &Path) -> Result<u64, MediaStoreError> {
        let store_path = StorePath::from(name.as_str());
        let mut file = tokio::fs::File::open(src).await.map_err(MediaStoreError::Io)?;

        // The filesystem has nowhere to carry HTTP headers, so unlike the GCS
        // store this one uploads without content-type or cache-control.
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;
        let mut buf = vec![0u8; UPLOAD_CHUNK_BYTES];

        loop {
            let n = match file.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(MediaStoreError::Io(e));
                }
            };
            total_bytes += n as u64;
            if let Err(e) = upload.put_part(PutPayload::from(buf[..n].to_vec())).await {
                let _ = upload.abort().await;
                return Err(MediaStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        Ok(total_bytes)
    }

    fn public_url(&self, name: &ObjectName) -> String {
        format!("{}/{}/{}", self.public_base_url, self.bucket, name)
    }
}
