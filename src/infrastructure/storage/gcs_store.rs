use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path as StorePath;
use object_store::{
    Attribute, Attributes, MultipartUpload, ObjectStore, PutMultipartOpts, PutPayload,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::domain::ObjectName;

use super::{CLIP_CACHE_CONTROL, CLIP_CONTENT_TYPE, UPLOAD_CHUNK_BYTES};

pub struct GcsMediaStore {
    inner: Arc<dyn ObjectStore>,
    bucket: String,
    public_base_url: String,
}

impl GcsMediaStore {
    /// Credentials come from the ambient environment unless an explicit
    /// service account key path is given.
    pub fn new(
        bucket: &str,
        service_account_path: Option<&str>,
        public_base_url: &str,
    ) -> Result<Self, MediaStoreError> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
        if let Some(path) = service_account_path {
            builder = builder.with_service_account_path(path);
        }
        let store = builder
            .build()
            .map_err(|e| MediaStoreError::Configuration(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
            bucket: bucket.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MediaStore for GcsMediaStore {
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

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, CLIP_CONTENT_TYPE.into());
        attributes.insert(Attribute::CacheControl, CLIP_CACHE_CONTROL.into());

        let mut upload = self
            .inner
            .put_multipart_opts(
                &store_path,
                PutMultipartOpts {
                    attributes,
                    ..Default::default()
                },
            )
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
