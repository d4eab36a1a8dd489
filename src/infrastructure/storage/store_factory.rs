use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::presentation::config::{StorageProvider, StorageSettings};

use super::gcs_store::GcsMediaStore;
use super::local_store::LocalMediaStore;

pub struct MediaStoreFactory;

impl MediaStoreFactory {
    /// Build a store handle for one bucket according to the configured
    /// provider. Called once per bucket at process start.
    pub fn create(
        settings: &StorageSettings,
        bucket: &str,
    ) -> Result<Arc<dyn MediaStore>, MediaStoreError> {
        match settings.provider {
            StorageProvider::Gcs => {
                let store = GcsMediaStore::new(
                    bucket,
                    settings.gcp_service_account.as_deref(),
                    &settings.public_base_url,
                )?;
                Ok(Arc::new(store))
            }
            StorageProvider::Local => {
                let base = PathBuf::from(&settings.local_path);
                let store = LocalMediaStore::new(base, bucket, &settings.public_base_url)?;
                Ok(Arc::new(store))
            }
        }
    }
}
