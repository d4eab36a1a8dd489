mod gcs_store;
mod local_store;
mod store_factory;

pub use gcs_store::GcsMediaStore;
pub use local_store::LocalMediaStore;
pub use store_factory::MediaStoreFactory;

/// Fixed headers applied to every published clip object.
const CLIP_CONTENT_TYPE: &str = "audio/mpeg";
const CLIP_CACHE_CONTROL: &str = "public, max-age=86400";

/// Part size for multipart uploads. Object stores reject non-final parts
/// below 5 MiB.
const UPLOAD_CHUNK_BYTES: usize = 8 * 1024 * 1024;
