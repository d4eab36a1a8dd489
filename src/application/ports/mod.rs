mod clip_repository;
mod media_store;
mod transcoder;

pub use clip_repository::{ClipRepository, RepositoryError};
pub use media_store::{MediaStore, MediaStoreError};
pub use transcoder::{Transcoder, TranscoderError};
