mod clip_service;
mod scratch;

pub use clip_service::{ClipRequest, ClipService, ClipServiceError, CreatedClip};
pub use scratch::ScratchFile;
