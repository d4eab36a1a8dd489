mod create_clip;
mod get_clip;
mod health;
mod list_clips;

use serde::Serialize;

pub use create_clip::{CreateClipResponse, create_clip_handler};
pub use get_clip::get_clip_handler;
pub use health::{SERVICE_NAME, health_handler};
pub use list_clips::list_clips_handler;

/// JSON body for every non-2xx response.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
