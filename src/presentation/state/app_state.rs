use std::sync::Arc;

use crate::application::services::ClipService;

#[derive(Clone)]
pub struct AppState {
    pub clip_service: Arc<ClipService>,
}
