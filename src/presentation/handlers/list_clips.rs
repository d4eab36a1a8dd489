use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::presentation::state::AppState;

use super::ErrorResponse;

#[tracing::instrument(skip(state))]
pub async fn list_clips_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.clip_service.list_clips().await {
        Ok(clips) => (StatusCode::OK, Json(clips)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list clips");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list clips: {e}"),
                }),
            )
                .into_response()
        }
    }
}
