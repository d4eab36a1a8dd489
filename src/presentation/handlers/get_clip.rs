use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::ports::RepositoryError;
use crate::application::services::ClipServiceError;
use crate::domain::ClipId;
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[tracing::instrument(skip(state))]
pub async fn get_clip_handler(
    State(state): State<AppState>,
    Path(clip_id): Path<String>,
) -> impl IntoResponse {
    // An id that does not parse cannot name a stored clip.
    let uuid = match Uuid::parse_str(&clip_id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Clip not found: {clip_id}"),
                }),
            )
                .into_response();
        }
    };

    match state.clip_service.get_clip(ClipId::from_uuid(uuid)).await {
        Ok(clip) => (StatusCode::OK, Json(clip)).into_response(),
        Err(ClipServiceError::Repository(RepositoryError::NotFound(id))) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Clip not found: {id}"),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch clip");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch clip: {e}"),
                }),
            )
                .into_response()
        }
    }
}
