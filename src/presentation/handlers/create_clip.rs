use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::{ClipRequest, ClipServiceError};
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Serialize)]
pub struct CreateClipResponse {
    pub clip_id: String,
    pub url: String,
    pub duration: f64,
    pub message: String,
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_clip_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClipRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected malformed clip request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid request body: {e}"),
                }),
            )
                .into_response();
        }
    };

    match state.clip_service.create_clip(request).await {
        Ok(created) => (
            StatusCode::OK,
            Json(CreateClipResponse {
                clip_id: created.clip_id.to_string(),
                url: created.url,
                duration: created.duration,
                message: "Clip created successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e @ ClipServiceError::Validation(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Clip creation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
