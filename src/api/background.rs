use std::sync::Arc;

use axum::{
    Extension, Json,
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{server::AppState, warning};

#[derive(Debug, Deserialize)]
pub struct RemoveBackgroundRequest {
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

/// `POST /api/remove-background` with `{"imageUrl": "..."}`.
///
/// The body is parsed by hand so a malformed payload answers 500 while a
/// missing URL answers 400.
pub async fn remove_background(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let request: RemoveBackgroundRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warning!("Invalid remove-background payload: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response();
        }
    };

    let Some(image_url) = request.image_url.filter(|url| !url.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Image URL is required" })),
        )
            .into_response();
    };

    let processed_url = state.background.remove_background(&image_url).await;
    Json(json!({ "processedUrl": processed_url })).into_response()
}
