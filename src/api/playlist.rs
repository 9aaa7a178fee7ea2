use std::sync::Arc;

use axum::{
    Extension, Form, Json,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use clap::ValueEnum;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::Error,
    management,
    server::AppState,
    types::{ArtistInfo, SortOrder},
    utils, warning,
};

#[derive(Debug, Deserialize)]
pub struct ValidatePlaylistForm {
    #[serde(rename = "playlistUrl", default)]
    pub playlist_url: String,
}

/// Query string shared by the JSON endpoint and the playlist page.
///
/// `order` is kept as raw text: an empty or unknown value sorts descending
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ArtistListQuery {
    pub search: Option<String>,
    pub order: Option<String>,
}

impl ArtistListQuery {
    pub fn order(&self) -> SortOrder {
        self.order
            .as_deref()
            .and_then(|value| SortOrder::from_str(value, true).ok())
            .unwrap_or_default()
    }

    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }

    pub fn apply(&self, artists: &mut Vec<ArtistInfo>) {
        utils::filter_artists(artists, self.search());
        utils::sort_artists(artists, self.order());
    }
}

/// Turns a submitted playlist URL into a redirect to its page.
pub async fn validate_playlist(Form(form): Form<ValidatePlaylistForm>) -> Redirect {
    match utils::extract_playlist_id(&form.playlist_url) {
        Some(id) => Redirect::to(&format!("/playlist/{id}")),
        None => Redirect::to("/?error=invalid-url"),
    }
}

pub async fn playlist_info(
    Path(playlist_id): Path<String>,
    Query(query): Query<ArtistListQuery>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    match management::get_playlist_info(&state.spotify, &playlist_id).await {
        Ok(mut info) => {
            query.apply(&mut info.artists);
            Json(info).into_response()
        }
        Err(e) => error_response(&playlist_id, &e),
    }
}

pub(crate) fn error_status(e: &Error) -> StatusCode {
    if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_GATEWAY
    }
}

fn error_response(playlist_id: &str, e: &Error) -> Response {
    warning!("Failed to load playlist {}: {}", playlist_id, e);
    let status = error_status(e);
    let message = if status == StatusCode::NOT_FOUND {
        "Playlist not found".to_string()
    } else {
        e.to_string()
    };
    (status, Json(json!({ "error": message }))).into_response()
}
