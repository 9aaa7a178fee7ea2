#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Extension, Form, Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use playlist_insights::{
    background::{BackgroundRemovalService, BackgroundRemovalSettings},
    spotify::{SpotifyClient, SpotifySettings},
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, time::sleep};

pub const TOKEN: &str = "test-token";
pub const PLAYLIST_ID: &str = "37i9dQZF1DXcBWIGoYBM5M";
pub const GOOD_KEY: &str = "good-key";
pub const QUOTA_KEY: &str = "quota-key";

/// Serves `app` on an ephemeral port and returns its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A 22 character, alphanumeric artist id.
pub fn artist_id(n: usize) -> String {
    format!("artist{n:016}")
}

pub fn track(name: &str, artists: &[(&str, &str)]) -> Value {
    let artists: Vec<Value> = artists
        .iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect();
    json!({
        "track": {
            "name": name,
            "type": "track",
            "artists": artists,
            "album": { "images": [{ "url": format!("https://img.test/album/{name}") }] },
            "preview_url": format!("https://preview.test/{name}")
        }
    })
}

pub fn episode(name: &str) -> Value {
    json!({ "track": { "name": name, "type": "episode", "preview_url": null } })
}

pub fn unavailable() -> Value {
    json!({ "track": null })
}

#[derive(Default)]
pub struct MockSpotify {
    pub items: Vec<Value>,
    pub failing_offsets: Vec<u64>,
    /// Number of upcoming `/artists` calls answered with 429.
    pub rate_limited: AtomicUsize,
    /// Answer 500 to `/artists` calls asking for more than one id.
    pub fail_batches: bool,
    /// Number of upcoming `/artists` calls answered with 502.
    pub bad_gateway: AtomicUsize,
    /// Number of upcoming playlist metadata calls answered with 401.
    pub rejected_tokens: AtomicUsize,
    /// Answer playlist metadata with 500 after this many milliseconds.
    pub metadata_failure_ms: Option<u64>,
    /// Delay for item pages after the first one and for `/artists`.
    pub response_delay_ms: u64,
    pub artist_requests: Mutex<Vec<Vec<String>>>,
    pub token_requests: AtomicUsize,
    pub page_requests: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl MockSpotify {
    pub fn with_items(items: Vec<Value>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn artist_request_count(&self) -> usize {
        self.artist_requests.lock().unwrap().len()
    }

    async fn delay(&self) {
        if self.response_delay_ms > 0 {
            sleep(Duration::from_millis(self.response_delay_ms)).await;
        }
    }
}

/// Tracks concurrent page and artist requests for as long as it is held.
struct InFlight<'a>(&'a MockSpotify);

impl<'a> InFlight<'a> {
    fn enter(state: &'a MockSpotify) -> Self {
        let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        state.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(state)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

fn take_one(counter: &AtomicUsize) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn token(Extension(state): Extension<Arc<MockSpotify>>) -> Json<Value> {
    state.token_requests.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "access_token": TOKEN, "token_type": "Bearer", "expires_in": 3600 }))
}

async fn playlist(
    headers: HeaderMap,
    Path(id): Path<String>,
    Extension(state): Extension<Arc<MockSpotify>>,
) -> Response {
    if !authorized(&headers) || take_one(&state.rejected_tokens) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if let Some(ms) = state.metadata_failure_ms {
        sleep(Duration::from_millis(ms)).await;
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if id == "missing" {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": { "status": 404 } }))).into_response();
    }
    Json(json!({
        "name": "Mock Mix",
        "description": null,
        "followers": { "total": 42 },
        "images": [{ "url": "https://img.test/playlist" }],
        "owner": {
            "display_name": "mocker",
            "external_urls": { "spotify": "https://open.spotify.com/user/mocker" }
        }
    }))
    .into_response()
}

async fn playlist_tracks(
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<MockSpotify>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id == "missing" {
        return StatusCode::NOT_FOUND.into_response();
    }

    let offset: u64 = query.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: u64 = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(100);
    let _in_flight = InFlight::enter(&state);
    if offset > 0 {
        state.page_requests.fetch_add(1, Ordering::SeqCst);
        state.delay().await;
    }
    if state.failing_offsets.contains(&offset) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let items: Vec<Value> = state
        .items
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect();
    Json(json!({ "items": items, "total": state.items.len(), "next": null })).into_response()
}

async fn artists(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<MockSpotify>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let ids: Vec<String> = query
        .get("ids")
        .map(|ids| ids.split(',').map(String::from).collect())
        .unwrap_or_default();
    state.artist_requests.lock().unwrap().push(ids.clone());
    let _in_flight = InFlight::enter(&state);
    state.delay().await;

    if take_one(&state.rate_limited) {
        return (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "0")]).into_response();
    }
    if take_one(&state.bad_gateway) {
        return StatusCode::BAD_GATEWAY.into_response();
    }
    if state.fail_batches && ids.len() > 1 {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    let artists: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "images": [{ "url": format!("https://img.test/artist/{id}") }],
                "followers": { "total": 1000 }
            })
        })
        .collect();
    Json(json!({ "artists": artists })).into_response()
}

pub fn spotify_router(state: Arc<MockSpotify>) -> Router {
    Router::new()
        .route("/api/token", post(token))
        .route("/v1/playlists/{id}", get(playlist))
        .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
        .route("/v1/artists", get(artists))
        .layer(Extension(state))
}

pub async fn spotify_client(state: Arc<MockSpotify>) -> SpotifyClient {
    let base = spawn(spotify_router(state)).await;
    SpotifyClient::new(SpotifySettings {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        api_url: format!("{base}/v1"),
        token_url: format!("{base}/api/token"),
        concurrency: 2,
        bad_gateway_delay: Duration::from_millis(10),
    })
}

#[derive(Default)]
pub struct MockRemover {
    pub calls: AtomicUsize,
}

async fn remove(
    headers: HeaderMap,
    Extension(state): Extension<Arc<MockRemover>>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);

    let key = headers
        .get("x-rapidapi-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let host_ok = headers
        .get("x-rapidapi-host")
        .is_some_and(|v| v == "remover.test");
    let form_ok = form.get("output_format").map(String::as_str) == Some("url")
        && form.get("to_remove").map(String::as_str) == Some("background");

    if !host_ok || !form_ok {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match key {
        GOOD_KEY => {
            let image_url = form.get("image_url").cloned().unwrap_or_default();
            Json(json!({ "response": { "image_url": format!("{image_url}-nobg") } })).into_response()
        }
        QUOTA_KEY => Json(json!({ "error": "quota exceeded" })).into_response(),
        _ => (StatusCode::FORBIDDEN, Json(json!({ "message": "invalid key" }))).into_response(),
    }
}

pub async fn remover_service(state: Arc<MockRemover>, keys: &[&str]) -> BackgroundRemovalService {
    let base = spawn(
        Router::new()
            .route("/remove", post(remove))
            .layer(Extension(state)),
    )
    .await;
    BackgroundRemovalService::new(BackgroundRemovalSettings {
        api_keys: keys.iter().map(|k| k.to_string()).collect(),
        api_url: format!("{base}/remove"),
        api_host: "remover.test".to_string(),
    })
}
