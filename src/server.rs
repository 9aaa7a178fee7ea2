use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{
    Res, api, background::BackgroundRemovalService, config, spotify::SpotifyClient, success,
};

/// Services shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub spotify: SpotifyClient,
    pub background: BackgroundRemovalService,
}

impl AppState {
    pub fn new(spotify: SpotifyClient, background: BackgroundRemovalService) -> Self {
        Self {
            spotify,
            background,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/playlist/{id}", get(api::playlist_page))
        .route("/playlist/{id}/artist/{name}", get(api::artist_page))
        .route("/api/playlist/{id}", get(api::playlist_info))
        .route("/api/validate-playlist", post(api::validate_playlist))
        .route("/api/remove-background", post(api::remove_background))
        .layer(Extension(state))
}

pub async fn start_api_server(state: Arc<AppState>, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    success!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Resolves the bind address: explicit value first, then `SERVER_ADDRESS`.
pub fn resolve_addr(addr: Option<String>) -> String {
    addr.unwrap_or_else(config::server_addr)
}
