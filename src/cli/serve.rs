use std::sync::Arc;

use crate::{
    background::BackgroundRemovalService,
    error,
    server::{self, AppState},
    spotify::SpotifyClient,
    warning,
};

pub async fn serve(addr: Option<String>, open: bool) {
    let spotify = match SpotifyClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    };

    let background = BackgroundRemovalService::from_env();
    if !background.is_enabled() {
        warning!("BG_REMOVAL_API_KEYS is not set, artist images are served unprocessed");
    }

    let addr = server::resolve_addr(addr);
    if open && webbrowser::open(&format!("http://{addr}/")).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\nhttp://{}/",
            addr
        )
    }

    let state = Arc::new(AppState::new(spotify, background));
    if let Err(e) = server::start_api_server(state, &addr).await {
        error!("Server stopped. Err: {}", e);
    }
}
