//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by Playlist
//! Insights. It handles the client-credentials authentication, HTTP
//! communication, rate limiting and the paging/batching needed to read whole
//! playlists and enrich their artists.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, HTTP handlers, aggregation)
//!          ↓
//! Spotify Integration Layer
//!     ├── Request helper (token, 429/502 retry)
//!     ├── Playlist Operations (metadata, paged items)
//!     └── Artist Operations (batched enrichment)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Rate Limiting
//!
//! - **429 Too Many Requests**: waits for the `Retry-After` header (one second
//!   when absent) and retries, up to [`MAX_RETRIES`] times
//! - **502 Bad Gateway**: waits [`SpotifySettings::bad_gateway_delay`] and retries,
//!   with the same bound
//! - **401 Unauthorized**: drops the cached token and retries once
//!
//! ## Concurrency
//!
//! Playlist pages and artist batches are fetched in parallel, never more than
//! [`SpotifySettings::concurrency`] at a time.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - client-credentials grant
//! - `GET /playlists/{id}` - playlist metadata
//! - `GET /playlists/{id}/tracks` - paged playlist items
//! - `GET /artists` - up to 50 artists per request
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = SpotifyClient::from_env()?;
//! let playlist = client.get_playlist("37i9dQZF1DXcBWIGoYBM5M").await?;
//! let items = client.get_all_playlist_items("37i9dQZF1DXcBWIGoYBM5M").await?;
//! ```

pub mod artists;
pub mod playlist;

use std::{sync::Arc, time::Duration};

use reqwest::{Client, StatusCode, header::RETRY_AFTER};
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    config,
    error::{Error, Result},
    management::TokenManager,
    utils, warning,
};

/// Retries granted to a single request for 429 and 502 responses.
pub const MAX_RETRIES: u32 = 3;
/// Default wait before retrying a 502 response.
pub const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: String,
    pub api_url: String,
    pub token_url: String,
    /// Upper bound on parallel requests for pages and artist batches.
    pub concurrency: usize,
    pub bad_gateway_delay: Duration,
}

impl SpotifySettings {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: config::spotify_client_id().map_err(Error::Config)?,
            client_secret: config::spotify_client_secret().map_err(Error::Config)?,
            api_url: config::spotify_apiurl(),
            token_url: config::spotify_apitoken_url(),
            concurrency: config::artist_concurrency(),
            bad_gateway_delay: BAD_GATEWAY_DELAY,
        })
    }
}

/// Spotify Web API client. Clones share the HTTP connection pool and the token cache.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    settings: Arc<SpotifySettings>,
    http: Client,
    tokens: Arc<Mutex<TokenManager>>,
}

impl SpotifyClient {
    pub fn new(mut settings: SpotifySettings) -> Self {
        settings.api_url = settings.api_url.trim_end_matches('/').to_string();
        settings.concurrency = settings.concurrency.max(1);
        Self {
            settings: Arc::new(settings),
            http: Client::new(),
            tokens: Arc::new(Mutex::new(TokenManager::new())),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SpotifySettings::from_env()?))
    }

    async fn access_token(&self) -> Result<String> {
        let mut tokens = self.tokens.lock().await;
        tokens
            .get_valid_token(
                &self.http,
                &self.settings.token_url,
                &self.settings.client_id,
                &self.settings.client_secret,
            )
            .await
    }

    /// Authenticated GET against the Web API, decoding the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.settings.api_url, path);
        let mut retries = 0;
        let mut reauthorized = false;

        loop {
            let token = self.access_token().await?;
            let response = self
                .http
                .get(&url)
                .bearer_auth(token)
                .query(query)
                .send()
                .await?;

            match response.status() {
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after = utils::parse_retry_after(
                        response
                            .headers()
                            .get(RETRY_AFTER)
                            .and_then(|v| v.to_str().ok()),
                    );
                    if retries >= MAX_RETRIES {
                        return Err(Error::RateLimited { retry_after });
                    }
                    warning!("Rate limited on {}, retrying in {}s", path, retry_after);
                    sleep(Duration::from_secs(retry_after)).await;
                    retries += 1;
                }
                StatusCode::BAD_GATEWAY => {
                    if retries >= MAX_RETRIES {
                        return Err(Error::Status(StatusCode::BAD_GATEWAY));
                    }
                    warning!("Bad gateway on {}, retrying", path);
                    sleep(self.settings.bad_gateway_delay).await;
                    retries += 1;
                }
                StatusCode::UNAUTHORIZED if !reauthorized => {
                    self.tokens.lock().await.invalidate();
                    reauthorized = true;
                }
                status if !status.is_success() => return Err(Error::Status(status)),
                _ => return Ok(response.json::<T>().await?),
            }
        }
    }
}
