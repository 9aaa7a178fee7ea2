//! # API Module
//!
//! HTTP endpoints and server-rendered pages of Playlist Insights.
//!
//! ## Endpoints
//!
//! ### JSON API
//!
//! - [`health`] - status and version for monitoring
//! - [`playlist_info`] - `GET /api/playlist/{id}`, the full analytics of a
//!   playlist; `search` and `order` query parameters filter and sort the artists
//! - [`validate_playlist`] - `POST /api/validate-playlist`, turns a submitted
//!   playlist URL into a redirect to its page
//! - [`remove_background`] - `POST /api/remove-background`, proxies an image URL
//!   through the background-removal service
//!
//! ### Pages
//!
//! - [`index`] - landing page with the playlist URL form
//! - [`playlist_page`] - playlist header, content breakdown and artist list
//! - [`artist_page`] - one artist's items within the playlist
//!
//! All handlers receive the shared [`crate::server::AppState`] through an
//! `Extension` layer.

mod background;
mod health;
mod pages;
mod playlist;

pub use background::RemoveBackgroundRequest;
pub use background::remove_background;
pub use health::health;
pub use pages::artist_page;
pub use pages::index;
pub use pages::playlist_page;
pub use playlist::ArtistListQuery;
pub use playlist::playlist_info;
pub use playlist::validate_playlist;
