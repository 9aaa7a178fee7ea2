//! Playlist Insights Library
//!
//! This library computes artist share-of-content analytics for Spotify
//! playlists and serves them from a small server-rendered web application.
//! It pages through a playlist's items, groups them by artist, enriches the
//! artists with images and follower counts, and offers a background-removal
//! proxy for artist imagery.
//!
//! # Modules
//!
//! - `api` - HTTP handlers and server-rendered pages
//! - `background` - Background-removal proxy with an in-memory cache
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error type shared by the Spotify and background-removal clients
//! - `management` - Token caching and playlist aggregation
//! - `server` - HTTP server setup
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playlist_insights::{config, management, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> playlist_insights::Res<()> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::from_env()?;
//!     let info = management::get_playlist_info(&client, "37i9dQZF1DXcBWIGoYBM5M").await?;
//!     println!("{} artists", info.artists.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod background;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Boxed error result used at the binary edge (CLI commands, server startup),
/// where library [`Error`]s meet I/O and config failures.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Shared body of the status macros: a colored marker in brackets, then the message.
#[doc(hidden)]
#[macro_export]
macro_rules! __status_line {
  ($print:ident, $marker:expr, $($arg:tt)*) => ({
    use colored::Colorize;
    $print!("[{}] {}", $marker, std::format_args!($($arg)*));
  })
}

/// Progress line on stdout, marked with a blue `o`.
///
/// ```
/// info!("Playlist {}: {} items", playlist_id, items.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ($crate::__status_line!(println, "o".blue().bold(), $($arg)*))
}

/// Completion line on stdout, marked with a green `✓`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ($crate::__status_line!(println, "✓".green().bold(), $($arg)*))
}

/// Recoverable problem, written to stderr with a yellow `!`.
///
/// Skipped pages, rate-limit waits and missing artists are reported this way,
/// so stdout stays clean for `playlist --json`.
///
/// ```
/// warning!("Skipping playlist page at offset {}: {}", offset, e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ($crate::__status_line!(eprintln, "!".yellow().bold(), $($arg)*))
}

/// Fatal error: written to stderr with a red `!`, then exits with status 1.
///
/// Only for the binary; library code returns [`Error`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    $crate::__status_line!(eprintln, "!".red().bold(), $($arg)*);
    std::process::exit(1);
  })
}
