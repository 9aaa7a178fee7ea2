//! # CLI Module
//!
//! Command implementations behind the `playlist-insights` binary. Each command
//! builds its services from the environment, reports progress with the
//! crate's console macros and terminates through `error!` on fatal failures.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the web application
//! - [`playlist`] - Prints a playlist's artist breakdown as a table or JSON
//! - [`remove_background`] - Runs one image through the background-removal service
//!
//! ## Usage Patterns
//!
//! ```bash
//! playlist-insights serve --open
//! playlist-insights playlist https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! playlist-insights playlist spotify:playlist:37i9dQZF1DXcBWIGoYBM5M --search daft --order ascending
//! playlist-insights remove-background https://i.scdn.co/image/ab6761610000e5eb...
//! ```

mod background;
mod playlist;
mod serve;

pub use background::remove_background;
pub use playlist::playlist;
pub use serve::serve;
