mod auth;
mod playlist;

pub use auth::TokenManager;
pub use playlist::UNKNOWN_ARTIST;
pub use playlist::UNKNOWN_CONTENT;
pub use playlist::aggregate;
pub use playlist::artist_ids;
pub use playlist::get_playlist_info;
