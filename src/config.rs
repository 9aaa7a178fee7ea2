//! Configuration management for Playlist Insights.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings, and the
//! background-removal API keys.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::utils;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:4321";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_ARTIST_CONCURRENCY: usize = 3;
pub const DEFAULT_BG_REMOVAL_API_URL: &str = "https://background-removal.p.rapidapi.com/remove";
pub const DEFAULT_BG_REMOVAL_API_HOST: &str = "background-removal.p.rapidapi.com";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `playlist-insights/.env`. A missing file is not
/// an error: every value can also come straight from the process environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/playlist-insights/.env`
/// - macOS: `~/Library/Application Support/playlist-insights/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-insights/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playlist-insights/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn required(key: &str) -> Result<String, String> {
    env::var(key).map_err(|_| format!("{key} must be set"))
}

fn or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Returns the address the web server binds to.
///
/// Reads `SERVER_ADDRESS`, falling back to `127.0.0.1:4321`.
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID used for the client-credentials grant.
///
/// # Errors
///
/// Fails when `SPOTIFY_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_CLIENT_ID")
}

/// Returns the Spotify API client secret used for the client-credentials grant.
///
/// # Errors
///
/// Fails when `SPOTIFY_CLIENT_SECRET` is not set.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Result<String, String> {
    required("SPOTIFY_CLIENT_SECRET")
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Spotify token endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_API_TOKEN_URL)
}

/// Number of artist batches (and playlist pages) requested in parallel.
///
/// Reads `SPOTIFY_ARTIST_CONCURRENCY`; unparsable values fall back to the
/// default and the result is never below one.
pub fn artist_concurrency() -> usize {
    env::var("SPOTIFY_ARTIST_CONCURRENCY")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_ARTIST_CONCURRENCY)
        .max(1)
}

/// Returns the background-removal API keys in the order they are tried.
///
/// Reads the comma-separated `BG_REMOVAL_API_KEYS`. An unset variable yields
/// no keys, which disables background removal.
pub fn bg_removal_api_keys() -> Vec<String> {
    env::var("BG_REMOVAL_API_KEYS")
        .map(|raw| utils::parse_api_keys(&raw))
        .unwrap_or_default()
}

pub fn bg_removal_api_url() -> String {
    or_default("BG_REMOVAL_API_URL", DEFAULT_BG_REMOVAL_API_URL)
}

pub fn bg_removal_api_host() -> String {
    or_default("BG_REMOVAL_API_HOST", DEFAULT_BG_REMOVAL_API_HOST)
}
