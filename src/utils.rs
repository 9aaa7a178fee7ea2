use std::{cmp::Ordering, sync::LazyLock};

use regex::Regex;

use crate::types::{ArtistInfo, SortOrder};

/// Length of a base62 Spotify artist id.
pub const ARTIST_ID_LEN: usize = 22;

static PLAYLIST_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"playlist[/:]([a-zA-Z0-9]+)").expect("playlist id pattern is valid")
});

/// Extracts a playlist id from a Spotify playlist URL or URI.
///
/// Both `https://open.spotify.com/playlist/<id>` and `spotify:playlist:<id>`
/// are accepted; anything following the id (query string, path) is ignored.
pub fn extract_playlist_id(input: &str) -> Option<String> {
    PLAYLIST_ID_RE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Accepts either a bare playlist id or anything [`extract_playlist_id`] understands.
pub fn resolve_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(input.to_string());
    }
    extract_playlist_id(input)
}

pub fn is_valid_artist_id(id: &str) -> bool {
    id.len() == ARTIST_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Seconds to wait from a `Retry-After` header value; defaults to one second.
pub fn parse_retry_after(header: Option<&str>) -> u64 {
    header
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(1)
}

/// Offsets of every page after the first one.
pub fn remaining_page_offsets(total: u64, limit: u64) -> Vec<u64> {
    if limit == 0 || total <= limit {
        return Vec::new();
    }
    (1..total.div_ceil(limit)).map(|page| page * limit).collect()
}

pub fn parse_api_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from)
        .collect()
}

/// Keeps the artists whose name contains `query`, ignoring case.
pub fn filter_artists(artists: &mut Vec<ArtistInfo>, query: &str) {
    let query = query.to_lowercase();
    if query.is_empty() {
        return;
    }
    artists.retain(|artist| artist.name.to_lowercase().contains(&query));
}

pub fn sort_artists(artists: &mut [ArtistInfo], order: SortOrder) {
    artists.sort_by(|a, b| {
        let ord: Ordering = a.percentage.total_cmp(&b.percentage);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

/// Finds an artist by the lowercase name used in artist page links.
pub fn find_artist_by_slug<'a>(artists: &'a [ArtistInfo], slug: &str) -> Option<&'a ArtistInfo> {
    let slug = slug.to_lowercase();
    artists.iter().find(|artist| artist.name.to_lowercase() == slug)
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:.2}%")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
