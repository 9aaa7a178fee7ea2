use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info, management,
    spotify::SpotifyClient,
    types::{ArtistTableRow, PlaylistInfo, SortOrder},
    utils,
};

pub async fn playlist(input: String, search: Option<String>, order: SortOrder, json: bool) {
    let Some(playlist_id) = utils::resolve_playlist_id(&input) else {
        error!("Not a Spotify playlist URL or id: {}", input);
    };

    let client = match SpotifyClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching playlist...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = management::get_playlist_info(&client, &playlist_id).await;
    pb.finish_and_clear();

    let mut playlist = match result {
        Ok(playlist) => playlist,
        Err(e) => error!("Failed to load playlist {}. Err: {}", playlist_id, e),
    };

    utils::filter_artists(&mut playlist.artists, search.as_deref().unwrap_or_default());
    utils::sort_artists(&mut playlist.artists, order);

    if json {
        match serde_json::to_string_pretty(&playlist) {
            Ok(out) => println!("{}", out),
            Err(e) => error!("Cannot serialize playlist. Err: {}", e),
        }
        return;
    }

    print_summary(&playlist);
}

fn print_summary(playlist: &PlaylistInfo) {
    info!(
        "{} by {} ({} followers)",
        playlist.name, playlist.owner.name, playlist.followers
    );
    let breakdown = &playlist.content_breakdown;
    info!(
        "{} items: {} tracks, {} episodes, {} other",
        playlist.total_items, breakdown.tracks, breakdown.episodes, breakdown.other
    );

    let table_rows: Vec<ArtistTableRow> = playlist
        .artists
        .iter()
        .enumerate()
        .map(|(idx, artist)| ArtistTableRow {
            rank: idx + 1,
            name: artist.name.clone(),
            items: artist.content_count,
            share: utils::format_percentage(artist.percentage),
            followers: artist.followers,
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
