use std::collections::{HashMap, HashSet};

use crate::{
    error::Result,
    info,
    spotify::SpotifyClient,
    types::{
        ArtistDetails, ArtistInfo, ContentBreakdown, ContentInfo, ContentType, Owner, PlaylistInfo,
        PlaylistItem, PlaylistResponse, first_image_url,
    },
};

pub const UNKNOWN_CONTENT: &str = "Unknown Content";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Fetches a playlist and computes its per-artist share of content.
///
/// Metadata and items are requested concurrently; the artists found in the
/// items are then enriched with images and follower counts.
pub async fn get_playlist_info(client: &SpotifyClient, playlist_id: &str) -> Result<PlaylistInfo> {
    let (meta, items) = tokio::try_join!(
        client.get_playlist(playlist_id),
        client.get_all_playlist_items(playlist_id)
    )?;

    let ids = artist_ids(&items);
    info!(
        "Playlist {}: {} items, {} artists",
        playlist_id,
        items.len(),
        ids.len()
    );

    let details = client.get_artist_details(&ids).await;
    Ok(aggregate(meta, &items, &details))
}

/// Unique artist ids in order of first appearance.
pub fn artist_ids(items: &[PlaylistItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .flat_map(|track| track.artists.iter().flatten())
        .filter_map(|artist| artist.id.clone())
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Builds the analytics for already fetched playlist data.
///
/// `totalItems` counts every fetched entry, including those whose track is
/// null, so percentages are relative to the playlist length rather than to
/// the playable items. Artists are ordered by share, largest first; ties keep
/// the order in which the artists first appear.
pub fn aggregate(
    meta: PlaylistResponse,
    items: &[PlaylistItem],
    details: &HashMap<String, ArtistDetails>,
) -> PlaylistInfo {
    let total_items = items.len() as u64;
    let mut breakdown = ContentBreakdown::default();
    let mut artists: Vec<ArtistInfo> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for track in items.iter().filter_map(|item| item.track.as_ref()) {
        let kind = ContentType::from_kind(track.kind.as_deref());
        breakdown.record(kind);

        let track_artists = track.artists.as_deref().unwrap_or_default();
        let content = ContentInfo {
            name: track
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_CONTENT.to_string()),
            kind,
            artists: track_artists.iter().filter_map(|a| a.name.clone()).collect(),
            image_url: first_image_url(track.album.as_ref().and_then(|a| a.images.as_ref())),
            preview_url: track.preview_url.clone().unwrap_or_default(),
            percentage: 100.0 / total_items as f64,
        };

        for artist in track_artists {
            let Some(id) = artist.id.as_ref() else {
                continue;
            };

            let position = *positions.entry(id.clone()).or_insert_with(|| {
                artists.push(ArtistInfo {
                    name: artist
                        .name
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
                    id: id.clone(),
                    content_count: 0,
                    percentage: 0.0,
                    content: Vec::new(),
                    image_url: String::new(),
                    followers: 0,
                });
                artists.len() - 1
            });

            let entry = &mut artists[position];
            entry.content_count += 1;
            entry.content.push(content.clone());
        }
    }

    for artist in &mut artists {
        artist.percentage = artist.content_count as f64 / total_items as f64 * 100.0;
        if let Some(found) = details.get(&artist.id) {
            artist.image_url = found.image_url.clone();
            artist.followers = found.followers;
        }
    }

    // same order as by percentage, without float comparison
    artists.sort_by(|a, b| b.content_count.cmp(&a.content_count));

    PlaylistInfo {
        name: meta.name,
        description: meta.description.unwrap_or_default(),
        followers: meta.followers.and_then(|f| f.total).unwrap_or(0),
        total_items,
        image: first_image_url(meta.images.as_ref()),
        owner: Owner {
            name: meta.owner.display_name.unwrap_or_default(),
            url: meta
                .owner
                .external_urls
                .and_then(|urls| urls.spotify)
                .unwrap_or_default(),
        },
        artists,
        content_breakdown: breakdown,
    }
}
