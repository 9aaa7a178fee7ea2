use std::{collections::BTreeMap, sync::Arc};

use tokio::{sync::Semaphore, task::JoinSet};

use super::SpotifyClient;
use crate::{
    error::Result,
    types::{PlaylistItem, PlaylistItemsPage, PlaylistResponse},
    utils, warning,
};

/// Largest page size `GET /playlists/{id}/tracks` accepts.
pub const PAGE_LIMIT: u64 = 100;

const PLAYLIST_FIELDS: &str =
    "name,description,followers(total),images,owner(display_name,external_urls)";

impl SpotifyClient {
    /// Fetches the playlist metadata (name, description, owner, images, followers).
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<PlaylistResponse> {
        let path = format!("/playlists/{}", urlencoding::encode(playlist_id));
        self.get_json(&path, &[("fields", PLAYLIST_FIELDS.to_string())])
            .await
    }

    pub async fn get_playlist_items_page(
        &self,
        playlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<PlaylistItemsPage> {
        let path = format!(
            "/playlists/{}/tracks",
            urlencoding::encode(playlist_id)
        );
        self.get_json(
            &path,
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    /// Retrieves every item of a playlist.
    ///
    /// The first page tells the total; the remaining pages are then requested in
    /// parallel. A failing first page fails the whole call, while a failing later
    /// page is logged and skipped, so the result may be shorter than the
    /// reported total. Items keep their playlist order.
    pub async fn get_all_playlist_items(&self, playlist_id: &str) -> Result<Vec<PlaylistItem>> {
        let first = self
            .get_playlist_items_page(playlist_id, 0, PAGE_LIMIT)
            .await?;
        let offsets = utils::remaining_page_offsets(first.total, PAGE_LIMIT);
        let mut items = first.items;

        if offsets.is_empty() {
            return Ok(items);
        }

        let permits = Arc::new(Semaphore::new(self.settings.concurrency));
        let mut tasks = JoinSet::new();

        for offset in offsets {
            let client = self.clone();
            let playlist_id = playlist_id.to_string();
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let page = client
                    .get_playlist_items_page(&playlist_id, offset, PAGE_LIMIT)
                    .await;
                (offset, page)
            });
        }

        // dropping the set aborts pages still pending
        let mut pages = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((offset, Ok(page))) => {
                    pages.insert(offset, page.items);
                }
                Ok((offset, Err(e))) => {
                    warning!("Skipping playlist page at offset {}: {}", offset, e)
                }
                Err(e) => warning!("Task join error: {}", e),
            }
        }

        items.extend(pages.into_values().flatten());
        Ok(items)
    }
}
