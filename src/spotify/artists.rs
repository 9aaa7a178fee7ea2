use std::collections::HashMap;

use tokio::task::JoinSet;

use super::SpotifyClient;
use crate::{
    error::{Error, Result},
    types::{ArtistDetails, FullArtist, SeveralArtistsResponse, first_image_url},
    utils, warning,
};

/// Most ids `GET /artists` accepts in one request.
pub const ARTIST_BATCH_SIZE: usize = 50;

impl SpotifyClient {
    /// Retrieves up to [`ARTIST_BATCH_SIZE`] artists in one request.
    ///
    /// Ids Spotify does not know are left out of the result.
    pub async fn get_several_artists(&self, ids: &[String]) -> Result<Vec<FullArtist>> {
        let res: SeveralArtistsResponse = self
            .get_json("/artists", &[("ids", ids.join(","))])
            .await?;
        Ok(res.artists.into_iter().flatten().collect())
    }

    /// Fetches image and follower count for every given artist id.
    ///
    /// Every input id gets an entry; anything that could not be resolved maps to
    /// [`ArtistDetails::default`].
    ///
    /// # Batching
    ///
    /// Ids that are not 22 alphanumeric characters are never sent. Valid ids are
    /// split into batches of [`ARTIST_BATCH_SIZE`], and batches run in waves of
    /// `concurrency`, each wave completing before the next starts.
    ///
    /// # Failure Handling
    ///
    /// - A batch still rate limited after the request retries is given defaults
    /// - A batch failing for any other reason is retried one artist per request,
    ///   in parallel; each failing artist is given the default
    pub async fn get_artist_details(&self, ids: &[String]) -> HashMap<String, ArtistDetails> {
        let (valid, invalid): (Vec<String>, Vec<String>) = ids
            .iter()
            .cloned()
            .partition(|id| utils::is_valid_artist_id(id));

        let mut details: HashMap<String, ArtistDetails> = invalid
            .into_iter()
            .map(|id| (id, ArtistDetails::default()))
            .collect();

        let batches: Vec<Vec<String>> = valid
            .chunks(ARTIST_BATCH_SIZE)
            .map(<[String]>::to_vec)
            .collect();

        for wave in batches.chunks(self.settings.concurrency) {
            let mut tasks = JoinSet::new();
            for batch in wave {
                let client = self.clone();
                let batch = batch.clone();
                tasks.spawn(async move { client.process_artist_batch(batch).await });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(batch_details) => details.extend(batch_details),
                    Err(e) => warning!("Task join error: {}", e),
                }
            }
        }

        for id in &valid {
            details.entry(id.clone()).or_default();
        }

        details
    }

    async fn process_artist_batch(&self, batch: Vec<String>) -> Vec<(String, ArtistDetails)> {
        match self.get_several_artists(&batch).await {
            Ok(artists) => artists.iter().filter_map(details_of).collect(),
            Err(Error::RateLimited { retry_after }) => {
                warning!(
                    "Artist batch of {} still rate limited (retry after {}s), using defaults",
                    batch.len(),
                    retry_after
                );
                batch
                    .into_iter()
                    .map(|id| (id, ArtistDetails::default()))
                    .collect()
            }
            Err(e) => {
                warning!("Artist batch failed ({}), fetching artists one by one", e);
                self.fetch_artists_individually(batch).await
            }
        }
    }

    async fn fetch_artists_individually(&self, ids: Vec<String>) -> Vec<(String, ArtistDetails)> {
        let mut tasks = JoinSet::new();
        for id in ids {
            let client = self.clone();
            tasks.spawn(async move {
                let fetched = client.get_several_artists(std::slice::from_ref(&id)).await;
                match fetched.ok().and_then(|artists| artists.into_iter().next()) {
                    Some(artist) => details_of(&artist).unwrap_or((id, ArtistDetails::default())),
                    None => (id, ArtistDetails::default()),
                }
            });
        }

        let mut details = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(entry) => details.push(entry),
                Err(e) => warning!("Task join error: {}", e),
            }
        }
        details
    }
}

fn details_of(artist: &FullArtist) -> Option<(String, ArtistDetails)> {
    let id = artist.id.clone()?;
    Some((
        id,
        ArtistDetails {
            image_url: first_image_url(artist.images.as_ref()),
            followers: artist
                .followers
                .as_ref()
                .and_then(|f| f.total)
                .unwrap_or(0),
        },
    ))
}
