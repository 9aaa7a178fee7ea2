use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub display_name: Option<String>,
    pub external_urls: Option<ExternalUrls>,
}

/// Playlist metadata as returned by `GET /playlists/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub name: String,
    pub description: Option<String>,
    pub followers: Option<Followers>,
    pub images: Option<Vec<Image>>,
    pub owner: PlaylistOwner,
}

/// One page of `GET /playlists/{id}/tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistItem>,
    pub total: u64,
    pub next: Option<String>,
}

/// A playlist entry. `track` is null for unavailable or removed content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlayableItem>,
}

/// A track or an episode. Local files and episodes carry less data, so
/// everything is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayableItem {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub artists: Option<Vec<SimplifiedArtist>>,
    pub album: Option<AlbumImages>,
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumImages {
    pub images: Option<Vec<Image>>,
}

/// `GET /artists?ids=...`. Unknown ids come back as null entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    pub artists: Vec<Option<FullArtist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullArtist {
    pub id: Option<String>,
    pub images: Option<Vec<Image>>,
    pub followers: Option<Followers>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundRemovalResponse {
    pub response: Option<BackgroundRemovalResult>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundRemovalResult {
    pub image_url: Option<String>,
}

/// Returns the url of the first image, or an empty string.
pub fn first_image_url(images: Option<&Vec<Image>>) -> String {
    images
        .and_then(|images| images.first())
        .map(|image| image.url.clone())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Track,
    Episode,
    Other,
}

impl ContentType {
    pub fn from_kind(kind: Option<&str>) -> Self {
        match kind {
            Some("track") => ContentType::Track,
            Some("episode") => ContentType::Episode,
            _ => ContentType::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub artists: Vec<String>,
    pub image_url: String,
    pub preview_url: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistInfo {
    pub name: String,
    pub id: String,
    pub content_count: u64,
    pub percentage: f64,
    pub content: Vec<ContentInfo>,
    pub image_url: String,
    pub followers: u64,
}

/// Enrichment fetched from `GET /artists`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDetails {
    pub image_url: String,
    pub followers: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBreakdown {
    pub tracks: u64,
    pub episodes: u64,
    pub other: u64,
}

impl ContentBreakdown {
    pub fn record(&mut self, kind: ContentType) {
        match kind {
            ContentType::Track => self.tracks += 1,
            ContentType::Episode => self.episodes += 1,
            ContentType::Other => self.other += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub name: String,
    pub description: String,
    pub followers: u64,
    pub total_items: u64,
    pub image: String,
    pub owner: Owner,
    pub artists: Vec<ArtistInfo>,
    pub content_breakdown: ContentBreakdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub rank: usize,
    pub name: String,
    pub items: u64,
    pub share: String,
    pub followers: u64,
}
