use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Persisted records
// ---------------------------------------------------------------------------

/// Token pair issued by a successful authorization-code exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

// ---------------------------------------------------------------------------
// Accounts service
// ---------------------------------------------------------------------------

/// Body of a successful `/api/token` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Token triple returned to the caller after a code exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUrlResponse {
    pub auth_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshedToken {
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Spotify object model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Followers {
    pub href: Option<String>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Raw `/me` payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivateUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub product: Option<String>,
    pub followers: Option<Followers>,
    pub country: Option<String>,
    pub images: Vec<Image>,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

/// Profile projection served by `/user/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub product: String,
    pub is_premium: bool,
    pub followers: u64,
    pub country: String,
    pub images: Vec<Image>,
}

impl From<PrivateUser> for UserProfile {
    fn from(user: PrivateUser) -> Self {
        let product = user.product.unwrap_or_else(|| "free".to_string());
        Self {
            id: user.id,
            display_name: user.display_name.unwrap_or_else(|| "Unknown".to_string()),
            email: user.email,
            is_premium: product == "premium",
            product,
            followers: user.followers.map(|f| f.total).unwrap_or(0),
            country: user.country.unwrap_or_else(|| "US".to_string()),
            images: user.images,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: String,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    pub followers: Option<Followers>,
    pub images: Vec<Image>,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifiedAlbum {
    pub id: Option<String>,
    pub name: String,
    pub album_type: Option<String>,
    pub release_date: Option<String>,
    pub release_date_precision: Option<String>,
    pub total_tracks: Option<u32>,
    pub artists: Vec<SimplifiedArtist>,
    pub images: Vec<Image>,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub album_type: Option<String>,
    pub release_date: Option<String>,
    pub release_date_precision: Option<String>,
    pub total_tracks: Option<u32>,
    pub label: Option<String>,
    pub popularity: Option<u32>,
    pub genres: Vec<String>,
    pub artists: Vec<SimplifiedArtist>,
    pub images: Vec<Image>,
    pub tracks: Option<Paging<SimplifiedTrack>>,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifiedTrack {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<SimplifiedArtist>,
    pub duration_ms: u64,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub explicit: bool,
    pub preview_url: Option<String>,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<SimplifiedArtist>,
    pub album: Option<SimplifiedAlbum>,
    pub duration_ms: u64,
    pub popularity: Option<u32>,
    pub explicit: bool,
    pub is_local: bool,
    pub preview_url: Option<String>,
    pub track_number: Option<u32>,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistTracksRef {
    pub href: Option<String>,
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
    pub snapshot_id: Option<String>,
    pub tracks: PlaylistTracksRef,
    pub images: Option<Vec<Image>>,
    pub owner: PlaylistOwner,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
    pub snapshot_id: Option<String>,
    pub followers: Option<Followers>,
    pub images: Option<Vec<Image>>,
    pub owner: PlaylistOwner,
    pub tracks: Option<Paging<PlaylistTrack>>,
    pub uri: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistTrack {
    pub added_at: Option<String>,
    pub is_local: bool,
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedTrack {
    pub added_at: Option<String>,
    pub track: Track,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayContext {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub uri: Option<String>,
    pub href: Option<String>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayHistory {
    pub track: Track,
    pub played_at: Option<String>,
    pub context: Option<PlayContext>,
}

/// Offset-based page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paging<T> {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self {
            href: None,
            items: Vec::new(),
            limit: 0,
            next: None,
            offset: 0,
            previous: None,
            total: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cursors {
    pub after: Option<String>,
    pub before: Option<String>,
}

/// Cursor-based page of results, used by recently played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPaging<T> {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub cursors: Option<Cursors>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Search results; only the requested categories are present.
///
/// Playlist search pages may contain `null` entries upstream. Categories
/// without a typed page here (episodes, shows, audiobooks) are kept as-is in
/// `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Paging<Track>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artists: Option<Paging<Artist>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub albums: Option<Paging<SimplifiedAlbum>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlists: Option<Paging<Option<SimplifiedPlaylist>>>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationSeed {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub href: Option<String>,
    #[serde(rename = "initialPoolSize")]
    pub initial_pool_size: Option<u64>,
    #[serde(rename = "afterFilteringSize")]
    pub after_filtering_size: Option<u64>,
    #[serde(rename = "afterRelinkingSize")]
    pub after_relinking_size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendations {
    pub seeds: Vec<RecommendationSeed>,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistTopTracks {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_active: bool,
    pub is_private_session: bool,
    pub is_restricted: bool,
    pub volume_percent: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Devices {
    pub devices: Vec<Device>,
}

/// Raw `/me/player` payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackState {
    pub device: Option<Device>,
    pub is_playing: bool,
    pub shuffle_state: Option<bool>,
    pub repeat_state: Option<String>,
    pub timestamp: Option<i64>,
    pub progress_ms: Option<u64>,
    pub currently_playing_type: Option<String>,
    pub item: Option<Track>,
    pub context: Option<PlayContext>,
}

/// Stand-in returned when nothing can be reported as playing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdlePlayback {
    pub is_playing: bool,
    pub device: Option<Device>,
    pub track: Option<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlaybackStateResponse {
    Active(Box<PlaybackState>),
    Idle(IdlePlayback),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRange {
    ShortTerm,
    #[default]
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

// ---------------------------------------------------------------------------
// Combined responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDetails {
    pub playlist: Playlist,
    pub tracks: Paging<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistDetails {
    pub artist: Artist,
    pub albums: Paging<SimplifiedAlbum>,
    pub top_tracks: ArtistTopTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumDetails {
    pub album: Album,
    pub tracks: Paging<SimplifiedTrack>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningStats {
    pub total_unique_artists: usize,
    pub total_genres: usize,
    pub tracks_analyzed: usize,
    pub artists_analyzed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningAnalytics {
    pub top_tracks_short_term: Paging<Track>,
    pub top_tracks_medium_term: Paging<Track>,
    pub top_artists_short_term: Paging<Artist>,
    pub top_artists_medium_term: Paging<Artist>,
    pub recently_played: CursorPaging<PlayHistory>,
    pub stats: ListeningStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackCommandResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_ms: Option<u64>,
}

impl PlaybackCommandResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            position_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartPlaybackRequest {
    pub uris: Vec<String>,
    pub position_ms: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn profile_projection_applies_defaults() {
        let user: PrivateUser = serde_json::from_value(json!({ "id": "u1" })).unwrap();
        let profile = UserProfile::from(user);

        assert_eq!(profile.display_name, "Unknown");
        assert_eq!(profile.product, "free");
        assert!(!profile.is_premium);
        assert_eq!(profile.followers, 0);
        assert_eq!(profile.country, "US");
        assert!(profile.images.is_empty());
    }

    #[test]
    fn profile_projection_flags_premium() {
        let user: PrivateUser = serde_json::from_value(json!({
            "id": "u1",
            "display_name": "Jo",
            "email": "jo@example.com",
            "product": "premium",
            "followers": { "href": null, "total": 12 },
            "country": "DE",
            "images": [{ "url": "https://i.scdn.co/a", "height": 64, "width": 64 }]
        }))
        .unwrap();
        let profile = UserProfile::from(user);

        assert!(profile.is_premium);
        assert_eq!(profile.followers, 12);
        assert_eq!(profile.country, "DE");
        assert_eq!(profile.email.as_deref(), Some("jo@example.com"));
        assert_eq!(profile.images.len(), 1);
    }

    #[test]
    fn idle_playback_serializes_nulls() {
        let body = serde_json::to_value(PlaybackStateResponse::Idle(IdlePlayback::default()))
            .unwrap();
        assert_eq!(
            body,
            json!({ "is_playing": false, "device": null, "track": null })
        );
    }

    #[test]
    fn search_results_tolerate_null_playlists() {
        let results: SearchResults = serde_json::from_value(json!({
            "playlists": { "items": [null, { "id": "p1", "name": "Mix" }], "total": 2 }
        }))
        .unwrap();

        let playlists = results.playlists.unwrap();
        assert_eq!(playlists.items.len(), 2);
        assert!(playlists.items[0].is_none());
        assert!(results.tracks.is_none());
        assert!(results.other.is_empty());
    }

    #[test]
    fn search_results_keep_untyped_categories() {
        let upstream = json!({
            "episodes": { "items": [{ "id": "e1", "name": "Pilot" }], "total": 1 },
            "shows": { "items": [], "total": 0 }
        });

        let results: SearchResults = serde_json::from_value(upstream.clone()).unwrap();
        assert!(results.tracks.is_none());
        assert_eq!(results.other.len(), 2);

        assert_eq!(serde_json::to_value(&results).unwrap(), upstream);
    }

    #[test]
    fn time_range_uses_snake_case() {
        let range: TimeRange = serde_json::from_value(json!("long_term")).unwrap();
        assert_eq!(range, TimeRange::LongTerm);
        assert_eq!(TimeRange::default().as_str(), "medium_term");
        assert!(serde_json::from_value::<TimeRange>(json!("forever")).is_err());
    }
}
