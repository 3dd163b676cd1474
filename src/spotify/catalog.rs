use crate::{
    spotify::{SpotifyClient, UpstreamError},
    types::{
        Album, Artist, ArtistTopTracks, Paging, Playlist, PlaylistTrack, Recommendations,
        SearchResults, SimplifiedAlbum, SimplifiedTrack,
    },
};

/// Market used for artist top tracks.
pub const TOP_TRACKS_MARKET: &str = "US";

/// Number of albums fetched for an artist page.
pub const ARTIST_ALBUM_LIMIT: u32 = 20;

/// Seed lists for a recommendation request.
///
/// Each list is sent comma-joined; empty lists are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationSeeds {
    pub tracks: Vec<String>,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
}

/// Builds `/{collection}/{id}{suffix}` with `id` encoded as one path segment.
///
/// Ids arrive percent-decoded from the router, so a `/`, `?` or `#` inside an
/// id must not be allowed to reshape the upstream path or query.
pub(crate) fn resource_path(collection: &str, id: &str, suffix: &str) -> String {
    format!("/{collection}/{}{suffix}", urlencoding::encode(id))
}

impl SpotifyClient {
    /// `GET /search`
    ///
    /// `kind` is passed through unchanged, so comma-separated types such as
    /// `track,artist` work the same way they do upstream.
    pub async fn search(
        &self,
        token: &str,
        query: &str,
        kind: &str,
        limit: u32,
    ) -> Result<SearchResults, UpstreamError> {
        self.get(
            token,
            "/search",
            &[
                ("q", query.to_string()),
                ("type", kind.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Generates recommendations from up to five seeds per kind.
    ///
    /// # Arguments
    ///
    /// * `token` - The caller's access token
    /// * `seeds` - Track, artist and genre seeds, already truncated by the caller
    /// * `limit` - Number of recommended tracks (1-100)
    ///
    /// # Returns
    ///
    /// - `Ok(Recommendations)` - The seeds as Spotify resolved them plus the tracks
    /// - `Err(UpstreamError::Rejected)` - No seed at all, or an unknown seed id
    ///
    /// # Example
    ///
    /// ```
    /// let seeds = RecommendationSeeds {
    ///     genres: vec!["house".into()],
    ///     ..Default::default()
    /// };
    /// let recs = spotify.recommendations(token, &seeds, 20).await?;
    /// ```
    pub async fn recommendations(
        &self,
        token: &str,
        seeds: &RecommendationSeeds,
        limit: u32,
    ) -> Result<Recommendations, UpstreamError> {
        let mut params = Vec::with_capacity(4);
        for (name, values) in [
            ("seed_tracks", &seeds.tracks),
            ("seed_artists", &seeds.artists),
            ("seed_genres", &seeds.genres),
        ] {
            if !values.is_empty() {
                params.push((name, values.join(",")));
            }
        }
        params.push(("limit", limit.to_string()));

        self.get(token, "/recommendations", &params).await
    }

    /// Retrieves the metadata of one playlist.
    ///
    /// The embedded `tracks` page is only the first slice Spotify returns; the
    /// playlist page of the dashboard pairs this call with
    /// [`playlist_tracks`](Self::playlist_tracks).
    ///
    /// # Arguments
    ///
    /// * `token` - The caller's access token
    /// * `playlist_id` - Spotify playlist id, sent as a single encoded path segment
    ///
    /// # Returns
    ///
    /// - `Ok(Playlist)` - The playlist object
    /// - `Err(UpstreamError::NotFound)` - Unknown or inaccessible playlist
    /// - `Err(UpstreamError)` - Any other upstream or transport failure
    pub async fn playlist(&self, token: &str, playlist_id: &str) -> Result<Playlist, UpstreamError> {
        self.get(token, &resource_path("playlists", playlist_id, ""), &[])
            .await
    }

    /// Retrieves the first page of items of a playlist.
    ///
    /// # Arguments
    ///
    /// * `token` - The caller's access token
    /// * `playlist_id` - Spotify playlist id
    ///
    /// # Returns
    ///
    /// A [`Paging`] of [`PlaylistTrack`] entries with Spotify's default page
    /// size. Entries whose track has been removed carry `track: null`.
    ///
    /// # Example
    ///
    /// ```
    /// let (playlist, tracks) = tokio::try_join!(
    ///     spotify.playlist(token, "37i9dQZF1DXcBWIGoYBM5M"),
    ///     spotify.playlist_tracks(token, "37i9dQZF1DXcBWIGoYBM5M"),
    /// )?;
    /// ```
    pub async fn playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Paging<PlaylistTrack>, UpstreamError> {
        self.get(token, &resource_path("playlists", playlist_id, "/tracks"), &[])
            .await
    }

    /// `GET /artists/{id}`
    pub async fn artist(&self, token: &str, artist_id: &str) -> Result<Artist, UpstreamError> {
        self.get(token, &resource_path("artists", artist_id, ""), &[])
            .await
    }

    /// Retrieves a page of an artist's albums.
    ///
    /// # Arguments
    ///
    /// * `token` - The caller's access token
    /// * `artist_id` - Spotify artist id
    /// * `limit` - Page size (1-50); the artist page uses [`ARTIST_ALBUM_LIMIT`]
    ///
    /// # Returns
    ///
    /// - `Ok(Paging<SimplifiedAlbum>)` - Albums, singles and compilations, newest
    ///   first as ordered by Spotify
    /// - `Err(UpstreamError)` - Upstream or transport failure
    pub async fn artist_albums(
        &self,
        token: &str,
        artist_id: &str,
        limit: u32,
    ) -> Result<Paging<SimplifiedAlbum>, UpstreamError> {
        self.get(
            token,
            &resource_path("artists", artist_id, "/albums"),
            &[("limit", limit.to_string())],
        )
        .await
    }

    /// Retrieves an artist's most popular tracks in [`TOP_TRACKS_MARKET`].
    ///
    /// Spotify requires a market for this endpoint and returns at most ten
    /// tracks.
    pub async fn artist_top_tracks(
        &self,
        token: &str,
        artist_id: &str,
    ) -> Result<ArtistTopTracks, UpstreamError> {
        self.get(
            token,
            &resource_path("artists", artist_id, "/top-tracks"),
            &[("market", TOP_TRACKS_MARKET.to_string())],
        )
        .await
    }

    /// `GET /albums/{id}`
    pub async fn album(&self, token: &str, album_id: &str) -> Result<Album, UpstreamError> {
        self.get(token, &resource_path("albums", album_id, ""), &[])
            .await
    }

    /// Retrieves the first page of an album's tracks.
    ///
    /// # Arguments
    ///
    /// * `token` - The caller's access token
    /// * `album_id` - Spotify album id
    ///
    /// # Returns
    ///
    /// A [`Paging`] of [`SimplifiedTrack`]s in disc and track order.
    pub async fn album_tracks(
        &self,
        token: &str,
        album_id: &str,
    ) -> Result<Paging<SimplifiedTrack>, UpstreamError> {
        self.get(token, &resource_path("albums", album_id, "/tracks"), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_path_keeps_plain_ids() {
        assert_eq!(
            resource_path("artists", "0OdUWJ0sBjDrqHygGUXeCF", "/top-tracks"),
            "/artists/0OdUWJ0sBjDrqHygGUXeCF/top-tracks"
        );
    }

    #[test]
    fn resource_path_encodes_reserved_characters() {
        assert_eq!(
            resource_path("albums", "../me?x=1#y", "/tracks"),
            "/albums/..%2Fme%3Fx%3D1%23y/tracks"
        );
    }
}
