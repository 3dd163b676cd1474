use crate::{
    spotify::{SpotifyClient, UpstreamError},
    types::{
        Artist, CursorPaging, Paging, PlayHistory, PrivateUser, SavedTrack, SimplifiedPlaylist,
        TimeRange, Track,
    },
};

impl SpotifyClient {
    /// `GET /me`
    pub async fn current_user(&self, token: &str) -> Result<PrivateUser, UpstreamError> {
        self.get(token, "/me", &[]).await
    }

    /// Retrieves a page of playlists owned or followed by the current user.
    ///
    /// # Arguments
    ///
    /// * `token` - The caller's access token (needs `playlist-read-private`
    ///   for private playlists)
    /// * `limit` - Page size (1-50)
    /// * `offset` - Index of the first playlist to return
    ///
    /// # Returns
    ///
    /// - `Ok(Paging<SimplifiedPlaylist>)` - The page plus `total` and `next`
    ///   for further paging
    /// - `Err(UpstreamError)` - Upstream or transport failure
    ///
    /// # Example
    ///
    /// ```
    /// let first = spotify.current_user_playlists(token, 50, 0).await?;
    /// if first.next.is_some() {
    ///     let second = spotify.current_user_playlists(token, 50, 50).await?;
    /// }
    /// ```
    pub async fn current_user_playlists(
        &self,
        token: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Paging<SimplifiedPlaylist>, UpstreamError> {
        self.get(
            token,
            "/me/playlists",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// Retrieves a page of the user's saved ("liked") tracks.
    ///
    /// Same paging contract as
    /// [`current_user_playlists`](Self::current_user_playlists); each item
    /// carries the `added_at` timestamp next to the track.
    pub async fn current_user_saved_tracks(
        &self,
        token: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Paging<SavedTrack>, UpstreamError> {
        self.get(
            token,
            "/me/tracks",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// Retrieves the user's top tracks over `time_range`.
    ///
    /// # Arguments
    ///
    /// * `token` - The caller's access token (needs `user-top-read`)
    /// * `time_range` - Roughly four weeks, six months or several years
    /// * `limit` - Page size (1-50)
    ///
    /// # Returns
    ///
    /// A [`Paging`] of full [`Track`] objects ordered by affinity.
    pub async fn current_user_top_tracks(
        &self,
        token: &str,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Paging<Track>, UpstreamError> {
        self.get(
            token,
            "/me/top/tracks",
            &[
                ("time_range", time_range.as_str().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// `GET /me/top/artists`
    pub async fn current_user_top_artists(
        &self,
        token: &str,
        time_range: TimeRange,
        limit: u32,
    ) -> Result<Paging<Artist>, UpstreamError> {
        self.get(
            token,
            "/me/top/artists",
            &[
                ("time_range", time_range.as_str().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Retrieves the most recently played tracks.
    ///
    /// Unlike the other library calls this endpoint pages by cursor, so the
    /// result is a [`CursorPaging`] and carries no `offset`.
    pub async fn current_user_recently_played(
        &self,
        token: &str,
        limit: u32,
    ) -> Result<CursorPaging<PlayHistory>, UpstreamError> {
        self.get(
            token,
            "/me/player/recently-played",
            &[("limit", limit.to_string())],
        )
        .await
    }
}
