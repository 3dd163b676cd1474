use reqwest::Method;

use crate::{
    spotify::{SpotifyClient, UpstreamError},
    types::{Devices, PlaybackState, StartPlaybackRequest},
};

fn device_param(device_id: Option<&str>) -> Vec<(&'static str, String)> {
    device_id
        .map(|id| vec![("device_id", id.to_string())])
        .unwrap_or_default()
}

impl SpotifyClient {
    /// `GET /me/player/devices`
    pub async fn devices(&self, token: &str) -> Result<Devices, UpstreamError> {
        self.get(token, "/me/player/devices", &[]).await
    }

    /// `GET /me/player`
    ///
    /// Returns `None` when Spotify answers `204 No Content`, which is what it
    /// does while no device is active.
    pub async fn current_playback(
        &self,
        token: &str,
    ) -> Result<Option<PlaybackState>, UpstreamError> {
        self.get_optional(token, "/me/player", &[]).await
    }

    /// `PUT /me/player/play` with a single track.
    pub async fn start_playback(
        &self,
        token: &str,
        device_id: Option<&str>,
        track_uri: &str,
        position_ms: u64,
    ) -> Result<(), UpstreamError> {
        let body = StartPlaybackRequest {
            uris: vec![track_uri.to_string()],
            position_ms,
        };

        self.command(
            Method::PUT,
            token,
            "/me/player/play",
            &device_param(device_id),
            Some(&body),
        )
        .await
    }

    /// `PUT /me/player/pause`
    pub async fn pause_playback(
        &self,
        token: &str,
        device_id: Option<&str>,
    ) -> Result<(), UpstreamError> {
        self.command::<()>(
            Method::PUT,
            token,
            "/me/player/pause",
            &device_param(device_id),
            None,
        )
        .await
    }

    /// `POST /me/player/next`
    pub async fn next_track(&self, token: &str, device_id: Option<&str>) -> Result<(), UpstreamError> {
        self.command::<()>(
            Method::POST,
            token,
            "/me/player/next",
            &device_param(device_id),
            None,
        )
        .await
    }

    /// `POST /me/player/previous`
    pub async fn previous_track(
        &self,
        token: &str,
        device_id: Option<&str>,
    ) -> Result<(), UpstreamError> {
        self.command::<()>(
            Method::POST,
            token,
            "/me/player/previous",
            &device_param(device_id),
            None,
        )
        .await
    }
}
