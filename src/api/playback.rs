use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    api::extract::{AccessToken, ValidatedQuery},
    error::{AppError, UpstreamContext},
    state::SharedState,
    types::{Devices, IdlePlayback, PlaybackCommandResponse, PlaybackStateResponse},
};

#[derive(Debug, Deserialize)]
pub struct PlayParams {
    pub track_uri: String,
    #[serde(default)]
    pub position_ms: u64,
    pub device_id: Option<String>,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct DeviceParams {
    pub device_id: Option<String>,
    pub access_token: String,
}

pub async fn devices(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<AccessToken>,
) -> Result<Json<Devices>, AppError> {
    let devices = state
        .spotify
        .devices(&params.access_token)
        .await
        .context("Devices")?;

    Ok(Json(devices))
}

/// Current playback, or the idle stand-in.
///
/// An inactive player is a normal state, so both an empty upstream answer and
/// an upstream failure are reported as "nothing is playing" with `200 OK`.
pub async fn playback_state(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<AccessToken>,
) -> Json<PlaybackStateResponse> {
    match state.spotify.current_playback(&params.access_token).await {
        Ok(Some(playback)) => Json(PlaybackStateResponse::Active(Box::new(playback))),
        Ok(None) => Json(PlaybackStateResponse::Idle(IdlePlayback::default())),
        Err(e) => {
            tracing::debug!(kind = e.kind(), "playback state unavailable: {}", e);
            Json(PlaybackStateResponse::Idle(IdlePlayback::default()))
        }
    }
}

pub async fn play(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<PlayParams>,
) -> Result<Json<PlaybackCommandResponse>, AppError> {
    state
        .spotify
        .start_playback(
            &params.access_token,
            params.device_id.as_deref(),
            &params.track_uri,
            params.position_ms,
        )
        .await
        .context("Playback")?;

    Ok(Json(PlaybackCommandResponse {
        status: "playing".to_string(),
        position_ms: Some(params.position_ms),
    }))
}

pub async fn pause(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<DeviceParams>,
) -> Result<Json<PlaybackCommandResponse>, AppError> {
    state
        .spotify
        .pause_playback(&params.access_token, params.device_id.as_deref())
        .await
        .context("Pause")?;

    Ok(Json(PlaybackCommandResponse::new("paused")))
}

pub async fn next(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<DeviceParams>,
) -> Result<Json<PlaybackCommandResponse>, AppError> {
    state
        .spotify
        .next_track(&params.access_token, params.device_id.as_deref())
        .await
        .context("Next track")?;

    Ok(Json(PlaybackCommandResponse::new("skipped")))
}

pub async fn previous(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<DeviceParams>,
) -> Result<Json<PlaybackCommandResponse>, AppError> {
    state
        .spotify
        .previous_track(&params.access_token, params.device_id.as_deref())
        .await
        .context("Previous track")?;

    Ok(Json(PlaybackCommandResponse::new("skipped")))
}
