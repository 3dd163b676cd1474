use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    api::extract::{AccessToken, ValidatedQuery},
    error::{AppError, UpstreamContext},
    state::SharedState,
    types::{
        Artist, CursorPaging, Paging, PlayHistory, SavedTrack, SimplifiedPlaylist, TimeRange,
        Track, UserProfile,
    },
};

fn default_page_limit() -> u32 {
    50
}

fn default_top_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct TopItemsParams {
    #[serde(default)]
    pub time_range: TimeRange,
    #[serde(default = "default_top_limit")]
    pub limit: u32,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    #[serde(default = "default_page_limit")]
    pub limit: u32,
    pub access_token: String,
}

pub async fn profile(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<AccessToken>,
) -> Result<Json<UserProfile>, AppError> {
    let user = state
        .spotify
        .current_user(&params.access_token)
        .await
        .unauthorized("Profile")?;

    Ok(Json(UserProfile::from(user)))
}

pub async fn playlists(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> Result<Json<Paging<SimplifiedPlaylist>>, AppError> {
    let page = state
        .spotify
        .current_user_playlists(&params.access_token, params.limit, params.offset)
        .await
        .context("Playlists")?;

    Ok(Json(page))
}

pub async fn saved_tracks(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> Result<Json<Paging<SavedTrack>>, AppError> {
    let page = state
        .spotify
        .current_user_saved_tracks(&params.access_token, params.limit, params.offset)
        .await
        .context("Saved tracks")?;

    Ok(Json(page))
}

pub async fn top_tracks(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<TopItemsParams>,
) -> Result<Json<Paging<Track>>, AppError> {
    let page = state
        .spotify
        .current_user_top_tracks(&params.access_token, params.time_range, params.limit)
        .await
        .context("Top tracks")?;

    Ok(Json(page))
}

pub async fn top_artists(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<TopItemsParams>,
) -> Result<Json<Paging<Artist>>, AppError> {
    let page = state
        .spotify
        .current_user_top_artists(&params.access_token, params.time_range, params.limit)
        .await
        .context("Top artists")?;

    Ok(Json(page))
}

pub async fn recently_played(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<RecentParams>,
) -> Result<Json<CursorPaging<PlayHistory>>, AppError> {
    let page = state
        .spotify
        .current_user_recently_played(&params.access_token, params.limit)
        .await
        .context("Recently played")?;

    Ok(Json(page))
}
