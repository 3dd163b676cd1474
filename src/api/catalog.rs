use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::extract::{AccessToken, ValidatedQuery},
    error::{AppError, UpstreamContext},
    spotify::catalog::ARTIST_ALBUM_LIMIT,
    state::SharedState,
    types::{AlbumDetails, ArtistDetails, PlaylistDetails},
};

// The combined lookups fan out concurrently; any failing sub-call fails the
// whole response.

pub async fn playlist(
    State(state): State<SharedState>,
    Path(playlist_id): Path<String>,
    ValidatedQuery(params): ValidatedQuery<AccessToken>,
) -> Result<Json<PlaylistDetails>, AppError> {
    let token = params.access_token.as_str();
    let (playlist, tracks) = tokio::try_join!(
        state.spotify.playlist(token, &playlist_id),
        state.spotify.playlist_tracks(token, &playlist_id),
    )
    .context("Playlist tracks")?;

    Ok(Json(PlaylistDetails { playlist, tracks }))
}

pub async fn artist(
    State(state): State<SharedState>,
    Path(artist_id): Path<String>,
    ValidatedQuery(params): ValidatedQuery<AccessToken>,
) -> Result<Json<ArtistDetails>, AppError> {
    let token = params.access_token.as_str();
    let (artist, albums, top_tracks) = tokio::try_join!(
        state.spotify.artist(token, &artist_id),
        state.spotify.artist_albums(token, &artist_id, ARTIST_ALBUM_LIMIT),
        state.spotify.artist_top_tracks(token, &artist_id),
    )
    .context("Artist")?;

    Ok(Json(ArtistDetails {
        artist,
        albums,
        top_tracks,
    }))
}

pub async fn album(
    State(state): State<SharedState>,
    Path(album_id): Path<String>,
    ValidatedQuery(params): ValidatedQuery<AccessToken>,
) -> Result<Json<AlbumDetails>, AppError> {
    let token = params.access_token.as_str();
    let (album, tracks) = tokio::try_join!(
        state.spotify.album(token, &album_id),
        state.spotify.album_tracks(token, &album_id),
    )
    .context("Album")?;

    Ok(Json(AlbumDetails { album, tracks }))
}
