use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    api::extract::ValidatedQuery,
    error::AppError,
    state::SharedState,
    types::{AuthUrlResponse, RefreshedToken, Token},
    utils::mask_token,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshParams {
    pub refresh_token: String,
}

pub async fn login(State(state): State<SharedState>) -> Result<Json<AuthUrlResponse>, AppError> {
    let auth_url = state.token_manager()?.authorize_url()?;
    Ok(Json(AuthUrlResponse { auth_url }))
}

/// Completes the authorization code flow for the code Spotify redirected with.
pub async fn callback(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<CallbackParams>,
) -> Result<Json<Token>, AppError> {
    let manager = state.token_manager()?;
    tracing::debug!(code = %mask_token(&params.code), "exchanging authorization code");

    let token = manager.exchange_code(&params.code).await?;
    Ok(Json(token))
}

pub async fn refresh(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<RefreshParams>,
) -> Result<Json<RefreshedToken>, AppError> {
    let manager = state.token_manager()?;
    tracing::debug!(refresh_token = %mask_token(&params.refresh_token), "refreshing access token");

    Ok(Json(manager.refresh(&params.refresh_token).await?))
}
