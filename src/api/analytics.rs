use axum::{Json, extract::State};

use crate::{
    api::extract::{AccessToken, ValidatedQuery},
    error::AppError,
    management::listening_analytics,
    state::SharedState,
    types::ListeningAnalytics,
};

pub async fn listening_stats(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<AccessToken>,
) -> Result<Json<ListeningAnalytics>, AppError> {
    let analytics = listening_analytics(&state.spotify, &params.access_token).await?;
    Ok(Json(analytics))
}
