use axum::{Json, extract::State};

use crate::{
    api::extract::ValidatedJson,
    error::AppError,
    state::SharedState,
    store::MAX_LIST,
    types::{StatusCheck, StatusCheckCreate},
};

pub async fn create_status_check(
    State(state): State<SharedState>,
    ValidatedJson(input): ValidatedJson<StatusCheckCreate>,
) -> Result<Json<StatusCheck>, AppError> {
    let status = StatusCheck::new(input.client_name);
    state.db.status_checks().insert_one(&status).await?;
    Ok(Json(status))
}

pub async fn list_status_checks(
    State(state): State<SharedState>,
) -> Result<Json<Vec<StatusCheck>>, AppError> {
    Ok(Json(state.db.status_checks().find(MAX_LIST).await?))
}
