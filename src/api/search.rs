use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    api::extract::ValidatedQuery,
    error::{AppError, UpstreamContext},
    spotify::catalog::RecommendationSeeds,
    state::SharedState,
    types::{Recommendations, SearchResults},
    utils::parse_seed_list,
};

fn default_search_type() -> String {
    "track".to_string()
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(rename = "type", default = "default_search_type")]
    pub kind: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub seed_tracks: Option<String>,
    pub seed_artists: Option<String>,
    pub seed_genres: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub access_token: String,
}

impl RecommendationParams {
    fn seeds(&self) -> RecommendationSeeds {
        RecommendationSeeds {
            tracks: parse_seed_list(self.seed_tracks.as_deref()),
            artists: parse_seed_list(self.seed_artists.as_deref()),
            genres: parse_seed_list(self.seed_genres.as_deref()),
        }
    }
}

pub async fn search(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<SearchParams>,
) -> Result<Json<SearchResults>, AppError> {
    let results = state
        .spotify
        .search(&params.access_token, &params.q, &params.kind, params.limit)
        .await
        .context("Search")?;

    Ok(Json(results))
}

pub async fn recommendations(
    State(state): State<SharedState>,
    ValidatedQuery(params): ValidatedQuery<RecommendationParams>,
) -> Result<Json<Recommendations>, AppError> {
    let recommendations = state
        .spotify
        .recommendations(&params.access_token, &params.seeds(), params.limit)
        .await
        .context("Recommendations")?;

    Ok(Json(recommendations))
}
