//! # API Module
//!
//! HTTP surface of the dashboard backend. Every route lives under `/api` and
//! falls into one of three groups:
//!
//! - **Status**: root message, health check and status-check records
//!   ([`health`], [`status`])
//! - **Authentication**: authorization URL, code callback and token refresh
//!   ([`auth`])
//! - **Proxy**: profile, search, library, catalog lookups, playback control
//!   and listening analytics. Each of these requires the caller's
//!   `access_token` query parameter and forwards it to Spotify.
//!
//! Malformed or missing parameters are rejected with `422` by the
//! [`extract`] wrappers before any handler logic runs. Upstream failures are
//! mapped by [`crate::error::AppError`].
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let state = Arc::new(AppState::new(config, db));
//! let app = sporldash::api::router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod extract;
pub mod health;
pub mod playback;
pub mod search;
pub mod status;
pub mod user;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::SharedState;

/// Routes relative to the `/api` prefix.
pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route(
            "/status",
            get(status::list_status_checks).post(status::create_status_check),
        )
        // authentication
        .route("/auth/login", get(auth::login))
        .route("/auth/callback", get(auth::callback))
        .route("/auth/refresh", post(auth::refresh))
        // user library
        .route("/user/profile", get(user::profile))
        .route("/user/playlists", get(user::playlists))
        .route("/user/saved-tracks", get(user::saved_tracks))
        .route("/user/top-tracks", get(user::top_tracks))
        .route("/user/top-artists", get(user::top_artists))
        .route("/user/recently-played", get(user::recently_played))
        // catalog
        .route("/search", get(search::search))
        .route("/search/recommendations", get(search::recommendations))
        .route("/playlist/{playlist_id}", get(catalog::playlist))
        .route("/artist/{artist_id}", get(catalog::artist))
        .route("/album/{album_id}", get(catalog::album))
        // player
        .route("/playback/devices", get(playback::devices))
        .route("/playback/state", get(playback::playback_state))
        .route("/playback/play", post(playback::play))
        .route("/playback/pause", post(playback::pause))
        .route("/playback/next", post(playback::next))
        .route("/playback/previous", post(playback::previous))
        // analytics
        .route(
            "/analytics/listening-stats",
            get(analytics::listening_stats),
        )
}

/// Full application router with CORS and request tracing.
pub fn router(state: SharedState) -> Router {
    Router::new()
        // nesting maps the inner "/" to "/api" only
        .route("/api/", get(health::root))
        .nest("/api", api_routes())
        .fallback(fallback_404)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_404() -> StatusCode {
    StatusCode::NOT_FOUND
}
