use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::{config::ConfigError, spotify::UpstreamError, store::StoreError};

/// Error type of every HTTP handler.
///
/// Rendered as `{"detail": "...", "kind": "..."}` so callers can tell a bad
/// parameter from a rejected token or an outage without parsing the message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed request parameter, raised before any handler logic.
    #[error("{0}")]
    Validation(String),

    /// A call against Spotify failed. `context` names the capability, e.g.
    /// `"Search"`, and prefixes the detail message.
    #[error("{context} error: {source}")]
    Upstream {
        context: &'static str,
        status: StatusCode,
        source: UpstreamError,
    },

    #[error("Authentication error: {0}")]
    Config(#[from] ConfigError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream { status, .. } => *status,
            AppError::Config(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::Upstream { source, .. } => source.kind(),
            AppError::Config(_) => "config",
            AppError::Store(_) => "store",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Store(e) => {
                tracing::error!("storage error: {}", e);
                "internal server error".to_string()
            }
            AppError::Config(e) => {
                tracing::error!("configuration error: {}", e);
                self.to_string()
            }
            AppError::Upstream { context, source, .. } => {
                tracing::warn!(context, kind = source.kind(), "upstream call failed: {}", source);
                self.to_string()
            }
            AppError::Validation(_) => self.to_string(),
        };

        let body = Json(json!({
            "detail": detail,
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

/// Attaches route context to upstream failures.
pub trait UpstreamContext<T> {
    /// Reports the failure as `400 Bad Request`.
    fn context(self, context: &'static str) -> Result<T, AppError>;

    /// Reports the failure as `401 Unauthorized`.
    fn unauthorized(self, context: &'static str) -> Result<T, AppError>;
}

impl<T> UpstreamContext<T> for Result<T, UpstreamError> {
    fn context(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|source| AppError::Upstream {
            context,
            status: StatusCode::BAD_REQUEST,
            source,
        })
    }

    fn unauthorized(self, context: &'static str) -> Result<T, AppError> {
        self.map_err(|source| AppError::Upstream {
            context,
            status: StatusCode::UNAUTHORIZED,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable() -> Result<(), UpstreamError> {
        Err(UpstreamError::Unavailable("503 Service Unavailable: down".into()))
    }

    #[test]
    fn upstream_failures_are_client_errors() {
        let err = unavailable().context("Search").unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "upstream_unavailable");
        assert_eq!(err.to_string(), "Search error: 503 Service Unavailable: down");
    }

    #[test]
    fn profile_failures_are_unauthorized() {
        let err = unavailable().unauthorized("Profile").unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn config_and_validation_statuses() {
        let err = AppError::from(ConfigError::Missing("SPOTIFY_CLIENT_ID"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Authentication error:"));

        let err = AppError::Validation("missing field `q`".into());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
