use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure of a call against the Spotify Web API or accounts service.
///
/// The variant records *why* the call failed so that handlers do not have to
/// match on message text. The display form is the upstream status followed by
/// the message Spotify sent back, which is what ends up in the response body.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The bearer token, refresh token, authorization code or client
    /// credentials were rejected.
    #[error("{status}: {message}")]
    Auth { status: StatusCode, message: String },

    #[error("{status}: {message}")]
    NotFound { status: StatusCode, message: String },

    /// Any other 4xx, usually a malformed parameter.
    #[error("{status}: {message}")]
    Rejected { status: StatusCode, message: String },

    /// Transport failures, 5xx and 429 responses.
    #[error("{0}")]
    Unavailable(String),

    #[error("malformed upstream response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Classifies a non-success response from its status and raw body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let (code, message) = parse_error_body(body);
        let message = message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("upstream request failed")
                .to_string()
        });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Auth { status, message },
            StatusCode::NOT_FOUND => Self::NotFound { status, message },
            StatusCode::TOO_MANY_REQUESTS => Self::Unavailable(format!("{status}: {message}")),
            s if s.is_server_error() => Self::Unavailable(format!("{status}: {message}")),
            StatusCode::BAD_REQUEST
                if matches!(code.as_deref(), Some("invalid_grant" | "invalid_client")) =>
            {
                Self::Auth { status, message }
            }
            _ => Self::Rejected { status, message },
        }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }

    /// Stable identifier reported in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth { .. } => "upstream_auth",
            Self::NotFound { .. } => "not_found",
            Self::Rejected { .. } => "upstream_rejected",
            Self::Unavailable(_) => "upstream_unavailable",
            Self::Decode(_) => "upstream_unavailable",
        }
    }
}

/// Extracts the error code and message from the two body shapes Spotify uses:
///
/// - Web API: `{"error": {"status": 401, "message": "..."}}`
/// - Accounts: `{"error": "invalid_grant", "error_description": "..."}`
fn parse_error_body(body: &str) -> (Option<String>, Option<String>) {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        let trimmed = body.trim();
        return (None, (!trimmed.is_empty()).then(|| trimmed.to_string()));
    };

    match &json["error"] {
        Value::Object(obj) => (
            None,
            obj.get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        ),
        Value::String(code) => {
            let message = match json["error_description"].as_str() {
                Some(desc) => format!("{code}: {desc}"),
                None => code.clone(),
            };
            (Some(code.clone()), Some(message))
        }
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_api_unauthorized_is_auth() {
        let err = UpstreamError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"status":401,"message":"Invalid access token"}}"#,
        );

        assert!(matches!(err, UpstreamError::Auth { .. }));
        assert_eq!(err.to_string(), "401 Unauthorized: Invalid access token");
        assert_eq!(err.kind(), "upstream_auth");
    }

    #[test]
    fn invalid_grant_is_auth() {
        let err = UpstreamError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid authorization code"}"#,
        );

        assert!(matches!(err, UpstreamError::Auth { .. }));
        assert!(err.to_string().contains("Invalid authorization code"));
    }

    #[test]
    fn other_bad_requests_are_rejected() {
        let err = UpstreamError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"status":400,"message":"Invalid limit"}}"#,
        );
        assert!(matches!(err, UpstreamError::Rejected { .. }));
    }

    #[test]
    fn not_found_and_outages() {
        let err = UpstreamError::from_status(StatusCode::NOT_FOUND, "");
        assert!(matches!(err, UpstreamError::NotFound { .. }));
        assert_eq!(err.to_string(), "404 Not Found: Not Found");

        let err = UpstreamError::from_status(StatusCode::BAD_GATEWAY, "<html>502</html>");
        assert_eq!(err.kind(), "upstream_unavailable");
        assert!(err.to_string().contains("<html>502</html>"));

        let err = UpstreamError::from_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, UpstreamError::Unavailable(_)));
    }
}
