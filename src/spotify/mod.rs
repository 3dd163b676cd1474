//! # Spotify Integration Module
//!
//! This module is the translation layer between the dashboard backend and the
//! Spotify Web API. Every capability exposed over HTTP maps to one (or, for the
//! combined endpoints, a few) calls made through [`SpotifyClient`].
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers (crate::api)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization URL, code + refresh exchange)
//!     ├── User Library (profile, playlists, saved/top/recent items)
//!     ├── Catalog (search, recommendations, playlist/artist/album lookup)
//!     └── Player (devices, playback state, transport control)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Tokens
//!
//! The client never stores a token. The caller's bearer token is passed to
//! each call and attached as the `Authorization` header of that request only.
//!
//! ## Error Handling
//!
//! Non-success responses and transport failures are translated into
//! [`UpstreamError`] variants. There is no retry and no rate-limit handling;
//! the first failure is returned to the caller.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod player;
pub mod user;

pub use auth::SpotifyOAuth;
pub use error::UpstreamError;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

/// Query parameters of an upstream request.
pub type Params<'a> = [(&'a str, String)];

/// Thin wrapper around a pooled [`reqwest::Client`] bound to the Web API base URL.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
}

impl SpotifyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    fn request(&self, method: Method, token: &str, path: &str, params: &Params<'_>) -> RequestBuilder {
        let url = format!("{base}{path}", base = self.base_url);
        tracing::debug!(%method, %path, "spotify request");

        self.http
            .request(method, url)
            .bearer_auth(token)
            .query(params)
    }

    /// Issues a GET and decodes the JSON body.
    pub(crate) async fn get<T>(&self, token: &str, path: &str, params: &Params<'_>) -> Result<T, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, token, path, params)
            .send()
            .await
            .map_err(UpstreamError::transport)?;

        decode(check(response).await?).await
    }

    /// Issues a GET whose successful answer may be `204 No Content`.
    pub(crate) async fn get_optional<T>(
        &self,
        token: &str,
        path: &str,
        params: &Params<'_>,
    ) -> Result<Option<T>, UpstreamError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, token, path, params)
            .send()
            .await
            .map_err(UpstreamError::transport)?;
        let response = check(response).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await.map_err(UpstreamError::transport)?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    /// Issues a command whose response body is ignored.
    pub(crate) async fn command<B>(
        &self,
        method: Method,
        token: &str,
        path: &str,
        params: &Params<'_>,
        body: Option<&B>,
    ) -> Result<(), UpstreamError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method, token, path, params);
        request = match body {
            Some(body) => request.json(body),
            // the player endpoints reject body-less PUT/POST without a length
            None => request.header(reqwest::header::CONTENT_LENGTH, 0),
        };

        let response = request.send().await.map_err(UpstreamError::transport)?;
        check(response).await?;
        Ok(())
    }
}

/// Passes successful responses through and classifies the rest.
pub(crate) async fn check(response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(%status, "spotify returned an error");
    Err(UpstreamError::from_status(status, &body))
}

pub(crate) async fn decode<T>(response: Response) -> Result<T, UpstreamError>
where
    T: DeserializeOwned,
{
    let body = response.text().await.map_err(UpstreamError::transport)?;
    serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
}
