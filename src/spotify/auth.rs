use chrono::Utc;
use reqwest::Client;
use url::Url;

use crate::{
    config::{ClientCredentials, Config, ConfigError},
    spotify::{UpstreamError, check, decode},
    types::{RefreshedToken, Token, TokenResponse},
};

/// Permissions requested from every user.
pub const SCOPES: [&str; 8] = [
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-private",
    "streaming",
    "playlist-read-private",
    "user-library-read",
    "user-read-recently-played",
    "user-top-read",
];

/// Returns the space-delimited scope string sent to the authorization endpoint.
pub fn scope() -> String {
    SCOPES.join(" ")
}

/// Client for the Spotify accounts service using the authorization code flow
/// with a confidential client.
///
/// A value is built per request from [`Config`], so a deployment without
/// client credentials still serves every proxy route and only fails the auth
/// routes.
#[derive(Debug, Clone)]
pub struct SpotifyOAuth {
    http: Client,
    credentials: ClientCredentials,
    authorize_url: String,
    token_url: String,
}

impl SpotifyOAuth {
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the client id, client secret or
    /// redirect URI is not configured.
    pub fn from_config(config: &Config, http: Client) -> Result<Self, ConfigError> {
        Ok(Self {
            http,
            credentials: config.client_credentials()?,
            authorize_url: config.spotify_auth_url.clone(),
            token_url: config.spotify_token_url.clone(),
        })
    }

    /// Builds the URL the user has to visit to grant access.
    ///
    /// The result depends only on configuration, so repeated calls return the
    /// same URL.
    ///
    /// # Example
    ///
    /// ```
    /// let url = oauth.authorize_url()?;
    /// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&redirect_uri=...&scope=...
    /// ```
    pub fn authorize_url(&self) -> Result<String, ConfigError> {
        let url = Url::parse_with_params(
            &self.authorize_url,
            &[
                ("client_id", self.credentials.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
                ("scope", scope().as_str()),
            ],
        )
        .map_err(|e| ConfigError::Invalid {
            name: "SPOTIFY_API_AUTH_URL",
            reason: e.to_string(),
        })?;

        Ok(url.into())
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// Completes the authorization code flow by posting the code received on
    /// the callback to the token endpoint. The provider decides whether the
    /// code is valid; an expired, reused or malformed code comes back as
    /// [`UpstreamError::Auth`].
    ///
    /// # Returns
    ///
    /// The access token, refresh token and the absolute expiry
    /// (`now + expires_in`, epoch seconds).
    pub async fn exchange_code(&self, code: &str) -> Result<Token, UpstreamError> {
        let token = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.credentials.redirect_uri.as_str()),
            ])
            .await?;

        let refresh_token = token
            .refresh_token
            .ok_or_else(|| UpstreamError::Decode("missing refresh_token".to_string()))?;

        Ok(Token {
            access_token: token.access_token,
            refresh_token,
            expires_at: Utc::now().timestamp() + token.expires_in,
        })
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// Uses the OAuth 2.0 "refresh_token" grant type. A rotated refresh token, if Spotify sends one, is not
    /// passed on.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<RefreshedToken, UpstreamError> {
        let token = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        Ok(RefreshedToken {
            access_token: token.access_token,
        })
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, UpstreamError> {
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(form)
            .send()
            .await
            .map_err(UpstreamError::transport)?;

        decode(check(res).await?).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn oauth() -> SpotifyOAuth {
        let config = Config::from_lookup(|key| match key {
            "STORE_URL" => Some("memory://".to_string()),
            "DB_NAME" => Some("test".to_string()),
            "SPOTIFY_CLIENT_ID" => Some("client-123".to_string()),
            "SPOTIFY_CLIENT_SECRET" => Some("secret".to_string()),
            "REDIRECT_URI" => Some("http://localhost:3000/callback".to_string()),
            _ => None,
        })
        .unwrap();

        SpotifyOAuth::from_config(&config, Client::new()).unwrap()
    }

    #[test]
    fn authorize_url_carries_redirect_and_scopes() {
        let url = Url::parse(&oauth().authorize_url().unwrap()).unwrap();
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert_eq!(url.path(), "/authorize");
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["redirect_uri"], "http://localhost:3000/callback");

        let mut scopes: Vec<&str> = params["scope"].split(' ').collect();
        scopes.sort_unstable();
        let mut expected = SCOPES.to_vec();
        expected.sort_unstable();
        assert_eq!(scopes, expected);
    }

    #[test]
    fn authorize_url_is_stable() {
        let oauth = oauth();
        assert_eq!(oauth.authorize_url().unwrap(), oauth.authorize_url().unwrap());
    }

    #[test]
    fn missing_credentials_are_a_config_error() {
        let config = Config::from_lookup(|key| match key {
            "STORE_URL" => Some("memory://".to_string()),
            "DB_NAME" => Some("test".to_string()),
            _ => None,
        })
        .unwrap();

        let err = SpotifyOAuth::from_config(&config, Client::new()).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SPOTIFY_CLIENT_ID"));
    }
}
