use chrono::Utc;

use crate::{
    error::{AppError, UpstreamContext},
    spotify::SpotifyOAuth,
    store::Collection,
    types::{RefreshedToken, Token, TokenRecord},
};

/// Drives the authorization code lifecycle and records issued sessions.
///
/// ```text
/// UNAUTHENTICATED --authorize_url--> AWAITING_CALLBACK --exchange_code--> AUTHENTICATED
/// ```
///
/// A refresh yields a new access token for the caller but leaves the stored
/// record untouched.
pub struct TokenManager {
    oauth: SpotifyOAuth,
    sessions: Collection<TokenRecord>,
}

impl TokenManager {
    pub fn new(oauth: SpotifyOAuth, sessions: Collection<TokenRecord>) -> Self {
        TokenManager { oauth, sessions }
    }

    pub fn authorize_url(&self) -> Result<String, AppError> {
        Ok(self.oauth.authorize_url()?)
    }

    /// Exchanges `code` and persists exactly one [`TokenRecord`] on success.
    ///
    /// Nothing is written when the exchange fails.
    pub async fn exchange_code(&self, code: &str) -> Result<Token, AppError> {
        let token = self.oauth.exchange_code(code).await.context("Callback")?;

        let record = TokenRecord {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
            expires_at: token.expires_at,
            created_at: Utc::now(),
        };
        self.sessions.insert_one(&record).await?;
        tracing::info!(expires_at = token.expires_at, "stored new user session");

        Ok(token)
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshedToken, AppError> {
        self.oauth
            .refresh_access_token(refresh_token)
            .await
            .context("Token refresh")
    }
}
