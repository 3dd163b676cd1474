use std::sync::Arc;

use crate::{
    config::Config,
    error::AppError,
    management::TokenManager,
    spotify::{SpotifyClient, SpotifyOAuth},
    store::Database,
};

/// Shared application state passed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub spotify: SpotifyClient,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let spotify = SpotifyClient::new(config.spotify_api_url.clone());
        Self {
            config,
            db,
            spotify,
        }
    }

    /// Builds the token manager for one auth request.
    ///
    /// Fails with a configuration error when client credentials are missing.
    pub fn token_manager(&self) -> Result<TokenManager, AppError> {
        let oauth = SpotifyOAuth::from_config(&self.config, self.spotify.http().clone())?;
        Ok(TokenManager::new(oauth, self.db.sessions()))
    }
}
