//! Configuration management for the dashboard backend.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a single typed [`Config`] value that is
//! built once at startup and shared with every request handler.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8001";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable `{0}`")]
    Missing(&'static str),

    #[error("invalid value for `{name}`: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Loads environment variables from `.env` files.
///
/// A `.env` file in the working directory is loaded first. Afterwards the
/// platform-specific local data directory is consulted:
///
/// - Linux: `~/.local/share/sporldash/.env`
/// - macOS: `~/Library/Application Support/sporldash/.env`
/// - Windows: `%LOCALAPPDATA%/sporldash/.env`
///
/// Variables that are already set are never overwritten, and missing files
/// are not an error since every value can also come from the process
/// environment.
///
/// # Returns
///
/// Returns the list of files that were actually loaded.
pub fn load_env() -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    if let Ok(path) = dotenv::dotenv() {
        loaded.push(path);
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporldash/.env");
    if path.is_file() && dotenv::from_path(&path).is_ok() {
        loaded.push(path);
    }

    loaded
}

/// Runtime configuration of the backend.
///
/// Spotify client credentials are optional at startup: the proxy routes only
/// need the caller's bearer token, so a missing credential is reported when an
/// auth route is hit instead of preventing the process from starting. The
/// document store settings are required.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub store_url: String,
    pub db_name: String,
    pub server_address: String,
    pub spotify_api_url: String,
    pub spotify_auth_url: String,
    pub spotify_token_url: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if `DB_NAME` is not set, or if neither
    /// `STORE_URL` nor its alias `MONGO_URL` is.
    ///
    /// # Example
    ///
    /// ```
    /// config::load_env();
    /// let cfg = config::Config::from_env()?;
    /// println!("listening on {}", cfg.server_address);
    /// ```
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            client_id: get("SPOTIFY_CLIENT_ID"),
            client_secret: get("SPOTIFY_CLIENT_SECRET"),
            redirect_uri: get("REDIRECT_URI"),
            store_url: get("STORE_URL")
                .or_else(|| get("MONGO_URL"))
                .ok_or(ConfigError::Missing("STORE_URL"))?,
            db_name: require("DB_NAME")?,
            server_address: get("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
            spotify_api_url: trim_base(
                get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string()),
            ),
            spotify_auth_url: get("SPOTIFY_API_AUTH_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_AUTH_URL.to_string()),
            spotify_token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_TOKEN_URL.to_string()),
        })
    }

    /// Returns the Spotify client credentials and redirect URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent value.
    pub fn client_credentials(&self) -> Result<ClientCredentials, ConfigError> {
        Ok(ClientCredentials {
            client_id: self
                .client_id
                .clone()
                .ok_or(ConfigError::Missing("SPOTIFY_CLIENT_ID"))?,
            client_secret: self
                .client_secret
                .clone()
                .ok_or(ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))?,
            redirect_uri: self
                .redirect_uri
                .clone()
                .ok_or(ConfigError::Missing("REDIRECT_URI"))?,
        })
    }
}

/// The values needed to talk to the Spotify accounts service.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let cfg = Config::from_lookup(lookup(&[("STORE_URL", "memory://"), ("DB_NAME", "test")]))
            .unwrap();

        assert_eq!(cfg.server_address, DEFAULT_SERVER_ADDRESS);
        assert_eq!(cfg.spotify_api_url, DEFAULT_SPOTIFY_API_URL);
        assert_eq!(cfg.spotify_token_url, DEFAULT_SPOTIFY_TOKEN_URL);
        assert!(cfg.client_id.is_none());
    }

    #[test]
    fn store_settings_are_required() {
        let err = Config::from_lookup(lookup(&[("DB_NAME", "test")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("STORE_URL"));

        let err = Config::from_lookup(lookup(&[("STORE_URL", "memory://"), ("DB_NAME", " ")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("DB_NAME"));
    }

    #[test]
    fn mongo_url_is_accepted_as_store_url() {
        let cfg = Config::from_lookup(lookup(&[
            ("MONGO_URL", "mongodb://localhost:27017"),
            ("DB_NAME", "test_database"),
        ]))
        .unwrap();
        assert_eq!(cfg.store_url, "mongodb://localhost:27017");

        let cfg = Config::from_lookup(lookup(&[
            ("STORE_URL", "memory://"),
            ("MONGO_URL", "mongodb://localhost:27017"),
            ("DB_NAME", "test_database"),
        ]))
        .unwrap();
        assert_eq!(cfg.store_url, "memory://");
    }

    #[test]
    fn missing_credentials_only_fail_on_use() {
        let cfg = Config::from_lookup(lookup(&[
            ("STORE_URL", "memory://"),
            ("DB_NAME", "test"),
            ("SPOTIFY_CLIENT_ID", "id"),
        ]))
        .unwrap();

        let err = cfg.client_credentials().unwrap_err();
        assert_eq!(err, ConfigError::Missing("SPOTIFY_CLIENT_SECRET"));
    }

    #[test]
    fn strips_trailing_slash_from_api_url() {
        let cfg = Config::from_lookup(lookup(&[
            ("STORE_URL", "memory://"),
            ("DB_NAME", "test"),
            ("SPOTIFY_API_URL", "http://localhost:9000/v1/"),
        ]))
        .unwrap();

        assert_eq!(cfg.spotify_api_url, "http://localhost:9000/v1");
    }
}
