//! Spotify Music Dashboard Backend Library
//!
//! This library provides a small HTTP backend for a listening dashboard. It
//! proxies the Spotify Web API on behalf of a front end that holds the user's
//! access token, performs the authorization code exchange, and keeps issued
//! sessions and status checks in a document store.
//!
//! # Modules
//!
//! - `api` - HTTP routes, extractors and handlers
//! - `config` - Configuration management and environment variables
//! - `error` - Handler error type and its HTTP mapping
//! - `management` - Token lifecycle and listening analytics
//! - `server` - Server startup and graceful shutdown
//! - `spotify` - Spotify Web API and accounts service client
//! - `state` - Shared application state
//! - `store` - Document store abstraction and backends
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporldash::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> sporldash::Res<()> {
//!     config::load_env();
//!     let cfg = config::Config::from_env()?;
//!     server::start_api_server(cfg).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod state;
pub mod store;
pub mod types;
pub mod utils;

/// A convenient Result type alias for startup and shutdown paths.
///
/// Uses a boxed dynamic error trait object so that configuration, storage
/// and I/O failures can be propagated with `?` from `main`. Request handlers
/// use [`error::AppError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
