//! # Document Store
//!
//! Persistence for the two record kinds this service owns: issued token
//! pairs ([`TokenRecord`]) and status checks ([`StatusCheck`]).
//!
//! Records are schemaless JSON documents grouped into named collections behind
//! the [`DocumentStore`] trait. Typed access goes through [`Collection`], which
//! serializes on the way in and deserializes on the way out.
//!
//! ## Backends
//!
//! | `STORE_URL`           | Backend       |
//! |-----------------------|---------------|
//! | `mongodb://host:27017`, `mongodb+srv://...` | [`MongoStore`], database `<DB_NAME>` |
//! | `memory://`           | [`MemoryStore`] |
//! | `file:///var/lib/x`   | [`FileStore`] rooted at `/var/lib/x/<DB_NAME>` |
//! | `/var/lib/x` or `./x` | [`FileStore`] as above |
//!
//! ## Lifecycle
//!
//! A [`Database`] handle is opened once at startup and cloned into request
//! state. [`Database::close`] must be called exactly once at shutdown; every
//! operation after that fails with [`StoreError::Closed`].

mod file;
mod memory;
mod mongo;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use mongo::MongoStore;

use std::{marker::PhantomData, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::types::{StatusCheck, TokenRecord};

pub const SESSIONS: &str = "user_sessions";
pub const STATUS_CHECKS: &str = "status_checks";

/// Upper bound on documents returned by a listing.
pub const MAX_LIST: usize = 1000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("bson encoding error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),

    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("unsupported store url `{0}`")]
    UnsupportedUrl(String),

    #[error("invalid name `{0}`: only ASCII letters, digits, `_` and `-` are allowed")]
    InvalidName(String),

    #[error("store is closed")]
    Closed,
}

/// Schemaless, collection-oriented storage.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Appends one document to `collection`, creating the collection if needed.
    async fn insert_one(&self, collection: &str, document: Value) -> Result<(), StoreError>;

    /// Returns up to `limit` documents of `collection` in store order.
    async fn find(&self, collection: &str, limit: usize) -> Result<Vec<Value>, StoreError>;

    /// Releases the backend. Fails with [`StoreError::Closed`] when called twice.
    async fn close(&self) -> Result<(), StoreError>;
}

/// Shared handle to the configured document store.
#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Opens the backend selected by `url` for database `db_name`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidName`] if `db_name` is not a plain identifier
    /// - [`StoreError::UnsupportedUrl`] for schemes other than `mongodb`,
    ///   `mongodb+srv`, `memory` and `file`
    /// - [`StoreError::Mongo`] for a malformed MongoDB connection string
    /// - [`StoreError::Io`] if the file store directory cannot be created
    pub async fn connect(url: &str, db_name: &str) -> Result<Self, StoreError> {
        validate_name(db_name)?;

        if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
            let store = MongoStore::connect(url, db_name).await?;
            tracing::info!(database = store.database_name(), "using mongodb document store");
            return Ok(Self::new(Arc::new(store)));
        }

        if url == "memory://" || url == "memory:" {
            tracing::info!("using in-memory document store");
            return Ok(Self::in_memory());
        }

        let root = if url.contains("://") {
            let parsed = Url::parse(url).map_err(|_| StoreError::UnsupportedUrl(url.to_string()))?;
            if parsed.scheme() != "file" {
                return Err(StoreError::UnsupportedUrl(url.to_string()));
            }
            parsed
                .to_file_path()
                .map_err(|_| StoreError::UnsupportedUrl(url.to_string()))?
        } else {
            PathBuf::from(url)
        };

        let store = FileStore::open(root.join(db_name)).await?;
        tracing::info!(path = %store.root().display(), "using file document store");
        Ok(Self::new(Arc::new(store)))
    }

    pub fn collection<T>(&self, name: &'static str) -> Collection<T> {
        Collection {
            store: Arc::clone(&self.store),
            name,
            _marker: PhantomData,
        }
    }

    pub fn sessions(&self) -> Collection<TokenRecord> {
        self.collection(SESSIONS)
    }

    pub fn status_checks(&self) -> Collection<StatusCheck> {
        self.collection(STATUS_CHECKS)
    }

    pub async fn close(&self) -> Result<(), StoreError> {
        self.store.close().await
    }
}

/// Typed view of one collection.
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub async fn insert_one(&self, document: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(document)?;
        self.store.insert_one(self.name, value).await
    }

    pub async fn find(&self, limit: usize) -> Result<Vec<T>, StoreError> {
        self.store
            .find(self.name, limit)
            .await?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[tokio::test]
    async fn typed_collections_round_trip() {
        let db = Database::in_memory();
        let record = TokenRecord {
            access_token: "a".into(),
            refresh_token: "r".into(),
            expires_at: 1_700_000_000,
            created_at: Utc::now(),
        };

        db.sessions().insert_one(&record).await.unwrap();

        let stored = db.sessions().find(MAX_LIST).await.unwrap();
        assert_eq!(stored, vec![record]);
        assert!(db.status_checks().find(MAX_LIST).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn connect_selects_backend() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_directory_path(dir.path()).unwrap();

        let db = Database::connect(url.as_str(), "dash").await.unwrap();
        db.status_checks()
            .insert_one(&StatusCheck::new("dashboard".into()))
            .await
            .unwrap();

        assert!(dir.path().join("dash").join("status_checks.json").is_file());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn connect_selects_mongodb_for_mongo_urls() {
        let db = Database::connect("mongodb://localhost:27017", "test_database")
            .await
            .unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn connect_rejects_unknown_schemes_and_names() {
        let err = Database::connect("redis://localhost:6379", "dash")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedUrl(_)));

        let err = Database::connect("memory://", "../etc").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));
    }

    #[tokio::test]
    async fn closing_twice_fails() {
        let db = Database::in_memory();
        db.close().await.unwrap();

        assert!(matches!(db.close().await, Err(StoreError::Closed)));
        assert!(matches!(
            db.status_checks().find(MAX_LIST).await,
            Err(StoreError::Closed)
        ));
    }
}
