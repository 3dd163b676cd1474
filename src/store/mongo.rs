use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mongodb::{
    Client,
    bson::{self, Bson, Document, doc},
};
use serde_json::Value;

use super::{DocumentStore, StoreError};

/// MongoDB backend, one database per [`MongoStore`].
///
/// The driver connects lazily, so opening the store only validates the
/// connection string; the first insert or find reaches the server.
#[derive(Debug)]
pub struct MongoStore {
    client: Client,
    db: mongodb::Database,
    closed: AtomicBool,
}

impl MongoStore {
    pub async fn connect(url: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;
        let db = client.database(db_name);

        Ok(Self {
            client,
            db,
            closed: AtomicBool::new(false),
        })
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        self.ensure_open()?;
        let document = bson::to_document(&document)?;

        self.db
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;
        Ok(())
    }

    async fn find(&self, collection: &str, limit: usize) -> Result<Vec<Value>, StoreError> {
        self.ensure_open()?;
        // a zero limit means "no limit" to the server
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut cursor = self
            .db
            .collection::<Document>(collection)
            .find(doc! {})
            .projection(doc! { "_id": 0 })
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;

        let mut docs = Vec::new();
        while cursor.advance().await? {
            let document: Document = cursor.deserialize_current()?;
            docs.push(Bson::Document(document).into_relaxed_extjson());
        }
        Ok(docs)
    }

    async fn close(&self) -> Result<(), StoreError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StoreError::Closed);
        }
        self.client.clone().shutdown().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_is_lazy_and_closes_once() {
        let store = MongoStore::connect("mongodb://localhost:27017", "test_database")
            .await
            .unwrap();
        assert_eq!(store.database_name(), "test_database");

        store.close().await.unwrap();
        assert!(matches!(store.close().await, Err(StoreError::Closed)));
        assert!(matches!(
            store.find("status_checks", 10).await,
            Err(StoreError::Closed)
        ));
    }

    #[tokio::test]
    async fn malformed_connection_string_fails() {
        let err = MongoStore::connect("mongodb://localhost:notaport", "test_database")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Mongo(_)));
    }
}
