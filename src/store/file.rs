use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{DocumentStore, StoreError, validate_name};

/// Stores each collection as a pretty-printed JSON array in
/// `<root>/<collection>.json`.
///
/// Writes rewrite the whole file and are serialized through a single mutex, so
/// concurrent inserts from different requests never lose a document.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    write_lock: Mutex<()>,
    closed: AtomicBool,
}

impl FileStore {
    pub async fn open(root: PathBuf) -> Result<Self, StoreError> {
        async_fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> Result<PathBuf, StoreError> {
        validate_name(collection)?;
        Ok(self.root.join(format!("{collection}.json")))
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }

    async fn load(path: &Path) -> Result<Vec<Value>, StoreError> {
        match async_fs::read_to_string(path).await {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn insert_one(&self, collection: &str, document: Value) -> Result<(), StoreError> {
        self.ensure_open()?;
        let path = self.collection_path(collection)?;

        let _guard = self.write_lock.lock().await;
        let mut documents = Self::load(&path).await?;
        documents.push(document);

        let json = serde_json::to_string_pretty(&documents)?;
        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn find(&self, collection: &str, limit: usize) -> Result<Vec<Value>, StoreError> {
        self.ensure_open()?;
        let path = self.collection_path(collection)?;

        let mut documents = Self::load(&path).await?;
        documents.truncate(limit);
        Ok(documents)
    }

    async fn close(&self) -> Result<(), StoreError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(StoreError::Closed);
        }
        // wait for an in-flight write to finish
        drop(self.write_lock.lock().await);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().to_path_buf()).await.unwrap();
        store.insert_one("status_checks", json!({"id": "1"})).await.unwrap();
        store.close().await.unwrap();

        let reopened = FileStore::open(dir.path().to_path_buf()).await.unwrap();
        let docs = reopened.find("status_checks", 10).await.unwrap();
        assert_eq!(docs, vec![json!({"id": "1"})]);
    }

    #[tokio::test]
    async fn concurrent_inserts_are_not_lost() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::open(dir.path().to_path_buf()).await.unwrap());

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.insert_one("things", json!({ "n": i })).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.find("things", 100).await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn rejects_path_like_collection_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().to_path_buf()).await.unwrap();

        let err = store.insert_one("../escape", json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidName(_)));
    }
}
