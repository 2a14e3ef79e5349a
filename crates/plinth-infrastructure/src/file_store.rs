//! File-backed content store.
//!
//! One JSON document per collection key under the content directory
//! (`homepage-data.json`, `documents-data.json`, ...). Writes are
//! last-write-wins; every successful save is broadcast to all subscribers,
//! the originating client included, which is what lets sibling views
//! converge without polling.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::broadcast;
use tracing::debug;

use plinth_core::content::{CollectionKey, ContentValue};
use plinth_core::error::{PlinthError, Result};
use plinth_core::store::{ContentStore, StoreEvent};

const CHANNEL_CAPACITY: usize = 64;

pub struct FileContentStore {
    dir: PathBuf,
    tx: broadcast::Sender<StoreEvent>,
}

impl FileContentStore {
    pub fn new(dir: PathBuf) -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { dir, tx }
    }

    fn document_path(&self, key: CollectionKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    async fn write_document(&self, key: CollectionKey, value: &ContentValue) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PlinthError::io(format!("Failed to create content dir: {e}")))?;
        let serialized = serde_json::to_string_pretty(value)?;
        fs::write(self.document_path(key), serialized)
            .await
            .map_err(|e| PlinthError::persistence(format!("Failed to write {key}: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for FileContentStore {
    async fn load(&self, key: CollectionKey) -> Result<ContentValue> {
        let path = self.document_path(key);
        if !path.exists() {
            // first load: initialize the key with its default snapshot
            let mut value = ContentValue::default_for(key);
            value.touch(chrono::Utc::now().to_rfc3339());
            self.write_document(key, &value).await?;
            debug!("initialized {key} with default snapshot");
            return Ok(value);
        }
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| PlinthError::persistence(format!("Failed to read {key}: {e}")))?;
        ContentValue::from_json(key, &content)
    }

    async fn save(&self, key: CollectionKey, value: ContentValue) -> Result<()> {
        self.write_document(key, &value).await?;
        debug!("saved {key}");
        let _ = self.tx.send(StoreEvent { key, value });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }
}
