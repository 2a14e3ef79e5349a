//! In-memory content store.
//!
//! Backs tests and ephemeral sessions. Shares the file store's contract:
//! missing keys initialize to the default snapshot, and every save is
//! echoed to all subscribers, the originator included.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use plinth_core::content::{CollectionKey, ContentValue};
use plinth_core::error::Result;
use plinth_core::store::{ContentStore, StoreEvent};

const CHANNEL_CAPACITY: usize = 64;

pub struct InMemoryContentStore {
    data: RwLock<HashMap<CollectionKey, ContentValue>>,
    tx: broadcast::Sender<StoreEvent>,
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            data: RwLock::new(HashMap::new()),
            tx,
        }
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn load(&self, key: CollectionKey) -> Result<ContentValue> {
        let mut data = self.data.write().await;
        let value = data.entry(key).or_insert_with(|| {
            let mut value = ContentValue::default_for(key);
            value.touch(chrono::Utc::now().to_rfc3339());
            value
        });
        Ok(value.clone())
    }

    async fn save(&self, key: CollectionKey, value: ContentValue) -> Result<()> {
        self.data.write().await.insert(key, value.clone());
        // no receivers is fine; subscribers may come and go
        let _ = self.tx.send(StoreEvent { key, value });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth_core::content::HomepageData;

    #[tokio::test]
    async fn test_load_initializes_default_snapshot() {
        let store = InMemoryContentStore::new();
        let value = store.load(CollectionKey::HomepageData).await.unwrap();
        match value {
            ContentValue::Homepage(data) => {
                assert!(data.social_links.is_empty());
                assert!(!data.last_updated.is_empty());
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let store = InMemoryContentStore::new();
        let mut data = HomepageData::default();
        data.author_skills.push("Rust".to_string());
        let value = ContentValue::Homepage(data);
        store.save(CollectionKey::HomepageData, value.clone()).await.unwrap();
        let loaded = store.load(CollectionKey::HomepageData).await.unwrap();
        assert_eq!(loaded, value);
    }

    #[tokio::test]
    async fn test_save_is_echoed_to_subscribers_including_originator() {
        let store = InMemoryContentStore::new();
        let mut rx = store.subscribe();
        let value = ContentValue::Homepage(HomepageData::default());
        store.save(CollectionKey::HomepageData, value.clone()).await.unwrap();
        let event = rx.recv().await.unwrap();
        assert_eq!(event.key, CollectionKey::HomepageData);
        assert_eq!(event.value, value);
    }
}
