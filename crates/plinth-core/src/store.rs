//! Content store adapter contract.
//!
//! The remote document store is treated as a generic versioned key-value
//! document service: `load`, `save` (last-write-wins, no merge) and a
//! change subscription. Implementations live in `plinth-infrastructure`.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::content::{CollectionKey, ContentValue};
use crate::error::Result;

/// A change notification from the store.
///
/// Every successful `save` from any client is eventually delivered to every
/// subscriber, including the client that performed it, so consumers must be
/// idempotent against receiving their own just-saved value back.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub key: CollectionKey,
    pub value: ContentValue,
}

/// The content store adapter.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Loads the snapshot for a key.
    ///
    /// If no value exists yet the store initializes the key with its
    /// documented default snapshot and returns that.
    async fn load(&self, key: CollectionKey) -> Result<ContentValue>;

    /// Persists a snapshot. Last write wins; there is no merge and no
    /// conflict detection.
    async fn save(&self, key: CollectionKey, value: ContentValue) -> Result<()>;

    /// Subscribes to change notifications for all keys.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}
