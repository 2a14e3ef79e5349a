//! Sync coordinator.
//!
//! Makes every mutation feel instantaneous while staying eventually
//! consistent with the store and with sibling views. Per mutation:
//!
//! 1. the working copy is replaced optimistically,
//! 2. the new snapshot is persisted through the store adapter,
//! 3. on success a cross-view update is broadcast so sibling views
//!    converge without waiting for the store's own round trip,
//! 4. on failure the working copy is rolled back to the pre-mutation
//!    snapshot and a persistence failure is reported.
//!
//! Incoming store events are the authoritative last-write source and
//! replace the working copy unconditionally; cross-view updates from this
//! coordinator's own origin are ignored (idempotence against echo).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use plinth_core::SyncOutcome;
use plinth_core::content::{CollectionKey, ContentValue};
use plinth_core::error::Result;
use plinth_core::store::{ContentStore, StoreEvent};

/// Cross-view broadcast payload, emitted after a successful save.
#[derive(Debug, Clone)]
pub struct CollectionUpdate {
    pub origin: Uuid,
    pub key: CollectionKey,
    pub value: ContentValue,
    pub timestamp: String,
}

/// Per-view synchronization service. The working copies it holds are
/// exclusively owned by this view; sibling views converge only through
/// the subscribe/broadcast channels, never through shared memory.
pub struct SyncCoordinator {
    store: Arc<dyn ContentStore>,
    crosstab: broadcast::Sender<CollectionUpdate>,
    origin: Uuid,
    working: HashMap<CollectionKey, ContentValue>,
}

impl SyncCoordinator {
    pub fn new(store: Arc<dyn ContentStore>, crosstab: broadcast::Sender<CollectionUpdate>) -> Self {
        Self {
            store,
            crosstab,
            origin: Uuid::new_v4(),
            working: HashMap::new(),
        }
    }

    /// This view's identity on the cross-view channel.
    pub fn origin(&self) -> Uuid {
        self.origin
    }

    /// Loads every collection into the working set.
    pub async fn hydrate(&mut self) -> Result<()> {
        for key in CollectionKey::ALL {
            let value = self.store.load(key).await?;
            self.working.insert(key, value);
        }
        Ok(())
    }

    /// The current working copy for a key, if hydrated.
    pub fn working(&self, key: CollectionKey) -> Option<&ContentValue> {
        self.working.get(&key)
    }

    /// Returns the working copy for a key, loading it on first access.
    pub async fn working_or_load(&mut self, key: CollectionKey) -> Result<ContentValue> {
        if let Some(value) = self.working.get(&key) {
            return Ok(value.clone());
        }
        let value = self.store.load(key).await?;
        self.working.insert(key, value.clone());
        Ok(value)
    }

    /// Applies a mutation result: optimistic local write, persist,
    /// broadcast. The returned outcome is what the feedback surface shows.
    pub async fn commit(&mut self, mut value: ContentValue, message: String) -> SyncOutcome {
        let key = value.key();
        let timestamp = chrono::Utc::now().to_rfc3339();
        value.touch(timestamp.clone());

        // optimistic: the local copy changes before the save round trip
        let previous = self.working.insert(key, value.clone());

        match self.store.save(key, value.clone()).await {
            Ok(()) => {
                debug!("committed {key}");
                let _ = self.crosstab.send(CollectionUpdate {
                    origin: self.origin,
                    key,
                    value: value.clone(),
                    timestamp,
                });
                SyncOutcome::ok(message, value)
            }
            Err(err) => {
                // roll the optimistic copy back so view and store do not
                // silently diverge
                warn!("save failed for {key}, rolling back: {err}");
                match previous {
                    Some(previous) => {
                        self.working.insert(key, previous);
                    }
                    None => {
                        self.working.remove(&key);
                    }
                }
                SyncOutcome::failure(&err)
            }
        }
    }

    /// Authoritative replacement from the store's own subscription. Fires
    /// for writes from this and every other client, including the echo of
    /// this coordinator's own saves; replacing with an identical snapshot
    /// is a no-op by construction.
    pub fn apply_store_event(&mut self, event: StoreEvent) {
        debug!("store event for {}", event.key);
        self.working.insert(event.key, event.value);
    }

    /// Fast-path update from a sibling view in the same page session.
    /// Own-origin updates are skipped.
    pub fn apply_broadcast(&mut self, update: &CollectionUpdate) {
        if update.origin == self.origin {
            return;
        }
        debug!("cross-view update for {} from {}", update.key, update.origin);
        self.working.insert(update.key, update.value.clone());
    }
}
