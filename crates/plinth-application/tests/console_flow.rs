//! End-to-end console flows: two views over one store, converging through
//! the cross-view broadcast and the store's own subscription.

use std::sync::Arc;

use tokio::sync::broadcast;

use plinth_application::dispatcher::{CommandDispatcher, Dispatch, PresetGate};
use plinth_core::SyncOutcome;
use plinth_core::content::{CollectionKey, ContentValue};
use plinth_core::store::ContentStore;
use plinth_infrastructure::{FileContentStore, InMemoryContentStore};

const SECRET: &str = "hunter2";

fn outcome(dispatch: Dispatch) -> SyncOutcome {
    match dispatch {
        Dispatch::Outcome(outcome) => outcome,
        other => panic!("unexpected dispatch: {other:?}"),
    }
}

async fn unlock(view: &mut CommandDispatcher) {
    let out = outcome(view.dispatch(&format!("edit {SECRET}.")).await);
    assert!(out.success, "unlock failed: {}", out.message);
}

#[tokio::test]
async fn two_views_converge_through_the_broadcast_channel() {
    let store = Arc::new(InMemoryContentStore::new());
    let (crosstab, _) = broadcast::channel(16);

    let mut first =
        CommandDispatcher::new(store.clone(), crosstab.clone(), Arc::new(PresetGate(true)), SECRET.to_string());
    let mut second =
        CommandDispatcher::new(store, crosstab.clone(), Arc::new(PresetGate(true)), SECRET.to_string());
    first.hydrate().await.unwrap();
    second.hydrate().await.unwrap();

    // the second view listens on the channel the way a mounted sibling would
    let mut updates = crosstab.subscribe();

    unlock(&mut first).await;
    let out = outcome(first.dispatch("add skill Rust").await);
    assert!(out.success);

    let update = updates.recv().await.unwrap();
    assert_eq!(update.origin, first.origin());
    second.apply_broadcast(&update);

    assert_eq!(
        second.working(CollectionKey::HomepageData),
        first.working(CollectionKey::HomepageData)
    );
}

#[tokio::test]
async fn store_subscription_carries_changes_between_clients() {
    // two dispatchers with independent broadcast channels, like two
    // browser tabs: only the store subscription connects them
    let store = Arc::new(InMemoryContentStore::new());
    let (tab_a, _) = broadcast::channel(16);
    let (tab_b, _) = broadcast::channel(16);

    let mut first =
        CommandDispatcher::new(store.clone(), tab_a, Arc::new(PresetGate(true)), SECRET.to_string());
    let mut second =
        CommandDispatcher::new(store.clone(), tab_b, Arc::new(PresetGate(true)), SECRET.to_string());
    first.hydrate().await.unwrap();
    second.hydrate().await.unwrap();

    let mut store_events = store.subscribe();

    unlock(&mut first).await;
    outcome(first.dispatch("c").await);
    let out = outcome(first.dispatch("add t.me/me").await);
    assert!(out.success);

    let event = store_events.recv().await.unwrap();
    assert_eq!(event.key, CollectionKey::ContactsData);
    second.apply_store_event(event);

    match second.working(CollectionKey::ContactsData).unwrap() {
        ContentValue::Contacts(data) => {
            assert_eq!(data.bubbles.len(), 1);
            assert_eq!(data.bubbles[0].url, "https://t.me/me");
        }
        other => panic!("unexpected value: {other:?}"),
    }
}

#[tokio::test]
async fn file_store_round_trips_a_full_editing_session() {
    let tmp = tempfile::TempDir::new().unwrap();
    let store = Arc::new(FileContentStore::new(tmp.path().join("content")));
    let (crosstab, _) = broadcast::channel(16);

    let mut view = CommandDispatcher::new(
        store.clone(),
        crosstab,
        Arc::new(PresetGate(true)),
        SECRET.to_string(),
    );
    view.hydrate().await.unwrap();
    unlock(&mut view).await;

    outcome(view.dispatch("add github github.com/me").await);
    outcome(view.dispatch("add skill Rust").await);
    outcome(view.dispatch("a").await);
    outcome(view.dispatch("repo me plinth").await);
    outcome(view.dispatch("location Lisbon, Portugal").await);

    // a later client sees exactly the persisted snapshots
    let homepage = store.load(CollectionKey::HomepageData).await.unwrap();
    match homepage {
        ContentValue::Homepage(data) => {
            assert_eq!(data.social_links.len(), 1);
            assert_eq!(data.social_links[0].url, "https://github.com/me");
            assert_eq!(data.author_skills, vec!["Rust"]);
            assert!(!data.last_updated.is_empty());
        }
        other => panic!("unexpected value: {other:?}"),
    }
    let about = store.load(CollectionKey::AboutData).await.unwrap();
    match about {
        ContentValue::About(data) => {
            assert_eq!(data.repo.owner, "me");
            assert_eq!(data.repo.name, "plinth");
            assert_eq!(data.location, "Lisbon, Portugal");
        }
        other => panic!("unexpected value: {other:?}"),
    }
}
