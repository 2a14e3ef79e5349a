//! Command dispatcher.
//!
//! The pipeline glue: parse the line against the active domain's grammar,
//! gate domain verbs behind the session state, run the confirmation gate
//! for destructive removals, hand the arguments to the owning mutation
//! handler and commit the result through the sync coordinator. Every
//! domain error is converted to a `SyncOutcome` here; nothing below the
//! feedback surface ever sees a raw error.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use plinth_core::SyncOutcome;
use plinth_core::command::templates::{self, ConsoleItem};
use plinth_core::command::{BatchTargets, Command, Domain, Mutation, ViewMode, parse_line};
use plinth_core::content::{
    AboutData, CollectionKey, ContactsData, ContentValue, DocumentType, DocumentsData,
    HomepageData, ProjectType, ProjectsData,
};
use plinth_core::error::{PlinthError, Result};
use plinth_core::handlers;
use plinth_core::session::{ConsoleSession, SessionState};
use plinth_core::store::{ContentStore, StoreEvent};

use crate::coordinator::{CollectionUpdate, SyncCoordinator};
use crate::view::ViewState;

/// Blocking yes/no prompt invoked before any destructive removal.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Gate with a fixed answer, for tests and headless runs.
pub struct PresetGate(pub bool);

#[async_trait]
impl ConfirmationGate for PresetGate {
    async fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// What the input surface should do after a dispatch.
#[derive(Debug)]
pub enum Dispatch {
    /// Show the outcome toast (possibly empty for silent no-ops).
    Outcome(SyncOutcome),
    /// Bare `edit`: open the password prompt, then call
    /// [`CommandDispatcher::unlock_with`].
    PasswordPrompt,
}

/// One view's command pipeline.
pub struct CommandDispatcher {
    session: ConsoleSession,
    view: ViewState,
    coordinator: SyncCoordinator,
    gate: Arc<dyn ConfirmationGate>,
    secret: String,
}

impl CommandDispatcher {
    pub fn new(
        store: Arc<dyn ContentStore>,
        crosstab: tokio::sync::broadcast::Sender<CollectionUpdate>,
        gate: Arc<dyn ConfirmationGate>,
        secret: String,
    ) -> Self {
        Self {
            session: ConsoleSession::new(),
            view: ViewState::default(),
            coordinator: SyncCoordinator::new(store, crosstab),
            gate,
            secret,
        }
    }

    /// Loads every collection into the coordinator's working set.
    pub async fn hydrate(&mut self) -> Result<()> {
        self.coordinator.hydrate().await
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn working(&self, key: CollectionKey) -> Option<&ContentValue> {
        self.coordinator.working(key)
    }

    pub fn origin(&self) -> Uuid {
        self.coordinator.origin()
    }

    /// The autocomplete list for the current domain and mode.
    pub fn console_items(&self) -> Vec<ConsoleItem> {
        templates::items_for(self.view.domain, self.session.state())
    }

    /// Forwards an authoritative store notification to the coordinator.
    pub fn apply_store_event(&mut self, event: StoreEvent) {
        self.coordinator.apply_store_event(event);
    }

    /// Forwards a sibling-view update to the coordinator.
    pub fn apply_broadcast(&mut self, update: &CollectionUpdate) {
        self.coordinator.apply_broadcast(update);
    }

    /// Parses and executes one input line.
    pub async fn dispatch(&mut self, line: &str) -> Dispatch {
        let command = parse_line(line, self.view.domain, self.session.state());
        debug!("dispatching {command:?}");
        match command {
            Command::Noop => Dispatch::Outcome(SyncOutcome::silent()),
            Command::Navigate(domain) => {
                self.view.domain = domain;
                Dispatch::Outcome(SyncOutcome::info(format!("Switched to {domain}")))
            }
            Command::PromptUnlock => Dispatch::PasswordPrompt,
            Command::Unlock { secret } => Dispatch::Outcome(self.unlock_with(&secret)),
            Command::Exit => {
                self.session.lock();
                Dispatch::Outcome(SyncOutcome::info("Edit mode disabled"))
            }
            Command::Filter { raw } => Dispatch::Outcome(self.apply_filter(&raw)),
            Command::View(mode) => Dispatch::Outcome(self.apply_view_mode(mode)),
            Command::Mutate(mutation) => Dispatch::Outcome(self.run_mutation(mutation).await),
        }
    }

    /// Attempts the locked -> unlocked transition with a candidate secret
    /// (from either the inline form or the password prompt).
    pub fn unlock_with(&mut self, candidate: &str) -> SyncOutcome {
        match self.session.unlock(candidate, &self.secret) {
            Ok(()) => SyncOutcome::info("Edit mode enabled"),
            Err(err) => SyncOutcome::failure(&err),
        }
    }

    fn apply_filter(&mut self, raw: &str) -> SyncOutcome {
        let lowered = raw.to_lowercase();
        match self.view.domain {
            Domain::Documents => {
                if lowered == "all" {
                    self.view.document_filter = None;
                } else {
                    match DocumentType::from_str(&lowered) {
                        Ok(doc_type) => self.view.document_filter = Some(doc_type),
                        Err(_) => {
                            return SyncOutcome::failure(&PlinthError::validation(format!(
                                "Unknown document type '{raw}'"
                            )));
                        }
                    }
                }
            }
            Domain::Projects => {
                if lowered == "all" {
                    self.view.project_filter = None;
                } else {
                    match ProjectType::from_str(&lowered) {
                        Ok(project_type) => self.view.project_filter = Some(project_type),
                        Err(_) => {
                            return SyncOutcome::failure(&PlinthError::validation(format!(
                                "Unknown project type '{raw}'"
                            )));
                        }
                    }
                }
            }
            // the grammar only produces Filter for the listing domains
            _ => return SyncOutcome::silent(),
        }
        SyncOutcome::info(format!("Filter: {lowered}"))
    }

    fn apply_view_mode(&mut self, mode: ViewMode) -> SyncOutcome {
        match self.view.domain {
            Domain::Documents => self.view.document_view = mode,
            Domain::Projects => self.view.project_view = mode,
            _ => return SyncOutcome::silent(),
        }
        SyncOutcome::info(format!("View mode: {mode}"))
    }

    async fn run_mutation(&mut self, mutation: Mutation) -> SyncOutcome {
        if mutation.is_destructive() {
            let prompt = confirmation_prompt(&mutation);
            if !self.gate.confirm(&prompt).await {
                return SyncOutcome::info("Cancelled");
            }
        }
        let key = mutation.collection_key();
        let current = match self.coordinator.working_or_load(key).await {
            Ok(value) => value,
            Err(err) => return SyncOutcome::failure(&err),
        };
        match apply_mutation(&current, &mutation) {
            Ok((value, message)) => self.coordinator.commit(value, message).await,
            Err(err) => SyncOutcome::failure(&err),
        }
    }
}

fn confirmation_prompt(mutation: &Mutation) -> String {
    use Mutation::*;
    fn batch(noun: &str, targets: &BatchTargets) -> String {
        match targets {
            BatchTargets::All => format!("Remove ALL {noun}?"),
            BatchTargets::Names(names) => format!("Remove {} {noun}?", names.len()),
        }
    }
    match mutation {
        RemoveSkill { name } => format!("Remove skill '{name}'?"),
        RemoveLink { name } => format!("Remove link '{name}'?"),
        RemoveDocument { name } => format!("Remove document '{name}'?"),
        RemoveProject { name } => format!("Remove project '{name}'?"),
        RemoveBubble { id } => format!("Remove bubble {id}?"),
        BatchRemoveLinks { targets } => batch("links", targets),
        BatchRemoveDocuments { targets } => batch("documents", targets),
        BatchRemoveProjects { targets } => batch("projects", targets),
        BatchRemoveBubbles { targets } => batch("bubbles", targets),
        _ => "Are you sure?".to_string(),
    }
}

fn homepage(res: Result<(HomepageData, String)>) -> Result<(ContentValue, String)> {
    res.map(|(data, msg)| (ContentValue::Homepage(data), msg))
}

fn documents(res: Result<(DocumentsData, String)>) -> Result<(ContentValue, String)> {
    res.map(|(data, msg)| (ContentValue::Documents(data), msg))
}

fn projects(res: Result<(ProjectsData, String)>) -> Result<(ContentValue, String)> {
    res.map(|(data, msg)| (ContentValue::Projects(data), msg))
}

fn about(res: Result<(AboutData, String)>) -> Result<(ContentValue, String)> {
    res.map(|(data, msg)| (ContentValue::About(data), msg))
}

fn contacts(res: Result<(ContactsData, String)>) -> Result<(ContentValue, String)> {
    res.map(|(data, msg)| (ContentValue::Contacts(data), msg))
}

/// Routes a mutation to the handler owning its collection. Pure: the
/// returned value is committed (or discarded) by the caller.
fn apply_mutation(current: &ContentValue, mutation: &Mutation) -> Result<(ContentValue, String)> {
    use Mutation::*;
    match (current, mutation) {
        (ContentValue::Homepage(d), SetAuthorDescription { text }) => {
            homepage(handlers::skills::set_description(d, text))
        }
        (ContentValue::Homepage(d), AddSkill { name }) => homepage(handlers::skills::add(d, name)),
        (ContentValue::Homepage(d), EditSkill { old, new }) => {
            homepage(handlers::skills::edit(d, old, new))
        }
        (ContentValue::Homepage(d), RemoveSkill { name }) => {
            homepage(handlers::skills::remove(d, name))
        }
        (ContentValue::Homepage(d), AddLink { name, url }) => {
            homepage(handlers::links::add(d, name, url))
        }
        (ContentValue::Homepage(d), EditLink { name, new_name, new_url }) => {
            homepage(handlers::links::edit(d, name, new_name, new_url))
        }
        (ContentValue::Homepage(d), RemoveLink { name }) => {
            homepage(handlers::links::remove(d, name))
        }
        (ContentValue::Homepage(d), BatchAddLinks { entries }) => {
            homepage(handlers::links::batch_add(d, entries))
        }
        (ContentValue::Homepage(d), BatchRemoveLinks { targets }) => {
            homepage(handlers::links::batch_remove(d, targets))
        }

        (ContentValue::Documents(d), AddDocument { doc_type, name, url, description }) => {
            documents(handlers::documents::add(d, doc_type, name, url, description))
        }
        (
            ContentValue::Documents(d),
            EditDocument { name, doc_type, new_name, new_url, description },
        ) => documents(handlers::documents::edit(
            d, name, doc_type, new_name, new_url, description,
        )),
        (ContentValue::Documents(d), RemoveDocument { name }) => {
            documents(handlers::documents::remove(d, name))
        }
        (ContentValue::Documents(d), BatchAddDocuments { entries }) => {
            documents(handlers::documents::batch_add(d, entries))
        }
        (ContentValue::Documents(d), BatchRemoveDocuments { targets }) => {
            documents(handlers::documents::batch_remove(d, targets))
        }

        (
            ContentValue::Projects(d),
            AddProject { project_type, name, repo_url, live_url, description },
        ) => projects(handlers::projects::add(
            d, project_type, name, repo_url, live_url, description,
        )),
        (
            ContentValue::Projects(d),
            EditProject { name, project_type, new_name, repo_url, live_url, description },
        ) => projects(handlers::projects::edit(
            d, name, project_type, new_name, repo_url, live_url, description,
        )),
        (ContentValue::Projects(d), RemoveProject { name }) => {
            projects(handlers::projects::remove(d, name))
        }
        (ContentValue::Projects(d), BatchAddProjects { entries }) => {
            projects(handlers::projects::batch_add(d, entries))
        }
        (ContentValue::Projects(d), BatchRemoveProjects { targets }) => {
            projects(handlers::projects::batch_remove(d, targets))
        }

        (ContentValue::About(d), SetAboutDescription { text }) => {
            about(handlers::about::set_description(d, text))
        }
        (ContentValue::About(d), SetRepo { owner, name }) => {
            about(handlers::about::set_repo(d, owner, name))
        }
        (ContentValue::About(d), SetLocation { text }) => {
            about(handlers::about::set_location(d, text))
        }

        (ContentValue::Contacts(d), AddBubble { url }) => {
            contacts(handlers::contacts::add(d, url, &mut rand::thread_rng()))
        }
        (ContentValue::Contacts(d), EditBubble { id, url }) => {
            contacts(handlers::contacts::edit(d, id, url))
        }
        (ContentValue::Contacts(d), MoveBubble { id, x, y }) => {
            contacts(handlers::contacts::move_to(d, id, x, y))
        }
        (ContentValue::Contacts(d), ResizeBubble { id, size }) => {
            contacts(handlers::contacts::resize(d, id, size))
        }
        (ContentValue::Contacts(d), ColorBubble { id, color }) => {
            contacts(handlers::contacts::color(d, id, color))
        }
        (ContentValue::Contacts(d), RemoveBubble { id }) => {
            contacts(handlers::contacts::remove(d, id))
        }
        (ContentValue::Contacts(d), SetContactDescription { text }) => {
            contacts(handlers::contacts::set_description(d, text))
        }
        (ContentValue::Contacts(d), BatchAddBubbles { entries }) => {
            contacts(handlers::contacts::batch_add(d, entries, &mut rand::thread_rng()))
        }
        (ContentValue::Contacts(d), BatchRemoveBubbles { targets }) => {
            contacts(handlers::contacts::batch_remove(d, targets))
        }

        _ => Err(PlinthError::internal("mutation does not match its collection")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth_infrastructure::InMemoryContentStore;
    use tokio::sync::broadcast;

    const SECRET: &str = "hunter2";

    fn dispatcher(confirm: bool) -> CommandDispatcher {
        let store = Arc::new(InMemoryContentStore::new());
        let (tx, _) = broadcast::channel(16);
        CommandDispatcher::new(store, tx, Arc::new(PresetGate(confirm)), SECRET.to_string())
    }

    async fn unlocked(confirm: bool) -> CommandDispatcher {
        let mut d = dispatcher(confirm);
        d.hydrate().await.unwrap();
        match d.dispatch(&format!("edit {SECRET}.")).await {
            Dispatch::Outcome(outcome) => assert!(outcome.success),
            other => panic!("unexpected dispatch: {other:?}"),
        }
        d
    }

    fn outcome(dispatch: Dispatch) -> SyncOutcome {
        match dispatch {
            Dispatch::Outcome(outcome) => outcome,
            other => panic!("unexpected dispatch: {other:?}"),
        }
    }

    fn homepage_of(d: &CommandDispatcher) -> HomepageData {
        match d.working(CollectionKey::HomepageData).unwrap() {
            ContentValue::Homepage(data) => data.clone(),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_domain_verbs_are_inert_while_locked() {
        let mut d = dispatcher(true);
        d.hydrate().await.unwrap();
        let before = homepage_of(&d);
        let out = outcome(d.dispatch("add skill Rust").await);
        assert!(!out.has_message());
        assert_eq!(homepage_of(&d), before);
    }

    #[tokio::test]
    async fn test_bare_edit_requests_password_prompt() {
        let mut d = dispatcher(true);
        assert!(matches!(d.dispatch("edit").await, Dispatch::PasswordPrompt));
    }

    #[tokio::test]
    async fn test_wrong_secret_reports_and_stays_locked() {
        let mut d = dispatcher(true);
        let out = outcome(d.dispatch("edit nope.").await);
        assert!(!out.success);
        assert_eq!(d.session_state(), SessionState::Locked);
    }

    #[tokio::test]
    async fn test_edit_with_bare_period_is_silent() {
        let mut d = dispatcher(true);
        let out = outcome(d.dispatch("edit .").await);
        assert!(!out.has_message());
        assert_eq!(d.session_state(), SessionState::Locked);
    }

    #[tokio::test]
    async fn test_add_skill_success_message_names_the_skill() {
        let mut d = unlocked(true).await;
        outcome(d.dispatch("add skill Go").await);
        let out = outcome(d.dispatch("add skill Rust").await);
        assert!(out.success);
        assert!(out.message.contains("Rust"));
        assert_eq!(homepage_of(&d).author_skills, vec!["Go", "Rust"]);
    }

    #[tokio::test]
    async fn test_duplicate_skill_leaves_collection_unchanged() {
        let mut d = unlocked(true).await;
        outcome(d.dispatch("add skill Go").await);
        let out = outcome(d.dispatch("add skill Go").await);
        assert!(!out.success);
        assert!(out.message.contains("already exists"));
        assert_eq!(homepage_of(&d).author_skills, vec!["Go"]);
    }

    #[tokio::test]
    async fn test_remove_unknown_link_reports_not_found() {
        let mut d = unlocked(true).await;
        let out = outcome(d.dispatch("remove myname link").await);
        assert!(!out.success);
        assert!(out.message.contains("No link found"));
        assert!(out.message.contains("myname"));
    }

    #[tokio::test]
    async fn test_declined_confirmation_cancels_removal() {
        let mut d = unlocked(false).await;
        outcome(d.dispatch("add skill Go").await);
        let out = outcome(d.dispatch("remove skill Go").await);
        assert_eq!(out.message, "Cancelled");
        assert_eq!(homepage_of(&d).author_skills, vec!["Go"]);
    }

    #[tokio::test]
    async fn test_add_document_with_drive_url() {
        let mut d = unlocked(true).await;
        outcome(d.dispatch("documents").await);
        let out = outcome(
            d.dispatch("add video demo drive.google.com/file/d/ABC123/view A demo").await,
        );
        assert!(out.success);
        match d.working(CollectionKey::DocumentsData).unwrap() {
            ContentValue::Documents(data) => {
                let doc = data.find_document("demo").unwrap();
                assert_eq!(doc.url, "https://drive.google.com/file/d/ABC123/view");
                assert_eq!(doc.preview_url, "https://drive.google.com/file/d/ABC123/preview");
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_batch_remove_all_projects_reports_count() {
        let mut d = unlocked(true).await;
        outcome(d.dispatch("projects").await);
        for i in 1..=5 {
            let out = outcome(
                d.dispatch(&format!("add web p{i} github.com/me/p{i} - Project number {i}"))
                    .await,
            );
            assert!(out.success, "seed add failed: {}", out.message);
        }
        let out = outcome(d.dispatch("batch-remove all").await);
        assert!(out.success);
        assert!(out.message.contains('5'));
        match d.working(CollectionKey::ProjectsData).unwrap() {
            ContentValue::Projects(data) => assert!(data.projects.is_empty()),
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_filter_and_view_update_presentation_state() {
        let mut d = dispatcher(true);
        d.hydrate().await.unwrap();
        outcome(d.dispatch("documents").await);
        // locked mode on purpose: filter/view exist in both modes
        let out = outcome(d.dispatch("filter video").await);
        assert!(out.success);
        assert_eq!(d.view().document_filter, Some(DocumentType::Video));
        outcome(d.dispatch("view list").await);
        assert_eq!(d.view().document_view, ViewMode::List);
        let out = outcome(d.dispatch("filter gif").await);
        assert!(!out.success);
    }

    #[tokio::test]
    async fn test_exit_returns_to_locked() {
        let mut d = unlocked(true).await;
        let out = outcome(d.dispatch("exit").await);
        assert!(out.success);
        assert_eq!(d.session_state(), SessionState::Locked);
        // and domain verbs are inert again
        let out = outcome(d.dispatch("add skill Zig").await);
        assert!(!out.has_message());
    }

    #[tokio::test]
    async fn test_navigation_switches_domain() {
        let mut d = dispatcher(true);
        let out = outcome(d.dispatch("p").await);
        assert!(out.message.contains("projects"));
        assert_eq!(d.view().domain, Domain::Projects);
    }
}
