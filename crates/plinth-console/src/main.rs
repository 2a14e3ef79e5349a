use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use plinth_application::dispatcher::{CommandDispatcher, ConfirmationGate, Dispatch};
use plinth_core::SyncOutcome;
use plinth_core::command::templates::ConsoleItem;
use plinth_core::command::ViewMode;
use plinth_core::content::ContentValue;
use plinth_core::session::SessionState;
use plinth_core::store::ContentStore;
use plinth_infrastructure::{FileContentStore, PlinthPaths, config_loader};

/// CLI helper for rustyline that completes against the current
/// autocomplete items: navigation while locked, navigation plus the active
/// domain's verb templates once unlocked.
#[derive(Clone)]
struct CliHelper {
    items: Arc<RwLock<Vec<(String, String)>>>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn set_items(&self, items: &[ConsoleItem]) {
        let mut entries = self.items.write().expect("helper items lock");
        entries.clear();
        for item in items {
            let label = match item {
                ConsoleItem::Nav { label, .. } => label.to_string(),
                ConsoleItem::Template { label, .. } => label.to_string(),
            };
            entries.push((label, item.insert_text().to_string()));
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        let entries = self.items.read().expect("helper items lock");
        let candidates: Vec<Pair> = entries
            .iter()
            .filter(|(label, insert)| {
                !line.is_empty() && (label.starts_with(line) || insert.starts_with(line))
            })
            .map(|(label, insert)| Pair {
                display: format!("{label}  ({insert})"),
                replacement: insert.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() {
            return None;
        }
        let entries = self.items.read().expect("helper items lock");
        entries
            .iter()
            .find(|(_, insert)| insert.starts_with(line) && insert.len() > line.len())
            .map(|(_, insert)| insert[line.len()..].to_string())
    }
}

impl Highlighter for CliHelper {}

impl Validator for CliHelper {}

/// Blocking y/n prompt on stdin.
struct StdinGate;

#[async_trait]
impl ConfirmationGate for StdinGate {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = format!("{} [y/N] ", prompt.yellow());
        tokio::task::spawn_blocking(move || {
            use std::io::Write;
            print!("{prompt}");
            let _ = std::io::stdout().flush();
            let mut answer = String::new();
            if std::io::stdin().read_line(&mut answer).is_err() {
                return false;
            }
            matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
        })
        .await
        .unwrap_or(false)
    }
}

fn show_outcome(outcome: &SyncOutcome) {
    if !outcome.has_message() {
        return;
    }
    if outcome.success {
        println!("{}", outcome.message.green());
    } else {
        println!("{}", outcome.message.red());
    }
}

fn prompt_for(dispatcher: &CommandDispatcher) -> String {
    let domain = dispatcher.view().domain;
    match dispatcher.session_state() {
        SessionState::Unlocked => format!("{domain} {}> ", "[edit]".bright_yellow()),
        SessionState::Locked => format!("{domain} > "),
    }
}

/// Renders the active page from the working copies, honoring the view's
/// filter and layout state.
fn render(dispatcher: &CommandDispatcher) {
    let view = dispatcher.view();
    let Some(value) = dispatcher.working(view.domain.collection_key()) else {
        return;
    };
    match value {
        ContentValue::Homepage(data) => {
            if !data.author_description.is_empty() {
                println!("{}", data.author_description.bright_black());
            }
            if !data.author_skills.is_empty() {
                println!("skills: {}", data.author_skills.join(", ").cyan());
            }
            for link in &data.social_links {
                println!("  {}  {}", link.name.bold(), link.url.bright_black());
            }
        }
        ContentValue::Documents(data) => {
            let docs: Vec<_> = data
                .documents
                .iter()
                .filter(|d| view.document_filter.is_none_or(|f| d.doc_type == f))
                .collect();
            for doc in docs {
                match view.document_view {
                    ViewMode::List => println!(
                        "  {} [{}] {}",
                        doc.name.bold(),
                        doc.doc_type,
                        doc.url.bright_black()
                    ),
                    ViewMode::Blocks => {
                        println!("  {} [{}] {}", doc.name.bold(), doc.doc_type, doc.date_added);
                        println!("    {}", doc.description);
                        println!("    {}", doc.preview_url.bright_black());
                    }
                }
            }
        }
        ContentValue::Projects(data) => {
            let projects: Vec<_> = data
                .projects
                .iter()
                .filter(|p| view.project_filter.is_none_or(|f| p.project_type == f))
                .collect();
            for project in projects {
                match view.project_view {
                    ViewMode::List => {
                        println!("  {} [{}]", project.name.bold(), project.project_type)
                    }
                    ViewMode::Blocks => {
                        println!(
                            "  {} [{}] {}",
                            project.name.bold(),
                            project.project_type,
                            project.date_added
                        );
                        println!("    {}", project.description);
                        if let Some(repo) = &project.repo_url {
                            println!("    repo: {}", repo.bright_black());
                        }
                        if let Some(live) = &project.live_url {
                            println!("    live: {}", live.bright_black());
                        }
                    }
                }
            }
        }
        ContentValue::About(data) => {
            if !data.description.is_empty() {
                println!("{}", data.description);
            }
            if !data.repo.owner.is_empty() {
                println!("repo: {}/{}", data.repo.owner.cyan(), data.repo.name.cyan());
            }
            if !data.location.is_empty() {
                println!("location: {}", data.location);
            }
        }
        ContentValue::Contacts(data) => {
            if !data.description.is_empty() {
                println!("{}", data.description);
            }
            for bubble in &data.bubbles {
                println!(
                    "  {}  {}  ({}, {}) size {} {}",
                    bubble.id[..8.min(bubble.id.len())].bold(),
                    bubble.url,
                    bubble.x,
                    bubble.y,
                    bubble.size,
                    bubble.color.bright_black()
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // ===== Backend initialization =====
    let paths = PlinthPaths::new(None);
    let config = config_loader::load_or_init(&paths).await?;
    let content_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| paths.content_dir());
    let store = Arc::new(FileContentStore::new(content_dir));
    let mut store_events = store.subscribe();

    // cross-view channel; other mounted views in the same process would
    // subscribe to the same sender
    let (crosstab, _) = broadcast::channel(32);

    let mut dispatcher =
        CommandDispatcher::new(store, crosstab, Arc::new(StdinGate), config.secret.clone());
    dispatcher.hydrate().await?;

    // ===== REPL setup =====
    let helper = CliHelper::new();
    helper.set_items(&dispatcher.console_items());
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper.clone()));

    println!("{}", "=== Plinth Console ===".bright_magenta().bold());
    println!(
        "{}",
        "Navigate with home/documents/projects/about/contacts, 'edit' to unlock, 'quit' to leave."
            .bright_black()
    );
    println!();

    // ===== Main REPL loop =====
    loop {
        // apply store notifications that arrived while the prompt was idle
        loop {
            match store_events.try_recv() {
                Ok(event) => dispatcher.apply_store_event(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }

        let readline = rl.readline(&prompt_for(&dispatcher));
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "quit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match dispatcher.dispatch(trimmed).await {
                    Dispatch::Outcome(outcome) => {
                        show_outcome(&outcome);
                        if outcome.success && outcome.has_message() {
                            render(&dispatcher);
                        }
                    }
                    Dispatch::PasswordPrompt => {
                        let candidate = rl.readline(&"Password: ".bright_yellow().to_string())?;
                        let outcome = dispatcher.unlock_with(candidate.trim());
                        show_outcome(&outcome);
                    }
                }
                helper.set_items(&dispatcher.console_items());
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Input error: {err}").red());
                break;
            }
        }
    }

    Ok(())
}
