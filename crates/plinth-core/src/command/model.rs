//! Typed command model produced by the parser.
//!
//! A `Command` is immutable once parsed: created by the parser, consumed
//! once by the dispatcher, then discarded. Argument values keep the casing
//! the user typed (URLs and Drive ids are case-sensitive); only verb
//! matching is case-insensitive.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::content::CollectionKey;

/// The five site pages a console can navigate between. Each owns one
/// content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Domain {
    Home,
    Documents,
    Projects,
    About,
    Contacts,
}

impl Domain {
    /// Resolves a navigation verb or its single-letter alias.
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "home" | "h" => Some(Domain::Home),
            "documents" | "d" => Some(Domain::Documents),
            "projects" | "p" => Some(Domain::Projects),
            "about" | "a" => Some(Domain::About),
            "contacts" | "c" => Some(Domain::Contacts),
            _ => None,
        }
    }

    /// The collection key this domain's mutations target.
    pub fn collection_key(&self) -> CollectionKey {
        match self {
            Domain::Home => CollectionKey::HomepageData,
            Domain::Documents => CollectionKey::DocumentsData,
            Domain::Projects => CollectionKey::ProjectsData,
            Domain::About => CollectionKey::AboutData,
            Domain::Contacts => CollectionKey::ContactsData,
        }
    }
}

/// Listing layout for the documents and projects galleries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ViewMode {
    Blocks,
    List,
}

/// Target set of a `batch-remove` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BatchTargets {
    /// Literal `all`: every item in the collection.
    All,
    /// Space-separated keys.
    Names(Vec<String>),
}

impl BatchTargets {
    pub fn from_tail(tail: &str) -> Self {
        if tail.trim().eq_ignore_ascii_case("all") {
            BatchTargets::All
        } else {
            BatchTargets::Names(tail.split_whitespace().map(str::to_string).collect())
        }
    }
}

/// A structured content mutation, one variant per domain operation.
///
/// Argument values are carried raw; domain validation (type names, numbers,
/// hex colors, URL shapes) happens in the mutation handlers so that bad
/// values surface as visible outcomes rather than silent parse misses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    // Homepage
    SetAuthorDescription { text: String },
    AddSkill { name: String },
    EditSkill { old: String, new: String },
    RemoveSkill { name: String },
    AddLink { name: String, url: String },
    EditLink { name: String, new_name: String, new_url: String },
    RemoveLink { name: String },
    BatchAddLinks { entries: Vec<String> },
    BatchRemoveLinks { targets: BatchTargets },

    // Documents
    AddDocument { doc_type: String, name: String, url: String, description: String },
    EditDocument { name: String, doc_type: String, new_name: String, new_url: String, description: String },
    RemoveDocument { name: String },
    BatchAddDocuments { entries: Vec<String> },
    BatchRemoveDocuments { targets: BatchTargets },

    // Projects
    AddProject { project_type: String, name: String, repo_url: String, live_url: String, description: String },
    EditProject { name: String, project_type: String, new_name: String, repo_url: String, live_url: String, description: String },
    RemoveProject { name: String },
    BatchAddProjects { entries: Vec<String> },
    BatchRemoveProjects { targets: BatchTargets },

    // About
    SetAboutDescription { text: String },
    SetRepo { owner: String, name: String },
    SetLocation { text: String },

    // Contacts
    AddBubble { url: String },
    EditBubble { id: String, url: String },
    MoveBubble { id: String, x: String, y: String },
    ResizeBubble { id: String, size: String },
    ColorBubble { id: String, color: String },
    RemoveBubble { id: String },
    SetContactDescription { text: String },
    BatchAddBubbles { entries: Vec<String> },
    BatchRemoveBubbles { targets: BatchTargets },
}

impl Mutation {
    /// The collection key this mutation writes to.
    pub fn collection_key(&self) -> CollectionKey {
        use Mutation::*;
        match self {
            SetAuthorDescription { .. } | AddSkill { .. } | EditSkill { .. }
            | RemoveSkill { .. } | AddLink { .. } | EditLink { .. } | RemoveLink { .. }
            | BatchAddLinks { .. } | BatchRemoveLinks { .. } => CollectionKey::HomepageData,

            AddDocument { .. } | EditDocument { .. } | RemoveDocument { .. }
            | BatchAddDocuments { .. } | BatchRemoveDocuments { .. } => {
                CollectionKey::DocumentsData
            }

            AddProject { .. } | EditProject { .. } | RemoveProject { .. }
            | BatchAddProjects { .. } | BatchRemoveProjects { .. } => {
                CollectionKey::ProjectsData
            }

            SetAboutDescription { .. } | SetRepo { .. } | SetLocation { .. } => {
                CollectionKey::AboutData
            }

            AddBubble { .. } | EditBubble { .. } | MoveBubble { .. } | ResizeBubble { .. }
            | ColorBubble { .. } | RemoveBubble { .. } | SetContactDescription { .. }
            | BatchAddBubbles { .. } | BatchRemoveBubbles { .. } => {
                CollectionKey::ContactsData
            }
        }
    }

    /// Destructive mutations require a yes/no confirmation before dispatch.
    pub fn is_destructive(&self) -> bool {
        use Mutation::*;
        matches!(
            self,
            RemoveSkill { .. }
                | RemoveLink { .. }
                | BatchRemoveLinks { .. }
                | RemoveDocument { .. }
                | BatchRemoveDocuments { .. }
                | RemoveProject { .. }
                | BatchRemoveProjects { .. }
                | RemoveBubble { .. }
                | BatchRemoveBubbles { .. }
        )
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Switch the active page.
    Navigate(Domain),
    /// Bare `edit`: open the password prompt.
    PromptUnlock,
    /// Inline `edit <secret>.` (trailing period required).
    Unlock { secret: String },
    /// Return from unlocked to locked.
    Exit,
    /// Presentation-only: narrow the listing to one item type (or `all`).
    Filter { raw: String },
    /// Presentation-only: switch listing layout.
    View(ViewMode),
    /// A content mutation for the active domain.
    Mutate(Mutation),
    /// Matched no rule; cleared silently with no surfaced error.
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_aliases() {
        assert_eq!(Domain::from_verb("h"), Some(Domain::Home));
        assert_eq!(Domain::from_verb("documents"), Some(Domain::Documents));
        assert_eq!(Domain::from_verb("x"), None);
    }

    #[test]
    fn test_batch_targets_all_is_case_insensitive() {
        assert_eq!(BatchTargets::from_tail("ALL"), BatchTargets::All);
        assert_eq!(
            BatchTargets::from_tail("one two"),
            BatchTargets::Names(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn test_destructive_flags() {
        assert!(Mutation::RemoveLink { name: "x".into() }.is_destructive());
        assert!(
            Mutation::BatchRemoveDocuments { targets: BatchTargets::All }.is_destructive()
        );
        assert!(!Mutation::AddSkill { name: "Rust".into() }.is_destructive());
    }

    #[test]
    fn test_mutation_keys() {
        assert_eq!(
            Mutation::AddSkill { name: "Rust".into() }.collection_key(),
            CollectionKey::HomepageData
        );
        assert_eq!(
            Mutation::SetRepo { owner: "me".into(), name: "site".into() }.collection_key(),
            CollectionKey::AboutData
        );
    }
}
