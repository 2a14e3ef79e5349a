//! Autocomplete items for the command input surface.
//!
//! An item is either a navigation action (performed immediately when
//! selected) or a verb template (its template string is inserted into the
//! input for the user to fill in). The two kinds are distinguished by an
//! explicit tagged variant, never by structural inspection.

use super::model::Domain;
use crate::session::SessionState;

/// One entry of the autocomplete panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleItem {
    /// Selecting navigates straight to the page.
    Nav { label: &'static str, target: Domain },
    /// Selecting inserts the template string into the input.
    Template { label: &'static str, insert: &'static str },
}

impl ConsoleItem {
    /// The text inserted into (or dispatched from) the input field.
    pub fn insert_text(&self) -> &'static str {
        match self {
            ConsoleItem::Nav { label, .. } => label,
            ConsoleItem::Template { insert, .. } => insert,
        }
    }
}

const NAV_ITEMS: &[ConsoleItem] = &[
    ConsoleItem::Nav { label: "home", target: Domain::Home },
    ConsoleItem::Nav { label: "documents", target: Domain::Documents },
    ConsoleItem::Nav { label: "projects", target: Domain::Projects },
    ConsoleItem::Nav { label: "about", target: Domain::About },
    ConsoleItem::Nav { label: "contacts", target: Domain::Contacts },
];

const HOME_TEMPLATES: &[ConsoleItem] = &[
    ConsoleItem::Template { label: "add link", insert: "add <name> <url>" },
    ConsoleItem::Template { label: "edit link", insert: "edit <name> - <new name> <new url>" },
    ConsoleItem::Template { label: "remove link", insert: "remove <name> link" },
    ConsoleItem::Template { label: "batch add links", insert: "batch-add <name> <url> | <name> <url>" },
    ConsoleItem::Template { label: "batch remove links", insert: "batch-remove <names|all>" },
    ConsoleItem::Template { label: "edit author", insert: "author edit <text>" },
    ConsoleItem::Template { label: "add skill", insert: "add skill <name>" },
    ConsoleItem::Template { label: "edit skill", insert: "edit skill <old> <new>" },
    ConsoleItem::Template { label: "remove skill", insert: "remove skill <name>" },
];

const DOCUMENT_TEMPLATES: &[ConsoleItem] = &[
    ConsoleItem::Template { label: "add document", insert: "add <type> <name> <url> <description>" },
    ConsoleItem::Template {
        label: "edit document",
        insert: "edit <name> - <type> <new name> <new url> <description>",
    },
    ConsoleItem::Template { label: "remove document", insert: "remove <name>" },
    ConsoleItem::Template {
        label: "batch add documents",
        insert: "batch-add <type> <name> <url> <description> | ...",
    },
    ConsoleItem::Template { label: "batch remove documents", insert: "batch-remove <names|all>" },
    ConsoleItem::Template { label: "filter", insert: "filter <type|all>" },
    ConsoleItem::Template { label: "view", insert: "view <blocks|list>" },
];

const PROJECT_TEMPLATES: &[ConsoleItem] = &[
    ConsoleItem::Template {
        label: "add project",
        insert: "add <type> <name> <repo url|-> <live url|-> <description>",
    },
    ConsoleItem::Template {
        label: "edit project",
        insert: "edit <name> - <type> <new name> <repo url|-> <live url|-> <description>",
    },
    ConsoleItem::Template { label: "remove project", insert: "remove <name>" },
    ConsoleItem::Template {
        label: "batch add projects",
        insert: "batch-add <type> <name> <repo url|-> <live url|-> <description> | ...",
    },
    ConsoleItem::Template { label: "batch remove projects", insert: "batch-remove <names|all>" },
    ConsoleItem::Template { label: "filter", insert: "filter <type|all>" },
    ConsoleItem::Template { label: "view", insert: "view <blocks|list>" },
];

const ABOUT_TEMPLATES: &[ConsoleItem] = &[
    ConsoleItem::Template { label: "edit description", insert: "description <text>" },
    ConsoleItem::Template { label: "set repo", insert: "repo <owner> <name>" },
    ConsoleItem::Template { label: "set location", insert: "location <text>" },
];

const CONTACT_TEMPLATES: &[ConsoleItem] = &[
    ConsoleItem::Template { label: "add bubble", insert: "add <url>" },
    ConsoleItem::Template { label: "edit bubble", insert: "edit <id> <url>" },
    ConsoleItem::Template { label: "move bubble", insert: "move <id> <x> <y>" },
    ConsoleItem::Template { label: "resize bubble", insert: "resize <id> <size>" },
    ConsoleItem::Template { label: "color bubble", insert: "color <id> <hex>" },
    ConsoleItem::Template { label: "remove bubble", insert: "remove <id>" },
    ConsoleItem::Template { label: "edit description", insert: "description <text>" },
    ConsoleItem::Template { label: "batch add bubbles", insert: "batch-add <url> | <url>" },
    ConsoleItem::Template { label: "batch remove bubbles", insert: "batch-remove <ids|all>" },
];

/// The autocomplete list for the current domain and session mode: folder
/// navigation while locked, navigation plus the domain's verb templates
/// once unlocked.
pub fn items_for(domain: Domain, state: SessionState) -> Vec<ConsoleItem> {
    let mut items: Vec<ConsoleItem> = NAV_ITEMS.to_vec();
    if state == SessionState::Unlocked {
        let templates = match domain {
            Domain::Home => HOME_TEMPLATES,
            Domain::Documents => DOCUMENT_TEMPLATES,
            Domain::Projects => PROJECT_TEMPLATES,
            Domain::About => ABOUT_TEMPLATES,
            Domain::Contacts => CONTACT_TEMPLATES,
        };
        items.extend(templates.iter().cloned());
    }
    items
}
