//! Ordered grammar tables and the line parser.
//!
//! Each domain supplies an ordered list of rules; matching is
//! first-match-wins within the tables consulted for the current session
//! mode. A line that matches nothing is a `Command::Noop` and is cleared
//! silently, never surfaced as an error.
//!
//! Verb and literal tokens match case-insensitively; captured arguments
//! keep the casing the user typed. The trailing `Tail` token of a rule
//! absorbs the remainder of the line, which is how URLs-with-descriptions
//! and free-form text arguments are captured.

use std::str::FromStr;

use super::model::{BatchTargets, Command, Domain, Mutation, ViewMode};
use crate::session::SessionState;

/// One token of a rule pattern.
#[derive(Debug, Clone, Copy)]
enum Tok {
    /// Literal keyword, matched case-insensitively.
    Lit(&'static str),
    /// Single positional argument, captured verbatim.
    Arg,
    /// Literal `-` separator between old and new argument groups.
    Dash,
    /// Greedy trailing capture: absorbs the rest of the line (at least one
    /// token). Only valid as the last pattern element.
    Tail,
}

/// A single grammar table entry: an argument shape plus the constructor
/// for its tagged command variant.
struct GrammarRule {
    pattern: &'static [Tok],
    build: fn(Vec<String>) -> Command,
}

fn match_pattern(pattern: &[Tok], tokens: &[&str]) -> Option<Vec<String>> {
    let mut caps = Vec::new();
    let mut i = 0;
    for tok in pattern {
        match tok {
            Tok::Lit(lit) => {
                if !tokens.get(i)?.eq_ignore_ascii_case(lit) {
                    return None;
                }
                i += 1;
            }
            Tok::Dash => {
                if *tokens.get(i)? != "-" {
                    return None;
                }
                i += 1;
            }
            Tok::Arg => {
                caps.push(tokens.get(i)?.to_string());
                i += 1;
            }
            Tok::Tail => {
                if i >= tokens.len() {
                    return None;
                }
                caps.push(tokens[i..].join(" "));
                i = tokens.len();
            }
        }
    }
    (i == tokens.len()).then_some(caps)
}

fn apply_rules(rules: &[GrammarRule], tokens: &[&str]) -> Option<Command> {
    rules
        .iter()
        .find_map(|rule| match_pattern(rule.pattern, tokens).map(rule.build))
}

/// Splits a batch-add tail into pipe-separated sub-entries.
fn split_batch(tail: &str) -> Vec<String> {
    tail.split('|')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

use Tok::{Arg, Dash, Lit, Tail};

/// `filter <type|all>` and `view <blocks|list>` are presentation-state only
/// and stay reachable in both locked and unlocked modes for the listing
/// domains.
const PRESENTATION_RULES: &[GrammarRule] = &[
    GrammarRule {
        pattern: &[Lit("filter"), Arg],
        build: |mut caps| Command::Filter { raw: caps.remove(0) },
    },
    GrammarRule {
        pattern: &[Lit("view"), Arg],
        build: |caps| match ViewMode::from_str(&caps[0].to_lowercase()) {
            Ok(mode) => Command::View(mode),
            Err(_) => Command::Noop,
        },
    },
];

const HOME_RULES: &[GrammarRule] = &[
    GrammarRule {
        pattern: &[Lit("author"), Lit("edit"), Tail],
        build: |mut caps| Command::Mutate(Mutation::SetAuthorDescription { text: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("add"), Lit("skill"), Tail],
        build: |mut caps| Command::Mutate(Mutation::AddSkill { name: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("edit"), Lit("skill"), Arg, Tail],
        build: |mut caps| {
            let old = caps.remove(0);
            Command::Mutate(Mutation::EditSkill { old, new: caps.remove(0) })
        },
    },
    GrammarRule {
        pattern: &[Lit("remove"), Lit("skill"), Tail],
        build: |mut caps| Command::Mutate(Mutation::RemoveSkill { name: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("add"), Arg, Arg],
        build: |mut caps| {
            let name = caps.remove(0);
            Command::Mutate(Mutation::AddLink { name, url: caps.remove(0) })
        },
    },
    GrammarRule {
        pattern: &[Lit("edit"), Arg, Dash, Arg, Arg],
        build: |mut caps| {
            let name = caps.remove(0);
            let new_name = caps.remove(0);
            Command::Mutate(Mutation::EditLink { name, new_name, new_url: caps.remove(0) })
        },
    },
    GrammarRule {
        pattern: &[Lit("remove"), Arg, Lit("link")],
        build: |mut caps| Command::Mutate(Mutation::RemoveLink { name: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("batch-add"), Tail],
        build: |caps| Command::Mutate(Mutation::BatchAddLinks { entries: split_batch(&caps[0]) }),
    },
    GrammarRule {
        pattern: &[Lit("batch-remove"), Tail],
        build: |caps| {
            Command::Mutate(Mutation::BatchRemoveLinks { targets: BatchTargets::from_tail(&caps[0]) })
        },
    },
];

const DOCUMENT_RULES: &[GrammarRule] = &[
    GrammarRule {
        pattern: &[Lit("add"), Arg, Arg, Arg, Tail],
        build: |mut caps| {
            let doc_type = caps.remove(0);
            let name = caps.remove(0);
            let url = caps.remove(0);
            Command::Mutate(Mutation::AddDocument { doc_type, name, url, description: caps.remove(0) })
        },
    },
    GrammarRule {
        pattern: &[Lit("edit"), Arg, Dash, Arg, Arg, Arg, Tail],
        build: |mut caps| {
            let name = caps.remove(0);
            let doc_type = caps.remove(0);
            let new_name = caps.remove(0);
            let new_url = caps.remove(0);
            Command::Mutate(Mutation::EditDocument {
                name,
                doc_type,
                new_name,
                new_url,
                description: caps.remove(0),
            })
        },
    },
    GrammarRule {
        pattern: &[Lit("remove"), Tail],
        build: |mut caps| Command::Mutate(Mutation::RemoveDocument { name: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("batch-add"), Tail],
        build: |caps| {
            Command::Mutate(Mutation::BatchAddDocuments { entries: split_batch(&caps[0]) })
        },
    },
    GrammarRule {
        pattern: &[Lit("batch-remove"), Tail],
        build: |caps| {
            Command::Mutate(Mutation::BatchRemoveDocuments {
                targets: BatchTargets::from_tail(&caps[0]),
            })
        },
    },
];

const PROJECT_RULES: &[GrammarRule] = &[
    GrammarRule {
        pattern: &[Lit("add"), Arg, Arg, Arg, Arg, Tail],
        build: |mut caps| {
            let project_type = caps.remove(0);
            let name = caps.remove(0);
            let repo_url = caps.remove(0);
            let live_url = caps.remove(0);
            Command::Mutate(Mutation::AddProject {
                project_type,
                name,
                repo_url,
                live_url,
                description: caps.remove(0),
            })
        },
    },
    GrammarRule {
        pattern: &[Lit("edit"), Arg, Dash, Arg, Arg, Arg, Arg, Tail],
        build: |mut caps| {
            let name = caps.remove(0);
            let project_type = caps.remove(0);
            let new_name = caps.remove(0);
            let repo_url = caps.remove(0);
            let live_url = caps.remove(0);
            Command::Mutate(Mutation::EditProject {
                name,
                project_type,
                new_name,
                repo_url,
                live_url,
                description: caps.remove(0),
            })
        },
    },
    GrammarRule {
        pattern: &[Lit("remove"), Tail],
        build: |mut caps| Command::Mutate(Mutation::RemoveProject { name: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("batch-add"), Tail],
        build: |caps| Command::Mutate(Mutation::BatchAddProjects { entries: split_batch(&caps[0]) }),
    },
    GrammarRule {
        pattern: &[Lit("batch-remove"), Tail],
        build: |caps| {
            Command::Mutate(Mutation::BatchRemoveProjects {
                targets: BatchTargets::from_tail(&caps[0]),
            })
        },
    },
];

const ABOUT_RULES: &[GrammarRule] = &[
    GrammarRule {
        pattern: &[Lit("description"), Tail],
        build: |mut caps| Command::Mutate(Mutation::SetAboutDescription { text: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("repo"), Arg, Arg],
        build: |mut caps| {
            let owner = caps.remove(0);
            Command::Mutate(Mutation::SetRepo { owner, name: caps.remove(0) })
        },
    },
    GrammarRule {
        pattern: &[Lit("location"), Tail],
        build: |mut caps| Command::Mutate(Mutation::SetLocation { text: caps.remove(0) }),
    },
];

const CONTACT_RULES: &[GrammarRule] = &[
    GrammarRule {
        pattern: &[Lit("add"), Arg],
        build: |mut caps| Command::Mutate(Mutation::AddBubble { url: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("edit"), Arg, Arg],
        build: |mut caps| {
            let id = caps.remove(0);
            Command::Mutate(Mutation::EditBubble { id, url: caps.remove(0) })
        },
    },
    GrammarRule {
        pattern: &[Lit("move"), Arg, Arg, Arg],
        build: |mut caps| {
            let id = caps.remove(0);
            let x = caps.remove(0);
            Command::Mutate(Mutation::MoveBubble { id, x, y: caps.remove(0) })
        },
    },
    GrammarRule {
        pattern: &[Lit("resize"), Arg, Arg],
        build: |mut caps| {
            let id = caps.remove(0);
            Command::Mutate(Mutation::ResizeBubble { id, size: caps.remove(0) })
        },
    },
    GrammarRule {
        pattern: &[Lit("color"), Arg, Arg],
        build: |mut caps| {
            let id = caps.remove(0);
            Command::Mutate(Mutation::ColorBubble { id, color: caps.remove(0) })
        },
    },
    GrammarRule {
        pattern: &[Lit("remove"), Arg],
        build: |mut caps| Command::Mutate(Mutation::RemoveBubble { id: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("description"), Tail],
        build: |mut caps| Command::Mutate(Mutation::SetContactDescription { text: caps.remove(0) }),
    },
    GrammarRule {
        pattern: &[Lit("batch-add"), Tail],
        build: |caps| Command::Mutate(Mutation::BatchAddBubbles { entries: split_batch(&caps[0]) }),
    },
    GrammarRule {
        pattern: &[Lit("batch-remove"), Tail],
        build: |caps| {
            Command::Mutate(Mutation::BatchRemoveBubbles {
                targets: BatchTargets::from_tail(&caps[0]),
            })
        },
    },
];

fn domain_rules(domain: Domain) -> &'static [GrammarRule] {
    match domain {
        Domain::Home => HOME_RULES,
        Domain::Documents => DOCUMENT_RULES,
        Domain::Projects => PROJECT_RULES,
        Domain::About => ABOUT_RULES,
        Domain::Contacts => CONTACT_RULES,
    }
}

// ---------------------------------------------------------------------------
// Parser entry point
// ---------------------------------------------------------------------------

/// Parses one input line against the grammar for the active domain and
/// session mode.
pub fn parse_line(raw: &str, domain: Domain, state: SessionState) -> Command {
    let line = raw.trim();
    if line.is_empty() {
        return Command::Noop;
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();

    // Session grammar comes first: the two unlock forms while locked,
    // `exit` while unlocked.
    match state {
        SessionState::Locked => {
            if let Some(cmd) = match_unlock(&tokens) {
                return cmd;
            }
        }
        SessionState::Unlocked => {
            if tokens.len() == 1 && tokens[0].eq_ignore_ascii_case("exit") {
                return Command::Exit;
            }
        }
    }

    // Navigation stays available in both modes.
    if tokens.len() == 1 {
        if let Some(target) = Domain::from_verb(&tokens[0].to_lowercase()) {
            return Command::Navigate(target);
        }
    }

    if matches!(domain, Domain::Documents | Domain::Projects) {
        if let Some(cmd) = apply_rules(PRESENTATION_RULES, &tokens) {
            return cmd;
        }
    }

    if state == SessionState::Unlocked {
        if let Some(cmd) = apply_rules(domain_rules(domain), &tokens) {
            return cmd;
        }
    }

    Command::Noop
}

/// The two unlock forms: bare `edit` opens the password prompt, and
/// `edit <secret>.` authenticates inline. The trailing period is required;
/// a bare period carries no secret and matches neither form.
fn match_unlock(tokens: &[&str]) -> Option<Command> {
    if !tokens[0].eq_ignore_ascii_case("edit") {
        return None;
    }
    if tokens.len() == 1 {
        return Some(Command::PromptUnlock);
    }
    let tail = tokens[1..].join(" ");
    let secret = tail.strip_suffix('.')?.trim();
    if secret.is_empty() {
        return None;
    }
    Some(Command::Unlock {
        secret: secret.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_unlocked(line: &str, domain: Domain) -> Command {
        parse_line(line, domain, SessionState::Unlocked)
    }

    #[test]
    fn test_navigation_and_aliases_in_both_modes() {
        for state in [SessionState::Locked, SessionState::Unlocked] {
            assert_eq!(
                parse_line("projects", Domain::Home, state),
                Command::Navigate(Domain::Projects)
            );
            assert_eq!(
                parse_line("c", Domain::Home, state),
                Command::Navigate(Domain::Contacts)
            );
        }
    }

    #[test]
    fn test_bare_edit_opens_prompt() {
        assert_eq!(
            parse_line("edit", Domain::Home, SessionState::Locked),
            Command::PromptUnlock
        );
    }

    #[test]
    fn test_inline_unlock_requires_trailing_period() {
        assert_eq!(
            parse_line("edit hunter2.", Domain::Home, SessionState::Locked),
            Command::Unlock { secret: "hunter2".to_string() }
        );
        // no period: neither unlock form matches
        assert_eq!(
            parse_line("edit hunter2", Domain::Home, SessionState::Locked),
            Command::Noop
        );
    }

    #[test]
    fn test_bare_period_is_a_noop() {
        // `edit .` carries no secret and matches neither unlock form
        assert_eq!(
            parse_line("edit .", Domain::Home, SessionState::Locked),
            Command::Noop
        );
    }

    #[test]
    fn test_domain_verbs_unreachable_while_locked() {
        assert_eq!(
            parse_line("add skill Rust", Domain::Home, SessionState::Locked),
            Command::Noop
        );
        assert_eq!(
            parse_line("remove demo", Domain::Documents, SessionState::Locked),
            Command::Noop
        );
    }

    #[test]
    fn test_add_skill_wins_over_add_link() {
        assert_eq!(
            parse_unlocked("add skill Rust", Domain::Home),
            Command::Mutate(Mutation::AddSkill { name: "Rust".to_string() })
        );
        assert_eq!(
            parse_unlocked("add github github.com/me", Domain::Home),
            Command::Mutate(Mutation::AddLink {
                name: "github".to_string(),
                url: "github.com/me".to_string(),
            })
        );
    }

    #[test]
    fn test_remove_link_requires_trailing_keyword() {
        assert_eq!(
            parse_unlocked("remove myname link", Domain::Home),
            Command::Mutate(Mutation::RemoveLink { name: "myname".to_string() })
        );
        assert_eq!(parse_unlocked("remove myname", Domain::Home), Command::Noop);
    }

    #[test]
    fn test_add_document_greedy_description() {
        let cmd = parse_unlocked(
            "add video demo drive.google.com/file/d/ABC123/view A demo",
            Domain::Documents,
        );
        assert_eq!(
            cmd,
            Command::Mutate(Mutation::AddDocument {
                doc_type: "video".to_string(),
                name: "demo".to_string(),
                url: "drive.google.com/file/d/ABC123/view".to_string(),
                description: "A demo".to_string(),
            })
        );
    }

    #[test]
    fn test_capture_casing_preserved() {
        let cmd = parse_unlocked("ADD VIDEO Demo drive.google.com/file/d/ABC123/view x", Domain::Documents);
        match cmd {
            Command::Mutate(Mutation::AddDocument { name, url, .. }) => {
                assert_eq!(name, "Demo");
                assert!(url.contains("ABC123"));
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_edit_link_with_dash_separator() {
        assert_eq!(
            parse_unlocked("edit github - codeberg codeberg.org/me", Domain::Home),
            Command::Mutate(Mutation::EditLink {
                name: "github".to_string(),
                new_name: "codeberg".to_string(),
                new_url: "codeberg.org/me".to_string(),
            })
        );
    }

    #[test]
    fn test_batch_add_splits_on_pipes() {
        let cmd = parse_unlocked("batch-add a example.com/a | b example.com/b |", Domain::Home);
        assert_eq!(
            cmd,
            Command::Mutate(Mutation::BatchAddLinks {
                entries: vec!["a example.com/a".to_string(), "b example.com/b".to_string()],
            })
        );
    }

    #[test]
    fn test_batch_remove_all() {
        assert_eq!(
            parse_unlocked("batch-remove all", Domain::Projects),
            Command::Mutate(Mutation::BatchRemoveProjects { targets: BatchTargets::All })
        );
    }

    #[test]
    fn test_filter_and_view_available_while_locked() {
        assert_eq!(
            parse_line("filter video", Domain::Documents, SessionState::Locked),
            Command::Filter { raw: "video".to_string() }
        );
        assert_eq!(
            parse_line("view list", Domain::Projects, SessionState::Locked),
            Command::View(ViewMode::List)
        );
        // but not outside the listing domains
        assert_eq!(
            parse_line("view list", Domain::Home, SessionState::Locked),
            Command::Noop
        );
    }

    #[test]
    fn test_view_with_unknown_layout_is_noop() {
        assert_eq!(
            parse_unlocked("view mosaic", Domain::Documents),
            Command::Noop
        );
    }

    #[test]
    fn test_exit_only_while_unlocked() {
        assert_eq!(
            parse_line("exit", Domain::Home, SessionState::Unlocked),
            Command::Exit
        );
        assert_eq!(
            parse_line("exit", Domain::Home, SessionState::Locked),
            Command::Noop
        );
    }

    #[test]
    fn test_contact_geometry_verbs() {
        assert_eq!(
            parse_unlocked("move b1 30 60", Domain::Contacts),
            Command::Mutate(Mutation::MoveBubble {
                id: "b1".to_string(),
                x: "30".to_string(),
                y: "60".to_string(),
            })
        );
        assert_eq!(
            parse_unlocked("resize b1 90", Domain::Contacts),
            Command::Mutate(Mutation::ResizeBubble { id: "b1".to_string(), size: "90".to_string() })
        );
    }

    #[test]
    fn test_unmatched_line_is_silent_noop() {
        assert_eq!(parse_unlocked("frobnicate the widgets", Domain::Home), Command::Noop);
        assert_eq!(parse_line("", Domain::Home, SessionState::Locked), Command::Noop);
    }
}
