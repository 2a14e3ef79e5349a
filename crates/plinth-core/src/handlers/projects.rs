//! Project gallery mutations.

use std::str::FromStr;

use uuid::Uuid;

use crate::command::BatchTargets;
use crate::content::url::normalize_url;
use crate::content::{Project, ProjectType, ProjectsData};
use crate::error::{PlinthError, Result};

use super::today;

/// Placeholder for an absent URL on the command line.
const NONE_MARKER: &str = "-";

fn parse_type(raw: &str) -> Result<ProjectType> {
    ProjectType::from_str(&raw.to_lowercase()).map_err(|_| {
        PlinthError::validation(format!(
            "Unknown project type '{raw}' (expected web, mobile, desktop, ai or blockchain)"
        ))
    })
}

fn parse_url_arg(raw: &str) -> Option<String> {
    (raw != NONE_MARKER).then(|| normalize_url(raw))
}

fn build_project(
    project_type: ProjectType,
    name: &str,
    repo_url: Option<String>,
    live_url: Option<String>,
    description: &str,
    date_added: String,
) -> Project {
    Project {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        project_type,
        repo_url,
        live_url,
        description: description.to_string(),
        date_added,
    }
}

/// Adds a project. At least one of the repository and live URLs must be
/// given; `-` stands for "absent".
pub fn add(
    data: &ProjectsData,
    project_type: &str,
    name: &str,
    repo_url: &str,
    live_url: &str,
    description: &str,
) -> Result<(ProjectsData, String)> {
    let project_type = parse_type(project_type)?;
    if let Some(existing) = data.find_project(name) {
        return Err(PlinthError::validation(format!(
            "A project named '{}' already exists",
            existing.name
        )));
    }
    let repo_url = parse_url_arg(repo_url);
    let live_url = parse_url_arg(live_url);
    if repo_url.is_none() && live_url.is_none() {
        return Err(PlinthError::validation(
            "A project needs a repository URL or a live URL",
        ));
    }
    let mut next = data.clone();
    next.projects.push(build_project(
        project_type,
        name,
        repo_url,
        live_url,
        description,
        today(),
    ));
    Ok((next, format!("Project '{name}' added")))
}

/// Replaces a project's fields, preserving its id and original `dateAdded`.
pub fn edit(
    data: &ProjectsData,
    name: &str,
    project_type: &str,
    new_name: &str,
    repo_url: &str,
    live_url: &str,
    description: &str,
) -> Result<(ProjectsData, String)> {
    let project_type = parse_type(project_type)?;
    let Some(original) = data.find_project(name) else {
        return Err(PlinthError::not_found("project", name));
    };
    if !name.eq_ignore_ascii_case(new_name) {
        if let Some(existing) = data.find_project(new_name) {
            return Err(PlinthError::validation(format!(
                "A project named '{}' already exists",
                existing.name
            )));
        }
    }
    let repo_url = parse_url_arg(repo_url);
    let live_url = parse_url_arg(live_url);
    if repo_url.is_none() && live_url.is_none() {
        return Err(PlinthError::validation(
            "A project needs a repository URL or a live URL",
        ));
    }
    let id = original.id.clone();
    let date_added = original.date_added.clone();
    let needle = name.to_lowercase();
    let mut next = data.clone();
    for project in &mut next.projects {
        if project.name.to_lowercase() == needle {
            let mut replacement = build_project(
                project_type,
                new_name,
                repo_url.clone(),
                live_url.clone(),
                description,
                date_added.clone(),
            );
            replacement.id = id.clone();
            *project = replacement;
        }
    }
    Ok((next, format!("Project '{name}' updated")))
}

/// Removes a project by name.
pub fn remove(data: &ProjectsData, name: &str) -> Result<(ProjectsData, String)> {
    if data.find_project(name).is_none() {
        return Err(PlinthError::not_found("project", name));
    }
    let needle = name.to_lowercase();
    let mut next = data.clone();
    next.projects.retain(|p| p.name.to_lowercase() != needle);
    Ok((next, format!("Project '{name}' removed")))
}

/// Adds every well-formed `type name repo live description` sub-entry.
pub fn batch_add(data: &ProjectsData, entries: &[String]) -> Result<(ProjectsData, String)> {
    let mut next = data.clone();
    let mut added = 0usize;
    for entry in entries {
        let parts: Vec<&str> = entry.split_whitespace().collect();
        let [project_type, name, repo_url, live_url, description @ ..] = parts.as_slice() else {
            continue;
        };
        if description.is_empty() {
            continue;
        }
        let Ok(project_type) = parse_type(project_type) else {
            continue;
        };
        if next.find_project(name).is_some() {
            continue;
        }
        let repo_url = parse_url_arg(repo_url);
        let live_url = parse_url_arg(live_url);
        if repo_url.is_none() && live_url.is_none() {
            continue;
        }
        next.projects.push(build_project(
            project_type,
            name,
            repo_url,
            live_url,
            &description.join(" "),
            today(),
        ));
        added += 1;
    }
    Ok((next, format!("Added {added} projects")))
}

/// Removes the named projects (or all of them), reporting the count.
pub fn batch_remove(data: &ProjectsData, targets: &BatchTargets) -> Result<(ProjectsData, String)> {
    let mut next = data.clone();
    let removed = match targets {
        BatchTargets::All => {
            let count = next.projects.len();
            next.projects.clear();
            count
        }
        BatchTargets::Names(names) => {
            let needles: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
            let before = next.projects.len();
            next.projects
                .retain(|p| !needles.contains(&p.name.to_lowercase()));
            before - next.projects.len()
        }
    };
    Ok((next, format!("Removed {removed} projects")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_with_repo_only() {
        let (next, _) = add(
            &ProjectsData::default(),
            "web",
            "plinth",
            "github.com/me/plinth",
            "-",
            "Personal site",
        )
        .unwrap();
        let project = next.find_project("plinth").unwrap();
        assert_eq!(project.repo_url.as_deref(), Some("https://github.com/me/plinth"));
        assert_eq!(project.live_url, None);
    }

    #[test]
    fn test_add_requires_at_least_one_url() {
        let err = add(&ProjectsData::default(), "web", "ghost", "-", "-", "No urls").unwrap_err();
        assert!(err.to_string().contains("repository URL or a live URL"));
    }

    #[test]
    fn test_add_unknown_type_rejected() {
        let err = add(&ProjectsData::default(), "game", "x", "-", "example.com", "d").unwrap_err();
        assert!(err.to_string().contains("game"));
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitively() {
        let (data, _) = add(
            &ProjectsData::default(),
            "ai",
            "Sorter",
            "github.com/me/sorter",
            "-",
            "Sorts",
        )
        .unwrap();
        let err = add(&data, "web", "sorter", "-", "sorter.example.com", "Again").unwrap_err();
        assert!(err.to_string().contains("Sorter"));
        assert_eq!(data.projects.len(), 1);
    }

    #[test]
    fn test_edit_preserves_date_added() {
        let (data, _) = add(
            &ProjectsData::default(),
            "web",
            "plinth",
            "github.com/me/plinth",
            "-",
            "Personal site",
        )
        .unwrap();
        let original_date = data.projects[0].date_added.clone();
        let (next, _) = edit(
            &data,
            "plinth",
            "web",
            "plinth2",
            "github.com/me/plinth2",
            "plinth.example.com",
            "Rebuilt",
        )
        .unwrap();
        let project = next.find_project("plinth2").unwrap();
        assert_eq!(project.date_added, original_date);
        assert_eq!(project.live_url.as_deref(), Some("https://plinth.example.com"));
    }

    #[test]
    fn test_batch_remove_all_on_five_projects() {
        let entries: Vec<String> = (1..=5)
            .map(|i| format!("web p{i} github.com/me/p{i} - Project {i}"))
            .collect();
        let (data, _) = batch_add(&ProjectsData::default(), &entries).unwrap();
        assert_eq!(data.projects.len(), 5);
        let (next, msg) = batch_remove(&data, &BatchTargets::All).unwrap();
        assert!(next.projects.is_empty());
        assert!(msg.contains('5'));
    }

    #[test]
    fn test_batch_add_skips_url_less_entries() {
        let entries = vec![
            "web a github.com/a - Fine".to_string(),
            "web b - - Skipped".to_string(),
        ];
        let (next, msg) = batch_add(&ProjectsData::default(), &entries).unwrap();
        assert_eq!(next.projects.len(), 1);
        assert!(msg.contains('1'));
    }
}
