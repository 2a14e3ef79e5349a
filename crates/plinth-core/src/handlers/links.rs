//! Social link mutations (homepage collection).

use crate::content::url::normalize_url;
use crate::content::{HomepageData, SocialLink};
use crate::error::{PlinthError, Result};

/// Adds a link. The lower-cased name is the unique key.
pub fn add(data: &HomepageData, name: &str, url: &str) -> Result<(HomepageData, String)> {
    if let Some(existing) = data.find_link(name) {
        return Err(PlinthError::validation(format!(
            "A link named '{}' already exists",
            existing.name
        )));
    }
    let mut next = data.clone();
    next.social_links.push(SocialLink::new(name, normalize_url(url)));
    Ok((next, format!("Link '{name}' added")))
}

/// Renames a link and replaces its URL.
pub fn edit(
    data: &HomepageData,
    name: &str,
    new_name: &str,
    new_url: &str,
) -> Result<(HomepageData, String)> {
    if data.find_link(name).is_none() {
        return Err(PlinthError::not_found("link", name));
    }
    // the new name must not collide with any other link
    if !name.eq_ignore_ascii_case(new_name) {
        if let Some(existing) = data.find_link(new_name) {
            return Err(PlinthError::validation(format!(
                "A link named '{}' already exists",
                existing.name
            )));
        }
    }
    let needle = name.to_lowercase();
    let mut next = data.clone();
    for link in &mut next.social_links {
        if link.name.to_lowercase() == needle {
            link.name = new_name.to_string();
            link.url = normalize_url(new_url);
        }
    }
    Ok((next, format!("Link '{name}' updated to '{new_name}'")))
}

/// Removes a link by name.
pub fn remove(data: &HomepageData, name: &str) -> Result<(HomepageData, String)> {
    if data.find_link(name).is_none() {
        return Err(PlinthError::not_found("link", name));
    }
    let needle = name.to_lowercase();
    let mut next = data.clone();
    next.social_links.retain(|l| l.name.to_lowercase() != needle);
    Ok((next, format!("Link '{name}' removed")))
}

/// Adds every well-formed `name url` sub-entry; malformed or colliding
/// entries are skipped, not fatal.
pub fn batch_add(data: &HomepageData, entries: &[String]) -> Result<(HomepageData, String)> {
    let mut next = data.clone();
    let mut added = 0usize;
    for entry in entries {
        let mut parts = entry.split_whitespace();
        let (Some(name), Some(url)) = (parts.next(), parts.next()) else {
            continue;
        };
        if parts.next().is_some() || next.find_link(name).is_some() {
            continue;
        }
        next.social_links.push(SocialLink::new(name, normalize_url(url)));
        added += 1;
    }
    Ok((next, format!("Added {added} links")))
}

/// Removes the named links (or all of them), reporting the removed count.
pub fn batch_remove(
    data: &HomepageData,
    targets: &crate::command::BatchTargets,
) -> Result<(HomepageData, String)> {
    let mut next = data.clone();
    let removed = match targets {
        crate::command::BatchTargets::All => {
            let count = next.social_links.len();
            next.social_links.clear();
            count
        }
        crate::command::BatchTargets::Names(names) => {
            let needles: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
            let before = next.social_links.len();
            next.social_links
                .retain(|l| !needles.contains(&l.name.to_lowercase()));
            before - next.social_links.len()
        }
    };
    Ok((next, format!("Removed {removed} links")))
}
