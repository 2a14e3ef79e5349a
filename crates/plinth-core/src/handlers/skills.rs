//! Author skill and description mutations (homepage collection).

use crate::content::HomepageData;
use crate::error::{PlinthError, Result};

/// Adds a skill. Skills are plain strings keyed case-insensitively.
pub fn add(data: &HomepageData, name: &str) -> Result<(HomepageData, String)> {
    if data.has_skill(name) {
        return Err(PlinthError::validation(format!(
            "Skill '{name}' already exists"
        )));
    }
    let mut next = data.clone();
    next.author_skills.push(name.to_string());
    Ok((next, format!("Skill '{name}' added")))
}

/// Renames a skill in place, preserving its position.
pub fn edit(data: &HomepageData, old: &str, new: &str) -> Result<(HomepageData, String)> {
    if !data.has_skill(old) {
        return Err(PlinthError::not_found("skill", old));
    }
    if !old.eq_ignore_ascii_case(new) && data.has_skill(new) {
        return Err(PlinthError::validation(format!(
            "Skill '{new}' already exists"
        )));
    }
    let needle = old.to_lowercase();
    let mut next = data.clone();
    for skill in &mut next.author_skills {
        if skill.to_lowercase() == needle {
            *skill = new.to_string();
        }
    }
    Ok((next, format!("Skill '{old}' renamed to '{new}'")))
}

/// Removes a skill by name.
pub fn remove(data: &HomepageData, name: &str) -> Result<(HomepageData, String)> {
    if !data.has_skill(name) {
        return Err(PlinthError::not_found("skill", name));
    }
    let needle = name.to_lowercase();
    let mut next = data.clone();
    next.author_skills.retain(|s| s.to_lowercase() != needle);
    Ok((next, format!("Skill '{name}' removed")))
}

/// Replaces the author description.
pub fn set_description(data: &HomepageData, text: &str) -> Result<(HomepageData, String)> {
    let mut next = data.clone();
    next.author_description = text.to_string();
    Ok((next, "Author description updated".to_string()))
}
