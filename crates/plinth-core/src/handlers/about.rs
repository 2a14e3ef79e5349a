//! About-page scalar mutations.

use crate::content::AboutData;
use crate::error::Result;

/// Replaces the about-page description.
pub fn set_description(data: &AboutData, text: &str) -> Result<(AboutData, String)> {
    let mut next = data.clone();
    next.description = text.to_string();
    Ok((next, "About description updated".to_string()))
}

/// Points the about page at a repository.
pub fn set_repo(data: &AboutData, owner: &str, name: &str) -> Result<(AboutData, String)> {
    let mut next = data.clone();
    next.repo.owner = owner.to_string();
    next.repo.name = name.to_string();
    Ok((next, format!("Repository set to {owner}/{name}")))
}

/// Replaces the free-form location details.
pub fn set_location(data: &AboutData, text: &str) -> Result<(AboutData, String)> {
    let mut next = data.clone();
    next.location = text.to_string();
    Ok((next, "Location updated".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_repo() {
        let (next, msg) = set_repo(&AboutData::default(), "me", "plinth").unwrap();
        assert_eq!(next.repo.owner, "me");
        assert_eq!(next.repo.name, "plinth");
        assert!(msg.contains("me/plinth"));
    }

    #[test]
    fn test_scalars_are_independent() {
        let (step1, _) = set_description(&AboutData::default(), "Hello").unwrap();
        let (step2, _) = set_location(&step1, "Lisbon, Portugal").unwrap();
        assert_eq!(step2.description, "Hello");
        assert_eq!(step2.location, "Lisbon, Portugal");
    }
}
