//! Mutation handlers, one module per content domain.
//!
//! Every handler is pure with respect to the collection it owns: it
//! validates its arguments, computes the new collection value and returns
//! it together with a human-readable outcome message. Persistence and
//! broadcast happen later, in the sync coordinator. Handlers never touch
//! another collection.

pub mod about;
pub mod contacts;
pub mod documents;
pub mod links;
pub mod projects;
pub mod skills;

/// Today's date in the ISO `YYYY-MM-DD` form used by `dateAdded`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_is_iso_date() {
        let date = today();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
        assert_eq!(&date[7..8], "-");
    }
}
