//! Per-mutation outcome reporting.

use crate::content::{CollectionKey, ContentValue};
use crate::error::PlinthError;

/// The result of one command dispatch, consumed by the feedback surface
/// (toast message) and then discarded.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    pub success: bool,
    pub message: String,
    pub collection_key: Option<CollectionKey>,
    pub new_value: Option<ContentValue>,
}

impl SyncOutcome {
    /// A successful mutation outcome carrying the new snapshot.
    pub fn ok(message: impl Into<String>, value: ContentValue) -> Self {
        Self {
            success: true,
            message: message.into(),
            collection_key: Some(value.key()),
            new_value: Some(value),
        }
    }

    /// A successful outcome with no collection change (navigation,
    /// presentation state, session transitions).
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            collection_key: None,
            new_value: None,
        }
    }

    /// A failed outcome from a domain or persistence error.
    pub fn failure(err: &PlinthError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            collection_key: None,
            new_value: None,
        }
    }

    /// No feedback at all: unmatched input clears silently.
    pub fn silent() -> Self {
        Self {
            success: true,
            message: String::new(),
            collection_key: None,
            new_value: None,
        }
    }

    /// Whether the feedback surface should show a toast for this outcome.
    pub fn has_message(&self) -> bool {
        !self.message.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{CollectionKey, HomepageData};

    #[test]
    fn test_ok_carries_key_and_value() {
        let value = ContentValue::Homepage(HomepageData::default());
        let outcome = SyncOutcome::ok("Link added", value);
        assert!(outcome.success);
        assert_eq!(outcome.collection_key, Some(CollectionKey::HomepageData));
        assert!(outcome.new_value.is_some());
    }

    #[test]
    fn test_silent_has_no_message() {
        assert!(!SyncOutcome::silent().has_message());
    }

    #[test]
    fn test_failure_from_error() {
        let err = PlinthError::not_found("link", "myname");
        let outcome = SyncOutcome::failure(&err);
        assert!(!outcome.success);
        assert!(outcome.message.contains("myname"));
    }
}
