//! Console session state machine.
//!
//! `Locked` is the initial state. The only transitions are
//! `Locked -> Unlocked` via the shared secret (inline `edit <secret>.` or
//! the password prompt, both through [`ConsoleSession::unlock`]) and
//! `Unlocked -> Locked` via the exit command. The session is never
//! persisted and resets on every restart.

use serde::{Deserialize, Serialize};

use crate::error::{PlinthError, Result};

/// Which verbs are dispatchable: navigation only, or the full domain set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Locked,
    Unlocked,
}

/// Single per-view session instance.
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    state: SessionState,
}

impl Default for ConsoleSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Locked,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == SessionState::Unlocked
    }

    /// Attempts the locked -> unlocked transition.
    ///
    /// An incorrect secret leaves the state unchanged. The failure message
    /// carries no account information; there are no usernames, only the one
    /// shared secret.
    pub fn unlock(&mut self, candidate: &str, secret: &str) -> Result<()> {
        if candidate == secret {
            self.state = SessionState::Unlocked;
            Ok(())
        } else {
            Err(PlinthError::Auth)
        }
    }

    /// The unlocked -> locked transition (`exit` command).
    pub fn lock(&mut self) {
        self.state = SessionState::Locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_locked() {
        let session = ConsoleSession::new();
        assert_eq!(session.state(), SessionState::Locked);
        assert!(!session.is_unlocked());
    }

    #[test]
    fn test_unlock_with_correct_secret() {
        let mut session = ConsoleSession::new();
        session.unlock("hunter2", "hunter2").unwrap();
        assert!(session.is_unlocked());
    }

    #[test]
    fn test_wrong_secret_leaves_state_unchanged() {
        let mut session = ConsoleSession::new();
        let err = session.unlock("guess", "hunter2").unwrap_err();
        assert!(err.is_auth());
        assert_eq!(session.state(), SessionState::Locked);
    }

    #[test]
    fn test_lock_returns_to_locked() {
        let mut session = ConsoleSession::new();
        session.unlock("hunter2", "hunter2").unwrap();
        session.lock();
        assert_eq!(session.state(), SessionState::Locked);
    }
}
