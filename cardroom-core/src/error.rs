//! Error types for cardroom session registry operations.

use crate::types::{SessionId, SessionState};
use thiserror::Error;

/// Core error type for session registry operations.
///
/// Ordinary absence ("no such session", "nobody matched") is never an
/// error; lookups return `Option` or empty collections for that.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A session with the same id is already registered.
    #[error("session {id} already exists")]
    SessionAlreadyExists {
        /// Id of the rejected session.
        id: SessionId,
    },

    /// A session's state and player data violate the registry invariants.
    #[error("invalid session state: session {id}: {reason}")]
    InvalidSessionState {
        /// Id of the offending session.
        id: SessionId,
        /// What was inconsistent.
        reason: &'static str,
    },

    /// Attempted lifecycle transition is not allowed.
    #[error("invalid state transition for session {id}: {from} -> {to}")]
    InvalidTransition {
        /// Id of the session.
        id: SessionId,
        /// Current state.
        from: SessionState,
        /// Requested state.
        to: SessionState,
    },

    /// The registry is at its configured capacity.
    #[error("session limit reached (max: {max})")]
    SessionLimitReached {
        /// Configured maximum.
        max: usize,
    },
}

impl Error {
    /// Creates an invalid session state error.
    pub fn invalid_session(id: SessionId, reason: &'static str) -> Self {
        Self::InvalidSessionState { id, reason }
    }

    /// Returns true if this error signals internal registry corruption.
    #[must_use]
    pub fn is_consistency_fault(&self) -> bool {
        matches!(self, Self::InvalidSessionState { .. })
    }
}

/// Result type alias for cardroom core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_already_exists_display() {
        let err = Error::SessionAlreadyExists {
            id: SessionId::new(7),
        };
        assert_eq!(err.to_string(), "session 7 already exists");
    }

    #[test]
    fn test_invalid_session_display() {
        let err = Error::invalid_session(SessionId::new(3), "missing player data");
        assert_eq!(
            err.to_string(),
            "invalid session state: session 3: missing player data"
        );
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = Error::InvalidTransition {
            id: SessionId::new(1),
            from: SessionState::Game,
            to: SessionState::Init,
        };
        assert_eq!(
            err.to_string(),
            "invalid state transition for session 1: game -> init"
        );
    }

    #[test]
    fn test_session_limit_display() {
        let err = Error::SessionLimitReached { max: 4 };
        assert_eq!(err.to_string(), "session limit reached (max: 4)");
    }

    #[test]
    fn test_consistency_fault_classification() {
        assert!(Error::invalid_session(SessionId::new(1), "x").is_consistency_fault());
        assert!(
            !Error::SessionAlreadyExists {
                id: SessionId::new(1)
            }
            .is_consistency_fault()
        );
        assert!(!Error::SessionLimitReached { max: 1 }.is_consistency_fault());
    }
}
