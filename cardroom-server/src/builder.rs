//! Session manager builder and configuration.

use crate::manager::SessionManager;

/// What `remove_session` does with the removed session's transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Only unlink the session; the caller closes the transport.
    #[default]
    KeepTransport,
    /// Unlink the session and close its transport.
    CloseTransport,
}

/// Configuration for a session manager.
#[derive(Debug, Clone, Default)]
pub struct SessionManagerConfig {
    /// Maximum number of registered sessions (0 = unlimited).
    pub max_sessions: usize,
    /// Transport handling on `remove_session`.
    pub removal_policy: RemovalPolicy,
}

/// Builder for configuring and creating a session manager.
#[derive(Debug, Clone, Default)]
pub struct SessionManagerBuilder {
    config: SessionManagerConfig,
}

impl SessionManagerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of sessions (0 = unlimited).
    #[must_use]
    pub fn max_sessions(mut self, max: usize) -> Self {
        self.config.max_sessions = max;
        self
    }

    /// Sets the removal policy.
    #[must_use]
    pub fn removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.config.removal_policy = policy;
        self
    }

    /// Builds the session manager.
    #[must_use]
    pub fn build(self) -> SessionManager {
        SessionManager::with_config(self.config)
    }
}
