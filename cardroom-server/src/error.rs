//! Error types for server operations.

use crate::sender::SendError;
use cardroom_core::SessionId;
use thiserror::Error;

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Registry error.
    #[error(transparent)]
    Core(#[from] cardroom_core::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Send error.
    #[error(transparent)]
    Send(#[from] SendError),

    /// No session with the given id is registered.
    #[error("session not found: {id}")]
    SessionNotFound {
        /// Requested session id.
        id: SessionId,
    },
}

/// Error type for transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection closed.
    #[error("connection closed")]
    ConnectionClosed,

    /// Channel error.
    #[error("channel error: {message}")]
    Channel {
        /// Error message.
        message: String,
    },
}

impl TransportError {
    /// Creates a channel error.
    pub fn channel(message: impl Into<String>) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }
}
