//! Sender capability used by registry broadcasts.

use crate::session::Session;
use bytes::Bytes;
use std::sync::Arc;

/// Strategy that delivers one payload to one session.
///
/// The registry calls `send` once per selected session while holding its
/// lock. Implementations must not block and must not call back into the
/// registry.
pub trait SessionSender<P: ?Sized>: Send + Sync {
    /// Delivers `payload` to `session`.
    ///
    /// # Errors
    /// Returns error if the payload could not be queued for this session.
    fn send(&self, session: &Arc<Session>, payload: &P) -> Result<(), SendError>;
}

/// Error type for send operations.
#[derive(Debug, Clone)]
pub struct SendError {
    /// Error message.
    pub message: String,
}

impl SendError {
    /// Creates a new send error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "send error: {}", self.message)
    }
}

impl std::error::Error for SendError {}

/// Wrapper to convert a closure into a `SessionSender`.
pub struct FnSender<F> {
    sender: F,
}

impl<F> FnSender<F> {
    /// Creates a new function sender.
    pub fn new(sender: F) -> Self {
        Self { sender }
    }
}

impl<P, F> SessionSender<P> for FnSender<F>
where
    P: ?Sized,
    F: Fn(&Arc<Session>, &P) -> Result<(), SendError> + Send + Sync,
{
    fn send(&self, session: &Arc<Session>, payload: &P) -> Result<(), SendError> {
        (self.sender)(session, payload)
    }
}

/// Sender that queues the payload on each session's own transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportSender;

impl SessionSender<Bytes> for TransportSender {
    fn send(&self, session: &Arc<Session>, payload: &Bytes) -> Result<(), SendError> {
        session
            .transport()
            .send_frame(payload.clone())
            .map_err(|e| SendError::new(e.to_string()))
    }
}

impl SessionSender<[u8]> for TransportSender {
    fn send(&self, session: &Arc<Session>, payload: &[u8]) -> Result<(), SendError> {
        self.send(session, &Bytes::copy_from_slice(payload))
    }
}
