//! Transport capability held by each session.
//!
//! The registry never frames or writes bytes itself. A session only keeps a
//! handle to the outbound side of its connection so that broadcasts can
//! queue frames and shutdown can close it.

use crate::error::TransportError;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Outbound side of a client connection.
///
/// Implementations must not block: both methods are called with the
/// registry lock held.
pub trait Transport: Send + Sync {
    /// Queues a frame for delivery to the client.
    ///
    /// # Errors
    /// Returns error if the connection is gone.
    fn send_frame(&self, frame: Bytes) -> Result<(), TransportError>;

    /// Closes the connection.
    ///
    /// # Errors
    /// Returns error if the connection was already closed or teardown failed.
    fn close(&self) -> Result<(), TransportError>;
}

/// Channel-backed transport feeding a connection's writer task.
///
/// Closing drops the sender, so the writer drains what is queued and then
/// sees the end of the stream.
pub struct ChannelTransport {
    tx: Mutex<Option<mpsc::UnboundedSender<Bytes>>>,
}

impl ChannelTransport {
    /// Creates a transport and the receiver its writer task reads from.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Returns true once `close` has been called or the writer went away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.lock().as_ref().is_none_or(|tx| tx.is_closed())
    }
}

impl Transport for ChannelTransport {
    fn send_frame(&self, frame: Bytes) -> Result<(), TransportError> {
        let guard = self.tx.lock();
        let tx = guard.as_ref().ok_or(TransportError::ConnectionClosed)?;
        tx.send(frame)
            .map_err(|_| TransportError::channel("writer task has exited"))
    }

    fn close(&self) -> Result<(), TransportError> {
        match self.tx.lock().take() {
            Some(_) => Ok(()),
            None => Err(TransportError::ConnectionClosed),
        }
    }
}
