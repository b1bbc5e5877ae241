//! Per-client session record.

use crate::transport::Transport;
use cardroom_core::{Error, PlayerData, Result, SessionId, SessionState};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Server-side state of one connected client.
///
/// Identity, address and transport are fixed at acceptance. Lifecycle
/// state, player identity and the two flags are updated by protocol and
/// game-flow logic while the session sits in the registry.
pub struct Session {
    id: SessionId,
    client_addr: String,
    transport: Box<dyn Transport>,
    connected_at: Instant,
    state: RwLock<SessionState>,
    player_data: RwLock<Option<Arc<PlayerData>>>,
    ready: AtomicBool,
    wants_lobby_msg: AtomicBool,
    closed: AtomicBool,
}

impl Session {
    /// Creates a session in `Init` state.
    ///
    /// # Arguments
    /// * `id` - Id minted by the connection layer
    /// * `client_addr` - Remote address captured at accept time
    /// * `transport` - Outbound side of the connection
    pub fn new(
        id: SessionId,
        client_addr: impl Into<String>,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            id,
            client_addr: client_addr.into(),
            transport: Box::new(transport),
            connected_at: Instant::now(),
            state: RwLock::new(SessionState::Init),
            player_data: RwLock::new(None),
            ready: AtomicBool::new(false),
            wants_lobby_msg: AtomicBool::new(true),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns the session id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the remote address captured at accept time.
    #[must_use]
    pub fn client_addr(&self) -> &str {
        &self.client_addr
    }

    /// Returns the transport handle.
    #[must_use]
    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn connected_at(&self) -> Instant {
        self.connected_at
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Moves the session to a new lifecycle state.
    ///
    /// # Errors
    /// Returns `InvalidTransition` when asked to go back to `Init`.
    pub fn set_state(&self, state: SessionState) -> Result<()> {
        let mut current = self.state.write();
        if state == SessionState::Init && *current != SessionState::Init {
            return Err(Error::InvalidTransition {
                id: self.id,
                from: *current,
                to: state,
            });
        }
        if *current != state {
            tracing::debug!("Session {} state {} -> {}", self.id, *current, state);
            *current = state;
        }
        Ok(())
    }

    /// Returns the attached player identity, if authenticated.
    #[must_use]
    pub fn player_data(&self) -> Option<Arc<PlayerData>> {
        self.player_data.read().clone()
    }

    /// Attaches or replaces the player identity.
    pub fn set_player_data(&self, player: Arc<PlayerData>) {
        *self.player_data.write() = Some(player);
    }

    /// Returns the ready flag.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Marks the session ready.
    pub fn set_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Clears the ready flag.
    pub fn reset_ready(&self) {
        self.ready.store(false, Ordering::Release);
    }

    /// Returns true if the client wants lobby broadcasts.
    #[must_use]
    pub fn wants_lobby_msg(&self) -> bool {
        self.wants_lobby_msg.load(Ordering::Acquire)
    }

    /// Sets the lobby broadcast preference.
    pub fn set_wants_lobby_msg(&self, wants: bool) {
        self.wants_lobby_msg.store(wants, Ordering::Release);
    }

    /// Closes the transport.
    ///
    /// Only the first call reaches the transport. Close errors are logged
    /// and dropped.
    pub fn close_transport(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Err(e) = self.transport.close() {
            tracing::debug!("Session {} transport close error: {}", self.id, e);
        }
    }

    /// Returns true once the transport has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("client_addr", &self.client_addr)
            .field("state", &self.state())
            .field("player_data", &self.player_data())
            .field("ready", &self.is_ready())
            .field("wants_lobby_msg", &self.wants_lobby_msg())
            .field("closed", &self.is_closed())
            .finish()
    }
}
