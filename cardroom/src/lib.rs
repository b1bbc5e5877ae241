//! # Cardroom
//!
//! Session registry and broadcast dispatch for multiplayer card game
//! servers.
//!
//! The connection layer accepts a client, wraps the outbound side of the
//! socket in a [`Transport`](server::Transport) and registers a
//! [`Session`](server::Session). Protocol logic advances the session
//! through `Init -> Established -> Game` and attaches player identity.
//! Lobby and game logic then query the registry and broadcast to sessions
//! selected by state.
//!
//! ## Quick Start
//!
//! ```ignore
//! use cardroom::prelude::*;
//!
//! let manager = SessionManager::builder().max_sessions(512).build();
//! let (transport, rx) = ChannelTransport::channel();
//! manager.add_session(Arc::new(Session::new(SessionId::new(1), "10.0.0.1", transport)))?;
//!
//! manager.send_to_all_sessions(&TransportSender, &payload, SessionState::Established)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Identifiers, lifecycle states, player identity, errors
//! - [`server`] - Sessions, transports, senders and the session manager

pub mod prelude;

/// Identifiers, lifecycle states and player identity.
pub mod core {
    pub use cardroom_core::*;
}

/// Session registry and dispatch.
pub mod server {
    pub use cardroom_server::*;
}

pub use cardroom_core::{Error, PlayerData, PlayerId, Result, SessionId, SessionState};
pub use cardroom_server::{Session, SessionManager, SessionManagerBuilder};
