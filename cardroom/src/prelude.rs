//! Prelude module for convenient imports.
//!
//! ```ignore
//! use cardroom::prelude::*;
//! ```

// Core types
pub use cardroom_core::{
    Error as CoreError, PlayerData, PlayerId, PlayerRights, Result as CoreResult, SessionId,
    SessionState,
};

// Server types
pub use cardroom_server::{
    ChannelTransport, FnSender, RemovalPolicy, SendError, ServerError, Session, SessionManager,
    SessionManagerBuilder, SessionManagerConfig, SessionSender, Transport, TransportError,
    TransportSender,
};

pub use std::sync::Arc;
