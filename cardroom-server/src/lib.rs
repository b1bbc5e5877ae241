//! # Cardroom Server
//!
//! Server-side session directory for cardroom game servers.
//!
//! This crate provides:
//! - The per-client [`Session`] record and its lifecycle state
//! - A concurrency-safe [`SessionManager`] with point lookups, roster
//!   queries and state-filtered broadcast dispatch
//! - The [`Transport`] and [`SessionSender`] capabilities the registry
//!   consumes, plus channel-backed implementations
//! - A builder for registry configuration

pub mod builder;
pub mod error;
pub mod manager;
pub mod sender;
pub mod session;
pub mod transport;

pub use builder::{RemovalPolicy, SessionManagerBuilder, SessionManagerConfig};
pub use error::{ServerError, TransportError};
pub use manager::SessionManager;
pub use sender::{FnSender, SendError, SessionSender, TransportSender};
pub use session::Session;
pub use transport::{ChannelTransport, Transport};
