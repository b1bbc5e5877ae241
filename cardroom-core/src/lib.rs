//! # Cardroom Core
//!
//! Core types shared by every cardroom crate.
//!
//! This crate provides:
//! - Session and player identifiers minted by the connection and
//!   authentication layers
//! - The ordered session lifecycle (`Init < Established < Game`)
//! - Player identity records attached to authenticated sessions
//! - Error types for registry consistency faults

pub mod error;
pub mod player;
pub mod types;

pub use error::{Error, Result};
pub use player::{PlayerData, PlayerRights};
pub use types::{PlayerId, SessionId, SessionState};
