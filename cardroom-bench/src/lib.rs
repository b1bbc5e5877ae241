//! # Cardroom Bench
//!
//! Fixtures shared by the criterion benchmarks.

use bytes::Bytes;
use cardroom_core::{PlayerData, SessionId, SessionState};
use cardroom_server::{ChannelTransport, Session, SessionManager};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Builds a registry with `count` sessions.
///
/// Every other session is in a game, the rest sit in the lobby. The
/// returned receivers keep each session's transport open.
#[must_use]
pub fn populated_manager(count: u32) -> (SessionManager, Vec<UnboundedReceiver<Bytes>>) {
    let manager = SessionManager::new();
    let mut receivers = Vec::with_capacity(count as usize);

    for raw in 1..=count {
        let (transport, rx) = ChannelTransport::channel();
        let addr = format!("10.0.{}.{}", raw / 256, raw % 256);
        let session = Session::new(SessionId::new(raw), addr, transport);
        session.set_player_data(Arc::new(PlayerData::new(raw, format!("player{raw}"))));
        let state = if raw % 2 == 0 {
            SessionState::Game
        } else {
            SessionState::Established
        };
        // Forward transitions from Init always succeed.
        let _ = session.set_state(state);
        if manager.add_session(Arc::new(session)).is_ok() {
            receivers.push(rx);
        }
    }

    (manager, receivers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populated_manager() {
        let (manager, receivers) = populated_manager(10);
        assert_eq!(manager.raw_session_count(), 10);
        assert_eq!(receivers.len(), 10);
        assert_eq!(manager.get_player_data_list().unwrap().len(), 5);
    }
}
