//! Session registry.
//!
//! [`SessionManager`] is the directory of every connected client. All
//! operations run under a single re-entrant lock, so a visitor or sender
//! invoked by the registry may call back into it on the same thread. The
//! inner map is only borrowed for short stretches and never across a
//! caller-supplied callback.

use crate::builder::{RemovalPolicy, SessionManagerBuilder, SessionManagerConfig};
use crate::error::ServerError;
use crate::sender::SessionSender;
use crate::session::Session;
use cardroom_core::{Error, PlayerData, PlayerId, Result, SessionId, SessionState};
use parking_lot::ReentrantMutex;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

type SessionMap = BTreeMap<SessionId, Arc<Session>>;

/// Concurrency-safe directory of active sessions.
///
/// Sessions are kept in ascending id order, which is also the order in
/// which broadcasts reach the sender.
pub struct SessionManager {
    sessions: ReentrantMutex<RefCell<SessionMap>>,
    config: SessionManagerConfig,
}

impl SessionManager {
    /// Creates a new session manager with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionManagerConfig::default())
    }

    /// Creates a new session manager with custom configuration.
    #[must_use]
    pub fn with_config(config: SessionManagerConfig) -> Self {
        Self {
            sessions: ReentrantMutex::new(RefCell::new(BTreeMap::new())),
            config,
        }
    }

    /// Returns a builder for a session manager.
    #[must_use]
    pub fn builder() -> SessionManagerBuilder {
        SessionManagerBuilder::new()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &SessionManagerConfig {
        &self.config
    }

    /// Returns true if at least one session is registered.
    #[must_use]
    pub fn has_sessions(&self) -> bool {
        !self.sessions.lock().borrow().is_empty()
    }

    /// Registers a session.
    ///
    /// # Errors
    /// Returns `SessionAlreadyExists` if the id is taken (the registered
    /// session is left untouched) and `SessionLimitReached` if the
    /// configured maximum is reached.
    pub fn add_session(&self, session: Arc<Session>) -> Result<()> {
        let guard = self.sessions.lock();
        let mut map = guard.borrow_mut();
        let id = session.id();

        if map.contains_key(&id) {
            tracing::warn!("Rejecting duplicate session id {}", id);
            return Err(Error::SessionAlreadyExists { id });
        }

        let max = self.config.max_sessions;
        if max != 0 && map.len() >= max {
            tracing::warn!("Max sessions reached, rejecting session {}", id);
            return Err(Error::SessionLimitReached { max });
        }

        map.insert(id, session);
        tracing::debug!("Session {} added ({} registered)", id, map.len());
        Ok(())
    }

    /// Attaches player data to a registered session.
    ///
    /// Unknown ids are ignored: the session may have disconnected while
    /// authentication was still running.
    pub fn set_session_player_data(&self, id: SessionId, player: Arc<PlayerData>) {
        let guard = self.sessions.lock();
        if let Some(session) = guard.borrow().get(&id) {
            session.set_player_data(player);
        }
    }

    /// Removes a session and reports whether it was registered.
    ///
    /// Under [`RemovalPolicy::KeepTransport`] the transport is left open
    /// for the caller to close; under [`RemovalPolicy::CloseTransport`] it
    /// is closed here.
    pub fn remove_session(&self, id: SessionId) -> bool {
        let guard = self.sessions.lock();
        let removed = guard.borrow_mut().remove(&id);
        match removed {
            Some(session) => {
                tracing::debug!("Session {} removed", id);
                if self.config.removal_policy == RemovalPolicy::CloseTransport {
                    session.close_transport();
                }
                true
            }
            None => false,
        }
    }

    /// Removes a session and closes its transport regardless of policy.
    pub fn close_session(&self, id: SessionId) -> bool {
        let guard = self.sessions.lock();
        let removed = guard.borrow_mut().remove(&id);
        match removed {
            Some(session) => {
                tracing::debug!("Session {} closed", id);
                session.close_transport();
                true
            }
            None => false,
        }
    }

    /// Gets a session by id.
    #[must_use]
    pub fn get_session_by_id(&self, id: SessionId) -> Option<Arc<Session>> {
        self.sessions.lock().borrow().get(&id).cloned()
    }

    /// Finds the session of an authenticated player by name.
    ///
    /// Sessions still in `Init` are skipped.
    ///
    /// # Errors
    /// Returns `InvalidSessionState` if a session past `Init` has no
    /// player data.
    pub fn get_session_by_player_name(&self, name: &str) -> Result<Option<Arc<Session>>> {
        let guard = self.sessions.lock();
        let map = guard.borrow();

        for session in map.values() {
            if session.state() == SessionState::Init {
                continue;
            }
            let player = session
                .player_data()
                .ok_or_else(|| fault(session.id(), "authenticated session has no player data"))?;
            if player.name() == name {
                return Ok(Some(Arc::clone(session)));
            }
        }
        Ok(None)
    }

    /// Finds a session by unique player id.
    ///
    /// # Arguments
    /// * `unique_id` - Player id to look for
    /// * `include_init` - Also consider sessions still in `Init`
    #[must_use]
    pub fn get_session_by_unique_player_id(
        &self,
        unique_id: PlayerId,
        include_init: bool,
    ) -> Option<Arc<Session>> {
        let guard = self.sessions.lock();
        let map = guard.borrow();

        map.values()
            .filter(|session| include_init || session.state() != SessionState::Init)
            .find(|session| {
                session
                    .player_data()
                    .is_some_and(|player| player.unique_id() == unique_id)
            })
            .cloned()
    }

    /// Returns the player data of every session in `Game` state.
    ///
    /// # Errors
    /// Returns `InvalidSessionState` if such a session has no player data
    /// or an empty player name.
    pub fn get_player_data_list(&self) -> Result<Vec<Arc<PlayerData>>> {
        let guard = self.sessions.lock();
        let map = guard.borrow();
        let mut players = Vec::new();

        for session in map.values() {
            if session.state() != SessionState::Game {
                continue;
            }
            match session.player_data() {
                Some(player) if !player.name().is_empty() => players.push(player),
                Some(_) => return Err(fault(session.id(), "in-game player has an empty name")),
                None => return Err(fault(session.id(), "in-game session has no player data")),
            }
        }
        Ok(players)
    }

    /// Returns the player ids of every session in exactly `state`.
    ///
    /// # Errors
    /// Returns `InvalidSessionState` if a matching session has no player
    /// data.
    pub fn get_player_id_list(&self, state: SessionState) -> Result<Vec<PlayerId>> {
        let guard = self.sessions.lock();
        let map = guard.borrow();

        map.values()
            .filter(|session| session.state() == state)
            .map(|session| {
                session
                    .player_data()
                    .map(|player| player.unique_id())
                    .ok_or_else(|| fault(session.id(), "session has no player data"))
            })
            .collect()
    }

    /// Returns true if an authenticated player with this name is connected.
    ///
    /// # Errors
    /// Propagates the consistency fault of [`Self::get_session_by_player_name`].
    pub fn is_player_connected(&self, name: &str) -> Result<bool> {
        Ok(self
            .get_session_by_player_name(name)?
            .is_some_and(|session| session.player_data().is_some()))
    }

    /// Returns true if an authenticated player with this id is connected.
    #[must_use]
    pub fn is_player_id_connected(&self, unique_id: PlayerId) -> bool {
        self.get_session_by_unique_player_id(unique_id, false)
            .is_some_and(|session| session.player_data().is_some())
    }

    /// Returns true if any session was accepted from `addr`.
    #[must_use]
    pub fn is_client_address_connected(&self, addr: &str) -> bool {
        self.sessions
            .lock()
            .borrow()
            .values()
            .any(|session| session.client_addr() == addr)
    }

    /// Calls `visitor` for every session in ascending id order.
    ///
    /// The lock is held for the whole walk but the map is not borrowed while
    /// the visitor runs, so the visitor may remove the current session or
    /// any other one. Sessions removed before they are reached are skipped.
    /// Sessions added with a higher id than the current one are visited.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&Arc<Session>),
    {
        let guard = self.sessions.lock();
        let mut cursor: Option<SessionId> = None;

        loop {
            let next = {
                let map = guard.borrow();
                let lower = match cursor {
                    Some(id) => Bound::Excluded(id),
                    None => Bound::Unbounded,
                };
                map.range((lower, Bound::Unbounded))
                    .next()
                    .map(|(id, session)| (*id, Arc::clone(session)))
            };

            let Some((id, session)) = next else {
                break;
            };
            cursor = Some(id);
            visitor(&session);
        }
    }

    /// Returns the number of sessions with the ready flag set.
    #[must_use]
    pub fn count_ready_sessions(&self) -> usize {
        self.sessions
            .lock()
            .borrow()
            .values()
            .filter(|session| session.is_ready())
            .count()
    }

    /// Clears the ready flag of every session.
    pub fn reset_all_ready_flags(&self) {
        let guard = self.sessions.lock();
        for session in guard.borrow().values() {
            session.reset_ready();
        }
    }

    /// Closes every transport, then empties the registry.
    pub fn clear(&self) {
        let guard = self.sessions.lock();
        let sessions: Vec<Arc<Session>> = guard.borrow().values().cloned().collect();

        for session in &sessions {
            session.close_transport();
        }
        guard.borrow_mut().clear();

        if !sessions.is_empty() {
            tracing::info!("Cleared {} sessions", sessions.len());
        }
    }

    /// Returns the number of registered sessions.
    #[must_use]
    pub fn raw_session_count(&self) -> usize {
        self.sessions.lock().borrow().len()
    }

    /// Returns the number of sessions in `Established` or a later state.
    #[must_use]
    pub fn established_session_count(&self) -> usize {
        self.sessions
            .lock()
            .borrow()
            .values()
            .filter(|session| session.state().is_established())
            .count()
    }

    /// Returns all session ids in ascending order.
    #[must_use]
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.lock().borrow().keys().copied().collect()
    }

    /// Sends `payload` to every session in exactly `state`.
    ///
    /// Returns the number of sessions the sender accepted. A failed send is
    /// logged and the broadcast continues.
    ///
    /// # Errors
    /// Returns `InvalidSessionState` if a registry entry is corrupt. Nothing
    /// is sent in that case.
    pub fn send_to_all_sessions<P, S>(
        &self,
        sender: &S,
        payload: &P,
        state: SessionState,
    ) -> Result<usize>
    where
        P: ?Sized,
        S: SessionSender<P> + ?Sized,
    {
        self.broadcast(sender, payload, |session| session.state() == state)
    }

    /// Sends `payload` to every session in `state` that wants lobby messages.
    ///
    /// # Errors
    /// Returns `InvalidSessionState` if a registry entry is corrupt.
    pub fn send_lobby_msg_to_all_sessions<P, S>(
        &self,
        sender: &S,
        payload: &P,
        state: SessionState,
    ) -> Result<usize>
    where
        P: ?Sized,
        S: SessionSender<P> + ?Sized,
    {
        self.broadcast(sender, payload, |session| {
            session.state() == state && session.wants_lobby_msg()
        })
    }

    /// Sends `payload` to every session in `state` except `except`.
    ///
    /// # Errors
    /// Returns `InvalidSessionState` if a registry entry is corrupt.
    pub fn send_to_all_but_one_sessions<P, S>(
        &self,
        sender: &S,
        payload: &P,
        except: SessionId,
        state: SessionState,
    ) -> Result<usize>
    where
        P: ?Sized,
        S: SessionSender<P> + ?Sized,
    {
        self.broadcast(sender, payload, |session| {
            session.id() != except && session.state() == state
        })
    }

    /// Sends `payload` to a single session.
    ///
    /// # Errors
    /// Returns `SessionNotFound` for an unknown id and `Send` if the sender
    /// rejected the payload.
    pub fn send_to<P, S>(
        &self,
        sender: &S,
        payload: &P,
        id: SessionId,
    ) -> std::result::Result<(), ServerError>
    where
        P: ?Sized,
        S: SessionSender<P> + ?Sized,
    {
        let _guard = self.sessions.lock();
        let session = self
            .get_session_by_id(id)
            .ok_or(ServerError::SessionNotFound { id })?;
        sender.send(&session, payload)?;
        Ok(())
    }

    fn broadcast<P, S, F>(&self, sender: &S, payload: &P, select: F) -> Result<usize>
    where
        P: ?Sized,
        S: SessionSender<P> + ?Sized,
        F: Fn(&Session) -> bool,
    {
        let guard = self.sessions.lock();

        let targets = {
            let map = guard.borrow();
            let mut targets = Vec::with_capacity(map.len());
            for (id, session) in map.iter() {
                if *id != session.id() {
                    return Err(fault(*id, "registry entry holds a different session"));
                }
                if select(session.as_ref()) {
                    targets.push(Arc::clone(session));
                }
            }
            targets
        };

        let mut delivered = 0;
        for session in &targets {
            match sender.send(session, payload) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to send to session {}: {}", session.id(), e),
            }
        }
        Ok(delivered)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.clear();
    }
}

fn fault(id: SessionId, reason: &'static str) -> Error {
    tracing::error!("Session {} consistency fault: {}", id, reason);
    Error::invalid_session(id, reason)
}
