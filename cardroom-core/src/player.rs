//! Player identity attached to authenticated sessions.

use crate::types::PlayerId;

/// Permission level of an authenticated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerRights {
    /// Unregistered guest login.
    Guest,
    /// Registered player.
    #[default]
    Normal,
    /// Server administrator.
    Admin,
}

/// Identity and profile of an authenticated player.
///
/// Shared as `Arc<PlayerData>` between the owning session and any roster
/// snapshot handed out by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerData {
    unique_id: PlayerId,
    name: String,
    rights: PlayerRights,
    country: Option<String>,
}

impl PlayerData {
    /// Creates player data with normal rights and no country.
    #[must_use]
    pub fn new(unique_id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            name: name.into(),
            rights: PlayerRights::default(),
            country: None,
        }
    }

    /// Sets the permission level.
    #[must_use]
    pub fn with_rights(mut self, rights: PlayerRights) -> Self {
        self.rights = rights;
        self
    }

    /// Sets the country code.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Returns the unique numeric player id.
    #[must_use]
    pub fn unique_id(&self) -> PlayerId {
        self.unique_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the permission level.
    #[must_use]
    pub fn rights(&self) -> PlayerRights {
        self.rights
    }

    /// Returns the country code, if known.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Returns true if the player is a guest.
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.rights == PlayerRights::Guest
    }
}
