//! The session accessor shared by the HTTP client, guards and views.

use crate::error::SessionResult;
use crate::storage::LocalStorage;
use rentbook_core::{AuthResponse, Role, User};
use std::fmt;
use std::sync::Arc;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the JSON-encoded signed-in user.
pub const SESSION_USER_KEY: &str = "sessionUser";

/// Who is signed in, as seen by role checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated { user: User, role: Role },
}

impl SessionState {
    pub fn from_user(user: Option<User>) -> Self {
        match user {
            Some(user) => {
                let role = user.role();
                SessionState::Authenticated { user, role }
            }
            None => SessionState::Anonymous,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated { user, .. } => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            SessionState::Authenticated {
                role: Role::Admin,
                ..
            }
        )
    }
}

/// Handle to the persisted session. Cheap to clone.
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn LocalStorage>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

impl SessionContext {
    pub fn new(storage: impl LocalStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn from_arc(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Session backed by [`MemoryStorage`](crate::MemoryStorage).
    pub fn in_memory() -> Self {
        Self::new(crate::MemoryStorage::new())
    }

    /// The signed-in user. Missing, unreadable or malformed data is `None`.
    pub fn read_session(&self) -> Option<User> {
        let raw = self.raw_session_user()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                rentbook_log::debug!("Discarding malformed session user: {}", e);
                None
            }
        }
    }

    /// The stored user record exactly as persisted.
    pub fn raw_session_user(&self) -> Option<String> {
        self.get(SESSION_USER_KEY)
    }

    pub fn write_session(&self, user: &User) -> SessionResult<()> {
        let json = serde_json::to_string(user)?;
        self.storage.set_item(SESSION_USER_KEY, &json)
    }

    pub fn clear_session(&self) -> SessionResult<()> {
        self.storage.remove_item(SESSION_USER_KEY)
    }

    pub fn read_token(&self) -> Option<String> {
        self.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn write_token(&self, token: &str) -> SessionResult<()> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    pub fn clear_token(&self) -> SessionResult<()> {
        self.storage.remove_item(TOKEN_KEY)
    }

    /// Persist whatever a login or register call returned.
    ///
    /// If the user cannot be written, the previous token is put back so a new
    /// token is never left beside the old user.
    pub fn store_auth(&self, response: &AuthResponse) -> SessionResult<()> {
        let previous_token = self.get(TOKEN_KEY);
        if let Some(token) = response.token.as_deref() {
            self.write_token(token)?;
        }
        if let Some(user) = &response.user
            && let Err(e) = self.write_session(user)
        {
            if response.token.is_some() {
                self.restore_token(previous_token);
            }
            return Err(e);
        }
        Ok(())
    }

    fn restore_token(&self, previous: Option<String>) {
        let restored = match previous {
            Some(token) => self.storage.set_item(TOKEN_KEY, &token),
            None => self.storage.remove_item(TOKEN_KEY),
        };
        if let Err(e) = restored {
            rentbook_log::warn!("Could not restore the previous token: {}", e);
        }
    }

    /// Forget both the user and the token.
    pub fn logout(&self) -> SessionResult<()> {
        self.clear_session()?;
        self.clear_token()
    }

    /// Evaluated fresh on every call.
    pub fn state(&self) -> SessionState {
        SessionState::from_user(self.read_session())
    }

    fn get(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                rentbook_log::warn!("Session storage read failed for '{}': {}", key, e);
                None
            }
        }
    }
}
