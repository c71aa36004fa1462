//! Client-held session: bearer token plus minimal user identity.
//!
//! The session is written once per login and read on every API call. It is
//! an injected object rather than ambient global state, so tests can hand the
//! API client a [`MemoryStorage`] and never touch disk.
//!
//! The stored role only decides which dashboard to show. Token expiry and
//! authorization are enforced by the API and surface as request failures.

mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, UnavailableStorage};

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use campus_wallet_core::{Role, UserId};

use crate::types::LoginResponse;

/// Storage keys for session data.
pub mod keys {
    /// Key for the opaque bearer token.
    pub const TOKEN: &str = "token";

    /// Key for the JSON-encoded [`super::UserIdentity`].
    pub const USER: &str = "user";
}

/// Errors from session storage.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The execution context has no usable storage.
    #[error("session storage is unavailable")]
    Unavailable,

    /// Reading or writing the session file failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be decoded.
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),
}

/// Session-stored user identity.
///
/// Minimal data kept on the client to pick a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// User's account ID.
    #[serde(alias = "user_id")]
    pub id: UserId,
    /// User's role.
    pub role: Role,
}

impl UserIdentity {
    /// Create an identity.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

/// Session store over an injectable [`SessionStorage`] backend.
///
/// Cloning is cheap; clones share the same backend.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Create a store over a shared backend.
    #[must_use]
    pub fn from_shared(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Create a store persisted to a JSON file.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileStorage::new(path))
    }

    /// Create a store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Store the bearer token, replacing any previous one. The token is not
    /// inspected.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn save_token(&self, token: &str) -> Result<(), SessionError> {
        self.storage.set(keys::TOKEN, token)
    }

    /// Current bearer token, or `None` if none is stored or storage is
    /// unavailable.
    #[must_use]
    pub fn read_token(&self) -> Option<SecretString> {
        match self.storage.get(keys::TOKEN) {
            Ok(token) => token.map(SecretString::from),
            Err(e) => {
                debug!(error = %e, "No session token available");
                None
            }
        }
    }

    /// Store the user identity, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    pub fn save_user(&self, user: &UserIdentity) -> Result<(), SessionError> {
        let encoded =
            serde_json::to_string(user).map_err(|e| SessionError::Corrupt(e.to_string()))?;
        self.storage.set(keys::USER, &encoded)
    }

    /// Stored user identity. `Ok(None)` if none is stored or storage is
    /// unavailable, which includes an unparsable session file.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Corrupt` if a readable store holds a `user`
    /// value that cannot be decoded.
    pub fn read_user(&self) -> Result<Option<UserIdentity>, SessionError> {
        let raw = match self.storage.get(keys::USER) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "No session user available");
                return Ok(None);
            }
        };

        raw.map(|raw| {
            serde_json::from_str(&raw).map_err(|e| SessionError::Corrupt(format!("user: {e}")))
        })
        .transpose()
    }

    /// Remove both token and user. Both deletes are attempted even if the
    /// first fails; clearing an empty session succeeds.
    ///
    /// # Errors
    ///
    /// Returns the first backend error encountered.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), SessionError> {
        let token = self.storage.remove(keys::TOKEN);
        let user = self.storage.remove(keys::USER);
        token.and(user)
    }

    /// Persist a successful login: token first, then identity.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails.
    #[instrument(skip(self, login), fields(user_id = %login.user_id, role = %login.role))]
    pub fn save_login(&self, login: &LoginResponse) -> Result<UserIdentity, SessionError> {
        let identity = UserIdentity::new(login.user_id, login.role);
        self.save_token(login.token_str())?;
        self.save_user(&identity)?;
        debug!("Session saved");
        Ok(identity)
    }
}
