//! Shared command context.

use tracing::{instrument, warn};

use campus_wallet_client::{ApiClient, ApiError, ClientConfig, SessionStore, UserIdentity};
use campus_wallet_core::Role;

use crate::error::CliError;

/// Command context: an API client and the session it reads from.
#[derive(Debug, Clone)]
pub struct App {
    client: ApiClient,
}

impl App {
    /// Wrap an existing client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Build a client persisting its session to the configured file.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, CliError> {
        let session = SessionStore::file(&config.session_file);
        Ok(Self::new(ApiClient::new(config, session)?))
    }

    /// The API client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        self.client.session()
    }

    /// Gate a dashboard on a stored session for `role`.
    ///
    /// Missing token, missing identity and unreadable identity all count as
    /// "not logged in". The stored role is a hint; the API still authorizes
    /// each call.
    ///
    /// # Errors
    ///
    /// Returns `CliError::LoginRequired` or `CliError::WrongRole`.
    #[instrument(skip(self))]
    pub fn require_role(&self, role: Role) -> Result<UserIdentity, CliError> {
        if self.session().read_token().is_none() {
            return Err(CliError::LoginRequired(Some(role)));
        }

        let user = match self.session().read_user() {
            Ok(Some(user)) => user,
            Ok(None) => return Err(CliError::LoginRequired(Some(role))),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session");
                self.session().clear()?;
                return Err(CliError::LoginRequired(Some(role)));
            }
        };

        if user.role != role {
            return Err(CliError::WrongRole {
                expected: role,
                actual: user.role,
            });
        }

        Ok(user)
    }

    /// Map an API result for an authenticated screen.
    ///
    /// A 401 means the token is missing, expired or revoked: the session is
    /// cleared and the user is sent back to login.
    ///
    /// # Errors
    ///
    /// Returns `CliError::SessionExpired` for 401s, `CliError::Api` otherwise.
    pub fn authorized<T>(&self, result: Result<T, ApiError>) -> Result<T, CliError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_unauthorized() => {
                warn!("API rejected session token, clearing session");
                self.session().clear()?;
                Err(CliError::SessionExpired)
            }
            Err(e) => Err(e.into()),
        }
    }
}
