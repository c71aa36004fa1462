//! CLI error type.

use thiserror::Error;

use campus_wallet_client::{ApiError, ConfigError, SessionError};
use campus_wallet_core::Role;

/// Errors surfaced to the terminal user.
///
/// `Display` is what gets printed; API errors show the server's message
/// unmodified.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{}", .0.message())]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// No usable session for the requested dashboard.
    #[error("{}", login_hint(*.0))]
    LoginRequired(Option<Role>),

    /// Logged in, but as another role.
    #[error("This dashboard is for {expected} accounts; you are logged in as {actual}. Run `campus-wallet login` as a {expected}.")]
    WrongRole { expected: Role, actual: Role },

    /// The API rejected the stored token; the session has been cleared.
    #[error("Session expired. Run `campus-wallet login` to sign in again.")]
    SessionExpired,

    /// Input the API would reject anyway, caught before sending.
    #[error("{0}")]
    InvalidInput(String),

    #[error("Template render error: {0}")]
    Render(#[from] askama::Error),
}

fn login_hint(role: Option<Role>) -> String {
    match role {
        Some(role) => format!("Not logged in. Run `campus-wallet login` as a {role}."),
        None => "Not logged in. Run `campus-wallet login`.".to_string(),
    }
}

impl CliError {
    /// Whether the user must log in (again) before retrying.
    #[must_use]
    pub const fn needs_login(&self) -> bool {
        matches!(
            self,
            Self::LoginRequired(_) | Self::WrongRole { .. } | Self::SessionExpired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_prints_server_message() {
        let err = CliError::from(ApiError::Api {
            status: 409,
            message: "insufficient link".to_string(),
        });
        assert_eq!(err.to_string(), "insufficient link");
        assert!(!err.needs_login());
    }

    #[test]
    fn test_login_messages() {
        assert_eq!(
            CliError::LoginRequired(Some(Role::Parent)).to_string(),
            "Not logged in. Run `campus-wallet login` as a parent."
        );
        let wrong = CliError::WrongRole {
            expected: Role::Vendor,
            actual: Role::Student,
        };
        assert!(wrong.to_string().contains("you are logged in as student"));
        assert!(wrong.needs_login());
        assert!(CliError::SessionExpired.needs_login());
    }
}
