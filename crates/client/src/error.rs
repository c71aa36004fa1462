//! Unified error handling for API calls.

use thiserror::Error;

use crate::session::SessionError;

/// Message used when a failed response carries no usable `error` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// Error returned by every API call.
///
/// The dashboards only ever show [`ApiError::message`]; the variants exist so
/// callers can tell transport failures from application errors without
/// parsing text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection,
    /// timeout, broken body stream).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The body's `error` field, or [`FALLBACK_ERROR_MESSAGE`].
        message: String,
    },

    /// A 2xx body was not JSON or did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A request body could not be serialized.
    #[error("Invalid request body: {0}")]
    Encode(String),

    /// A header (caller-supplied or the stored token) is not a valid header value.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Session storage failed while recording a login.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// User-facing message. For API errors this is the server's message,
    /// unmodified.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status, for errors that came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API rejected the bearer token (missing, expired or
    /// invalid). Views react by sending the user back to login.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }

    /// Whether the failure happened below the HTTP layer.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
