//! CampusChain wallet client library.
//!
//! Pairs a persistent [`SessionStore`] with an [`ApiClient`] that attaches
//! the stored bearer token to every call and normalizes failures into
//! [`ApiError`].
//!
//! ```no_run
//! use campus_wallet_client::{ApiClient, ClientConfig, LoginRequest, SessionStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let session = SessionStore::file(&config.session_file);
//! let client = ApiClient::new(&config, session)?;
//!
//! client
//!     .login(&LoginRequest {
//!         username: "alice".to_string(),
//!         password: "secret".to_string(),
//!     })
//!     .await?;
//! let summary = client.student_summary().await?;
//! # let _ = summary;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use api::{ApiClient, RequestOptions};
pub use config::{ClientConfig, ConfigError, ConfigOverrides};
pub use error::{ApiError, FALLBACK_ERROR_MESSAGE};
pub use session::{SessionError, SessionStore, UserIdentity};
pub use types::*;
