//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CAMPUS_WALLET_API_URL` - API root (default: `http://localhost:5000/api`)
//! - `CAMPUS_WALLET_SESSION_FILE` - Session file path (default:
//!   `$XDG_CONFIG_HOME/campus-wallet/session.json`, falling back to
//!   `$HOME/.config/campus-wallet/session.json`)
//! - `CAMPUS_WALLET_TIMEOUT_SECS` - Request timeout in seconds (default: none,
//!   requests wait for the server indefinitely)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default API root. The backend mounts every route under `/api`.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

const SESSION_DIR: &str = "campus-wallet";
const SESSION_FILE_NAME: &str = "session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Values supplied on the command line. Each one replaces its environment
/// variable, which is then never read or validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub session_file: Option<PathBuf>,
}

/// Wallet client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every request path is appended to.
    pub api_url: String,
    /// File holding the persisted session.
    pub session_file: PathBuf,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Build a configuration for an explicit API root and session file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_url` is not an absolute URL.
    pub fn new(api_url: &str, session_file: PathBuf) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: validate_api_url("CAMPUS_WALLET_API_URL", api_url)?,
            session_file,
            timeout: None,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or no session file
    /// location can be derived.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(ConfigOverrides::default())
    }

    /// Load configuration from environment variables, letting `overrides`
    /// take precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a used value is malformed or no session file
    /// location can be derived.
    pub fn from_env_with(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(
            |key| std::env::var(key).ok().filter(|v| !v.is_empty()),
            overrides,
        )
    }

    /// Load configuration from an arbitrary variable source.
    fn from_source(
        get: impl Fn(&str) -> Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let api_url = match overrides.api_url {
            Some(api_url) => validate_api_url("--api-url", &api_url)?,
            None => {
                let api_url =
                    get("CAMPUS_WALLET_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());
                validate_api_url("CAMPUS_WALLET_API_URL", &api_url)?
            }
        };

        let session_file = match overrides.session_file {
            Some(path) => path,
            None => match get("CAMPUS_WALLET_SESSION_FILE") {
                Some(path) => PathBuf::from(path),
                None => default_session_file(&get)?,
            },
        };

        let timeout = get("CAMPUS_WALLET_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| {
                        ConfigError::InvalidEnvVar(
                            "CAMPUS_WALLET_TIMEOUT_SECS".to_string(),
                            e.to_string(),
                        )
                    })
            })
            .transpose()?;

        Ok(Self {
            api_url,
            session_file,
            timeout,
        })
    }
}

fn default_session_file(get: &impl Fn(&str) -> Option<String>) -> Result<PathBuf, ConfigError> {
    let config_dir = get("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| get("HOME").map(|home| PathBuf::from(home).join(".config")))
        .ok_or_else(|| ConfigError::MissingEnvVar("CAMPUS_WALLET_SESSION_FILE".to_string()))?;

    Ok(config_dir.join(SESSION_DIR).join(SESSION_FILE_NAME))
}

/// Check that the API root is an absolute http(s) URL and strip one trailing
/// slash so paths can be appended verbatim.
fn validate_api_url(key: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme: {}", parsed.scheme()),
        ));
    }

    Ok(trimmed.strip_suffix('/').unwrap_or(trimmed).to_owned())
}
