//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `DABEEHA_HOST` - Bind address (default: 127.0.0.1)
//! - `DABEEHA_PORT` - Listen port (default: 8080)
//! - `DABEEHA_DATA_DIR` - Directory for the JSON store (default: ./data)
//! - `ADVISOR_API_KEY` - API key for the livestock advisor upstream;
//!   the advisor degrades to a canned reply when unset
//! - `ADVISOR_MODEL` - Text-generation model name (default: gemini-2.0-flash)
//! - `ADVISOR_BASE_URL` - Advisor API base URL
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default advisor upstream (Google Generative Language API).
const DEFAULT_ADVISOR_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Configuration errors that can occur during loading.
///
/// Every variable has a default or is optional, so the only failure mode
/// is a variable that is present but does not parse.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the JSON key-value store
    pub data_dir: PathBuf,
    /// Advisory-chat upstream configuration, if an API key is set
    pub advisor: Option<AdvisorConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Advisory-chat upstream configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AdvisorConfig {
    /// API key for the text-generation endpoint
    pub api_key: SecretString,
    /// Model name
    pub model: String,
    /// API base URL
    pub base_url: String,
}

impl std::fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("DABEEHA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("DABEEHA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("DABEEHA_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("DABEEHA_PORT".to_string(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("DABEEHA_DATA_DIR", "data"));

        let advisor = get_optional_env("ADVISOR_API_KEY").map(|key| AdvisorConfig {
            api_key: SecretString::from(key),
            model: get_env_or_default("ADVISOR_MODEL", "gemini-2.0-flash"),
            base_url: get_env_or_default("ADVISOR_BASE_URL", DEFAULT_ADVISOR_BASE_URL),
        });

        Ok(Self {
            host,
            port,
            data_dir,
            advisor,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
