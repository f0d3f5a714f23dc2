//! Application configuration loaded from environment variables.
//!
//! The intranet API credentials are read once at startup and stay fixed for
//! the lifetime of the process.

use crate::models::Credentials;
use std::env;
use std::fmt;
use std::time::Duration;

/// Default intranet API base URL.
pub const DEFAULT_API_URL: &str = "https://api.intra.42.fr";

/// Default per-request timeout for intranet API calls.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    /// OAuth application UID from the intranet
    pub client_id: String,
    /// OAuth application secret from the intranet
    pub client_secret: String,
    /// Intranet API base URL (token and users endpoints hang off it)
    pub api_url: String,
    /// Server port
    pub port: u16,
    /// Timeout applied to each intranet API request
    pub http_timeout: Duration,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            client_id: "test_client_id".to_string(),
            client_secret: "test_secret".to_string(),
            api_url: "http://127.0.0.1:9".to_string(),
            port: 8080,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            client_id: required("INTRA_CLIENT_ID")?,
            client_secret: required("INTRA_CLIENT_SECRET")?,
            api_url: env::var("INTRA_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            http_timeout: Duration::from_secs(
                env::var("HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
        })
    }

    /// OAuth client credentials for the token exchange.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.client_id.clone(), self.client_secret.clone())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("port", &self.port)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

/// Read a variable that must be present and non-blank.
fn required(name: &'static str) -> Result<String, ConfigError> {
    let value = env::var(name).map_err(|_| ConfigError::Missing(name))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(value.to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
