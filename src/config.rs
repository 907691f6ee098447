//! Configuration management for the city search service.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, net::SocketAddr, path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://test.api.amadeus.com";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Exclusive upper bound for `AMADEUS_TOKEN_EXPIRY_MARGIN_SECS` (one day).
pub const MAX_TOKEN_EXPIRY_MARGIN_SECS: u64 = 86_400;

const BASE_URL: &str = "AMADEUS_BASE_URL";
const API_KEY: &str = "AMADEUS_API_KEY";
const API_SECRET: &str = "AMADEUS_API_SECRET";
const TIMEOUT_SECS: &str = "AMADEUS_TIMEOUT_SECS";
const TOKEN_EXPIRY_MARGIN_SECS: &str = "AMADEUS_TOKEN_EXPIRY_MARGIN_SECS";
const SERVER_ADDRESS: &str = "SERVER_ADDRESS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Loads environment variables from `.env` files.
///
/// Looks for `citysearch/.env` in the platform-specific local data directory
/// first, creating the directory when it does not exist, then for a `.env`
/// in the working directory. Neither file is required and variables already
/// present in the process environment are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/citysearch/.env`
/// - macOS: `~/Library/Application Support/citysearch/.env`
/// - Windows: `%LOCALAPPDATA%/citysearch/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }
    dotenv::dotenv().ok();
    Ok(())
}

fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("citysearch/.env");
    path
}

/// Everything the Amadeus client needs to talk to the upstream API.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout: Duration,
    pub token_expiry_margin: Duration,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_expiry_margin: Duration::ZERO,
        }
    }

    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Missing`] when `AMADEUS_API_KEY` or
    ///   `AMADEUS_API_SECRET` is absent
    /// - [`ConfigError::Invalid`] when a numeric setting does not parse or the
    ///   base URL is not http(s), or when the token expiry margin is one day
    ///   or longer
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base_url = get(BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: BASE_URL,
                reason: format!("'{base_url}' is not an http(s) URL"),
            });
        }

        let api_key = get(API_KEY).ok_or(ConfigError::Missing(API_KEY))?;
        let api_secret = get(API_SECRET).ok_or(ConfigError::Missing(API_SECRET))?;

        let mut config = Self::new(base_url, api_key, api_secret);
        if let Some(raw) = get(TIMEOUT_SECS) {
            config.timeout = Duration::from_secs(parse_secs(TIMEOUT_SECS, &raw)?);
        }
        if let Some(raw) = get(TOKEN_EXPIRY_MARGIN_SECS) {
            let margin = parse_secs(TOKEN_EXPIRY_MARGIN_SECS, &raw)?;
            if margin >= MAX_TOKEN_EXPIRY_MARGIN_SECS {
                return Err(ConfigError::Invalid {
                    key: TOKEN_EXPIRY_MARGIN_SECS,
                    reason: format!("{margin}s must be below {MAX_TOKEN_EXPIRY_MARGIN_SECS}s"),
                });
            }
            config.token_expiry_margin = Duration::from_secs(margin);
        }
        Ok(config)
    }

    /// Absolute URL for an upstream path such as `/v1/security/oauth2/token`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("token_expiry_margin", &self.token_expiry_margin)
            .finish()
    }
}

fn parse_secs(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
        key,
        reason: format!("'{raw}': {e}"),
    })
}

/// Returns the address the HTTP service binds to.
///
/// Reads `SERVER_ADDRESS`, falling back to `127.0.0.1:8080`.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if the value is not a socket address.
pub fn server_addr() -> Result<SocketAddr, ConfigError> {
    parse_server_addr(env::var(SERVER_ADDRESS).ok().as_deref())
}

pub fn parse_server_addr(raw: Option<&str>) -> Result<SocketAddr, ConfigError> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_SERVER_ADDRESS);
    raw.parse().map_err(|e| ConfigError::Invalid {
        key: SERVER_ADDRESS,
        reason: format!("'{raw}': {e}"),
    })
}
