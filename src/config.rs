//! Session configuration.
//!
//! Defaults can be overridden by environment variables or the builder
//! methods.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `FREST_API_URL` | `api_base_url` | `http://localhost:5000` |
//! | `FREST_STORAGE_PATH` | `storage_path` | `~/.frest/storage.json` |
//! | `FREST_DEBOUNCE_MS` | `debounce` | 750 ms |
//! | `FREST_REQUEST_TIMEOUT_SECS` | `request_timeout` | none (0 also means none) |

use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::adapters::default_storage_path;

/// Default base URL of the authentication API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default quiet period for form field debouncing.
pub const DEFAULT_DEBOUNCE_MS: u64 = 750;

/// Configuration for the session manager and login form.
///
/// # Example
///
/// ```ignore
/// use frest::config::SessionConfig;
///
/// let config = SessionConfig::from_env()
///     .with_api_base_url("https://api.example.com")
///     .with_request_timeout(Some(Duration::from_secs(10)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Base URL the auth endpoint paths are appended to
    pub api_base_url: String,
    /// File backing client storage
    pub storage_path: PathBuf,
    /// Quiet period for form field debouncing
    pub debounce: Duration,
    /// Optional caller-imposed timeout for HTTP requests
    pub request_timeout: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            storage_path: default_storage_path()
                .unwrap_or_else(|| PathBuf::from(".frest").join("storage.json")),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: None,
        }
    }
}

impl SessionConfig {
    /// Create a SessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `FREST_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("FREST_API_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_api_base_url(url.trim());
        }
        if let Some(path) = lookup("FREST_STORAGE_PATH").filter(|v| !v.trim().is_empty()) {
            config.storage_path = PathBuf::from(path);
        }
        if let Some(ms) = parse_u64(&lookup, "FREST_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_u64(&lookup, "FREST_REQUEST_TIMEOUT_SECS") {
            config = config.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        config
    }

    /// Set the API base URL. Trailing slashes are dropped.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the storage file path.
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Set the debounce quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set or remove the request timeout. A zero timeout means none.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout.filter(|t| !t.is_zero());
        self
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(variable = key, value = %raw, error = %e, "Ignoring invalid setting");
            None
        }
    }
}
