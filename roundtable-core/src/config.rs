//! Client configuration.

use crate::error::ConfigError;
use std::time::Duration;

/// Default mock data server.
pub const DEFAULT_DATA_URL: &str = "http://localhost:3000";

/// Default encyclopedia endpoint.
pub const DEFAULT_WIKI_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Where to reach the data server and the encyclopedia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the json-server style data resource (no trailing slash needed).
    pub data_url: String,

    /// MediaWiki `api.php` endpoint.
    pub wiki_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            wiki_url: DEFAULT_WIKI_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from `ROUNDTABLE_DATA_URL`, `ROUNDTABLE_WIKI_URL` and
    /// `ROUNDTABLE_TIMEOUT_SECS`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("ROUNDTABLE_DATA_URL") {
            config = config.with_data_url(url);
        }
        if let Some(url) = lookup("ROUNDTABLE_WIKI_URL") {
            config = config.with_wiki_url(url);
        }
        if let Some(secs) = lookup("ROUNDTABLE_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(secs.clone()))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_data_url(mut self, url: impl Into<String>) -> Self {
        self.data_url = url.into();
        self
    }

    pub fn with_wiki_url(mut self, url: impl Into<String>) -> Self {
        self.wiki_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that both URLs are http(s) and the timeout is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("data_url", &self.data_url)?;
        check_url("wiki_url", &self.wiki_url)?;
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout("0".to_string()));
        }
        Ok(())
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    match reqwest::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        }),
    }
}
