//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (WIKISEARCH_*)
//! 2. TOML config file (if WIKISEARCH_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (WIKISEARCH_*)
/// 2. TOML config file (if WIKISEARCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Wikipedia language edition, used to derive the API and article URLs.
    ///
    /// Set via WIKISEARCH_LANGUAGE environment variable.
    #[serde(default = "default_language")]
    pub language: String,

    /// Full API endpoint override (e.g. a mirror or a test server).
    ///
    /// Set via WIKISEARCH_API_URL environment variable.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Article link base override; the page id is appended as `?curid=`.
    ///
    /// Set via WIKISEARCH_ARTICLE_URL environment variable.
    #[serde(default)]
    pub article_url: Option<String>,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via WIKISEARCH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via WIKISEARCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Path to the SQLite database holding history and theme.
    ///
    /// Set via WIKISEARCH_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Quiescence interval for live search, in milliseconds.
    ///
    /// Set via WIKISEARCH_DEBOUNCE_MS environment variable.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_language() -> String {
    "en".into()
}

fn default_user_agent() -> String {
    "wikisearch/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./wikisearch.sqlite")
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            api_url: None,
            article_url: None,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            db_path: default_db_path(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Debounce interval as Duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// The MediaWiki API endpoint, honoring `api_url` when set.
    pub fn api_endpoint(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/w/api.php", self.language))
    }

    /// Base for external read links, honoring `article_url` when set.
    pub fn article_base(&self) -> String {
        self.article_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.wikipedia.org/", self.language))
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `WIKISEARCH_`
    /// 2. TOML file from `WIKISEARCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("WIKISEARCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("WIKISEARCH_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.language, "en");
        assert_eq!(config.user_agent, "wikisearch/0.1");
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.db_path, PathBuf::from("./wikisearch.sqlite"));
        assert_eq!(config.debounce_ms, 500);
        assert!(config.api_url.is_none());
        assert!(config.article_url.is_none());
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
        assert_eq!(config.debounce(), Duration::from_millis(500));
    }

    #[test]
    fn test_endpoints_follow_language() {
        let config = AppConfig { language: "id".into(), ..Default::default() };
        assert_eq!(config.api_endpoint(), "https://id.wikipedia.org/w/api.php");
        assert_eq!(config.article_base(), "https://id.wikipedia.org/");
    }

    #[test]
    fn test_endpoint_overrides() {
        let config = AppConfig {
            api_url: Some("http://127.0.0.1:8080/api.php".into()),
            article_url: Some("http://127.0.0.1:8080/".into()),
            ..Default::default()
        };
        assert_eq!(config.api_endpoint(), "http://127.0.0.1:8080/api.php");
        assert_eq!(config.article_base(), "http://127.0.0.1:8080/");
    }
}
