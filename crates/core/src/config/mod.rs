//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MCP_JINA_*)
//! 2. TOML config file (if MCP_JINA_CONFIG_FILE set)
//! 3. Built-in defaults

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
/// 1. Environment variables (MCP_JINA_*)
/// 2. TOML config file (if MCP_JINA_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Jina API token used for both the reader and search endpoints.
    ///
    /// Set via MCP_JINA_API_KEY environment variable.
    /// Required only when a tool is actually called.
    #[serde(default)]
    pub jina_api_key: Option<String>,

    /// Redis URL for the shared response cache.
    ///
    /// Set via MCP_JINA_REDIS_URL environment variable. When absent the
    /// server caches in process memory.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Default cache TTL in seconds for memoized operations.
    ///
    /// Set via MCP_JINA_CACHE_TTL environment variable.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,

    /// Whether empty successful results are cached.
    ///
    /// Set via MCP_JINA_CACHE_EMPTY_RESULTS environment variable. Off by
    /// default: an empty upstream body is usually a placeholder, not a
    /// result worth pinning for a full TTL window.
    #[serde(default)]
    pub cache_empty_results: bool,

    /// Upstream HTTP request timeout in milliseconds.
    ///
    /// Set via MCP_JINA_REQUEST_TIMEOUT_MS environment variable.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// User-Agent string for upstream requests.
    ///
    /// Set via MCP_JINA_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    "mcp-jina/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jina_api_key: None,
            redis_url: None,
            cache_ttl: default_cache_ttl(),
            cache_empty_results: false,
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MCP_JINA_`
    /// 2. TOML file from `MCP_JINA_CONFIG_FILE` (if set)
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

        if let Ok(config_path) = std::env::var("MCP_JINA_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MCP_JINA_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the Jina API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the Jina API key is not set.
    pub fn require_jina_api_key(&self) -> Result<&str, ConfigError> {
        self.jina_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "jina_api_key".into(),
            hint: "Set MCP_JINA_API_KEY environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.request_timeout_ms, 30_000);
        assert_eq!(config.user_agent, "mcp-jina/0.1");
        assert!(!config.cache_empty_results);
        assert!(config.jina_api_key.is_none());
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(30_000));
    }

    #[test]
    fn test_require_jina_api_key_missing() {
        let config = AppConfig::default();
        let result = config.require_jina_api_key();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_jina_api_key_present() {
        let config = AppConfig { jina_api_key: Some("test-key".into()), ..Default::default() };
        let result = config.require_jina_api_key();
        assert_eq!(result.unwrap(), "test-key");
    }
}
