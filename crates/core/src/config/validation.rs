//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `cache_ttl` is 0 or exceeds 30 days
    /// - `request_timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `redis_url` has a non-redis scheme
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_ttl == 0 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl".into(),
                reason: "must be greater than 0 (a zero per-call TTL disables caching for that call)".into(),
            });
        }
        if self.cache_ttl > 30 * 24 * 3600 {
            return Err(ConfigError::Invalid {
                field: "cache_ttl".into(),
                reason: "must not exceed 30 days".into(),
            });
        }

        if self.request_timeout_ms < 100 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_ms".into(),
                reason: "must be at least 100ms".into(),
            });
        }
        if self.request_timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if let Some(url) = &self.redis_url
            && !url.starts_with("redis://")
            && !url.starts_with("rediss://")
        {
            return Err(ConfigError::Invalid {
                field: "redis_url".into(),
                reason: "must start with redis:// or rediss://".into(),
            });
        }

        Ok(())
    }
}
