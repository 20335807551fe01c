//! Jina API client.
//!
//! Thin client over two Jina endpoints:
//!
//! - **Reader**: `GET https://r.jina.ai/{url}` returns the rendered content
//!   of a page as plain text.
//! - **Search**: `GET https://s.jina.ai/?q={query}` returns web search
//!   results as plain text.
//!
//! Both authenticate with a bearer token. Responses are passed through
//! unparsed; caching and memoization live in `jina-mcp-core`.

pub mod error;

pub use error::JinaError;

use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the Jina reader endpoint.
const DEFAULT_READER_BASE_URL: &str = "https://r.jina.ai";

/// Default base URL for the Jina search endpoint.
const DEFAULT_SEARCH_BASE_URL: &str = "https://s.jina.ai";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "mcp-jina/0.1";

/// Jina API client configuration.
///
/// Callers populate this from their own configuration layer; the client
/// itself reads nothing from the environment.
#[derive(Debug, Clone)]
pub struct JinaConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Reader base URL (default: https://r.jina.ai).
    pub reader_base_url: String,
    /// Search base URL (default: https://s.jina.ai).
    pub search_base_url: String,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
    /// User-agent string (default: mcp-jina/0.x).
    pub user_agent: String,
}

impl Default for JinaConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            reader_base_url: DEFAULT_READER_BASE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Jina reader/search API client.
#[derive(Debug, Clone)]
pub struct JinaClient {
    http: reqwest::Client,
    config: JinaConfig,
}

impl JinaClient {
    /// Create a new Jina client with the given configuration.
    pub fn new(config: JinaConfig) -> Result<Self, JinaError> {
        if config.api_key.is_empty() {
            return Err(JinaError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| JinaError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Fetch the rendered content of a web page via the reader endpoint.
    pub async fn fetch_content(&self, url: &str) -> Result<String, JinaError> {
        let endpoint = format!("{}/{}", self.config.reader_base_url.trim_end_matches('/'), url);
        tracing::debug!(url, "fetching content via Jina reader");

        let request = self.http.get(&endpoint);
        self.execute(request).await
    }

    /// Search the web via the search endpoint.
    pub async fn search(&self, query: &str) -> Result<String, JinaError> {
        let endpoint = format!("{}/", self.config.search_base_url.trim_end_matches('/'));
        tracing::debug!(query, "searching via Jina search");

        let request = self.http.get(&endpoint).query(&[("q", query)]);
        self.execute(request).await
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, JinaError> {
        let start = Instant::now();

        let response = request
            .header(header::AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(header::USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(JinaError::from)?;

        let status = response.status();
        tracing::debug!("Jina API response status: {}", status);

        if status == 401 || status == 403 {
            return Err(JinaError::AuthError);
        }

        if status == 429 {
            return Err(JinaError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(JinaError::HttpError { status: status.as_u16() });
        }

        let body = response.text().await.map_err(JinaError::from)?;

        tracing::debug!("request completed in {:?}, {} bytes", start.elapsed(), body.len());

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = JinaConfig::default();
        assert_eq!(config.reader_base_url, "https://r.jina.ai");
        assert_eq!(config.search_base_url, "https://s.jina.ai");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_client_new_empty_key() {
        let result = JinaClient::new(JinaConfig::default());
        assert!(matches!(result, Err(JinaError::MissingApiKey)));
    }

    #[test]
    fn test_client_new_with_key() {
        let config = JinaConfig { api_key: "test-key".into(), ..Default::default() };
        assert!(JinaClient::new(config).is_ok());
    }

    #[test]
    fn test_client_ignores_process_environment() {
        // The API key comes from the caller's configuration layer only.
        unsafe {
            std::env::set_var("JINA_API_KEY", "env-key");
        }

        let result = JinaClient::new(JinaConfig::default());
        assert!(matches!(result, Err(JinaError::MissingApiKey)));

        unsafe {
            std::env::remove_var("JINA_API_KEY");
        }
    }
}
