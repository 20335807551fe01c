//! Jina API client error types.

use std::sync::Arc;

/// Errors from the Jina reader/search client.
#[derive(Debug, thiserror::Error)]
pub enum JinaError {
    /// No API key was configured.
    #[error("missing API key: no Jina API key configured")]
    MissingApiKey,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the Jina API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),
}

impl From<reqwest::Error> for JinaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { JinaError::Timeout } else { JinaError::Network(Arc::new(err)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = JinaError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = JinaError::HttpError { status: 502 };
        assert!(err.to_string().contains("502"));
    }
}
