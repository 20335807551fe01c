//! Unified error types for mcp-jina.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the mcp-jina server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty URL or query).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// A call argument could not be encoded into a cache key.
    #[error("CACHE_KEY_ERROR: {0}")]
    KeyEncoding(String),

    /// A cached value could not be encoded or decoded.
    #[error("CACHE_VALUE_ERROR: {0}")]
    ValueEncoding(String),

    /// Jina API authentication error.
    #[error("JINA_AUTH_ERROR: {0}")]
    JinaAuthError(String),

    /// Jina API rate limited.
    #[error("JINA_RATE_LIMITED: {0}")]
    JinaRateLimited(String),

    /// Upstream request timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// HTTP error response from upstream.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::KeyEncoding(msg) => (-32001, msg.clone()),
            Error::ValueEncoding(msg) => (-32002, msg.clone()),
            Error::JinaAuthError(msg) => (-32009, msg.clone()),
            Error::JinaRateLimited(msg) => (-32010, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::HttpError(msg) => (-32008, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::KeyEncoding("NaN is not a JSON number".to_string());
        assert!(err.to_string().contains("CACHE_KEY_ERROR"));
        assert!(err.to_string().contains("NaN"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::InvalidInput("url cannot be empty".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
    }
}
