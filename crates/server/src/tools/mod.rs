//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-jina server.

pub mod fetch;
pub mod search;

pub use fetch::FetchParams;
pub use search::SearchParams;

use jina_mcp_client::JinaError;
use jina_mcp_core::Error;

/// Translate client errors into the unified error type.
pub(crate) fn map_client_err(err: JinaError) -> Error {
    match err {
        JinaError::MissingApiKey | JinaError::AuthError => Error::JinaAuthError(err.to_string()),
        JinaError::RateLimited => Error::JinaRateLimited(err.to_string()),
        JinaError::Timeout => Error::FetchTimeout(err.to_string()),
        JinaError::HttpError { status } => Error::HttpError(format!("HTTP {status}")),
        JinaError::Network(_) => Error::HttpError(err.to_string()),
    }
}
