//! Client code for mcp-jina.
//!
//! This crate provides the Jina reader/search HTTP client and URL
//! canonicalization shared by the server.

pub mod jina;
pub mod url;

pub use jina::{JinaClient, JinaConfig, JinaError};
pub use url::{UrlError, canonicalize};
