//! Core types and shared functionality for mcp-jina.
//!
//! This crate provides:
//! - Memoizing response cache with a Redis backend and in-process fallback
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CallArgs, Memoizer, Store};
pub use config::AppConfig;
pub use error::Error;
