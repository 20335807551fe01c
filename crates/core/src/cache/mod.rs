//! Memoizing response cache with lazy Redis resolution.
//!
//! The cache sits in front of the upstream Jina calls so that repeated
//! requests with equal arguments within the TTL window skip the network.
//! It supports:
//!
//! - A Redis backend, resolved lazily on first use with a bounded probe
//! - An in-process TTL map used whenever Redis is absent or unreachable
//! - Deterministic cache keys derived from operation name and arguments
//! - A higher-order memoizer for async, fallible operations

pub mod backend;
pub mod key;
pub mod memo;
pub mod store;

pub use crate::Error;

pub use key::{CallArgs, encode_key};
pub use memo::{CacheValue, Memoizer};
pub use store::Store;
