//! Memoization of async, fallible operations.
//!
//! [`Memoizer::call`] wraps one invocation of an operation: it derives a key
//! from the operation name and arguments, consults the [`Store`], and only
//! invokes the operation on a miss. Failures are propagated verbatim and
//! never cached, so the next call retries. Concurrent identical misses are
//! not deduplicated; both invoke the operation and the last write wins.

use super::key::{CallArgs, encode_key};
use super::store::Store;
use crate::Error;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;

/// Cacheability hook for memoized result types.
///
/// The upstream APIs occasionally return empty placeholder bodies that are
/// not worth pinning in the cache for a full TTL window. Types opt into
/// that by reporting themselves empty; whether empty values are cached at
/// all is decided by [`Memoizer`] configuration.
pub trait CacheValue {
    /// Whether this value is an empty placeholder.
    fn is_empty_value(&self) -> bool {
        false
    }
}

impl CacheValue for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> CacheValue for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: CacheValue> CacheValue for Option<T> {
    fn is_empty_value(&self) -> bool {
        match self {
            Some(value) => value.is_empty_value(),
            None => true,
        }
    }
}

impl CacheValue for serde_json::Value {
    fn is_empty_value(&self) -> bool {
        self.is_null()
    }
}

/// Memoizes async operations through a shared [`Store`].
#[derive(Debug, Clone)]
pub struct Memoizer {
    store: Arc<Store>,
    default_ttl: u64,
    cache_empty: bool,
}

impl Memoizer {
    pub fn new(store: Arc<Store>, default_ttl: u64, cache_empty: bool) -> Self {
        Self { store, default_ttl, cache_empty }
    }

    /// Invoke `op` through the cache.
    ///
    /// On a hit the cached value is decoded and returned without invoking
    /// `op`. On a miss `op` runs; a successful result is stored under the
    /// per-call TTL (or the process default when `ttl` is `None`) unless it
    /// is an empty value and empty caching is disabled. An `op` failure is
    /// returned as-is and nothing is written.
    ///
    /// Encode/decode failures of the cached value are loud: they surface to
    /// the caller instead of being papered over as misses, since a silently
    /// mis-decoded entry means cache poisoning.
    pub async fn call<F, Fut, T, E>(
        &self, operation: &str, args: &CallArgs, ttl: Option<u64>, op: F,
    ) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: Serialize + DeserializeOwned + CacheValue,
        E: From<Error>,
    {
        let key = encode_key(operation, args);

        if let Some(raw) = self.store.get(&key).await {
            tracing::debug!(operation, key = %key, "cache hit");
            let value =
                serde_json::from_str(&raw).map_err(|e| Error::ValueEncoding(e.to_string()))?;
            return Ok(value);
        }

        tracing::debug!(operation, key = %key, "cache miss");
        let result = op().await?;

        if self.cache_empty || !result.is_empty_value() {
            let raw = serde_json::to_string(&result)
                .map_err(|e| Error::ValueEncoding(e.to_string()))?;
            self.store
                .set(&key, raw, ttl.unwrap_or(self.default_ttl))
                .await;
        }

        Ok(result)
    }
}
