//! Deterministic cache key derivation.
//!
//! A key is derived from the operation name plus its positional and keyword
//! arguments. Keyword arguments live in a `BTreeMap`, so the encoding is
//! canonical regardless of the order the call site supplies them in. The
//! canonical JSON is hashed with SHA-256, which keeps keys stable across
//! process restarts and collision-resistant for realistic argument shapes.

use crate::Error;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Arguments of a memoized call, normalized for key derivation.
///
/// Values are converted to JSON at the call site; a value that cannot be
/// represented as JSON is a programming error and fails loudly here rather
/// than producing a key that could collide with unrelated calls.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    args: Vec<Value>,
    kwargs: BTreeMap<String, Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, Error> {
        self.args
            .push(serde_json::to_value(value).map_err(|e| Error::KeyEncoding(e.to_string()))?);
        Ok(self)
    }

    /// Set a keyword argument. Insertion order does not affect the key.
    pub fn kwarg<T: Serialize + ?Sized>(mut self, name: &str, value: &T) -> Result<Self, Error> {
        self.kwargs.insert(
            name.to_string(),
            serde_json::to_value(value).map_err(|e| Error::KeyEncoding(e.to_string()))?,
        );
        Ok(self)
    }
}

/// Compute the cache key for an operation and its normalized arguments.
pub fn encode_key(operation: &str, call: &CallArgs) -> String {
    let mut hasher = Sha256::new();
    hasher.update(operation.as_bytes());
    hasher.update(b"\n");
    hasher.update(Value::from(call.args.clone()).to_string().as_bytes());
    hasher.update(b"\n");
    hasher.update(
        Value::Object(call.kwargs.clone().into_iter().collect())
            .to_string()
            .as_bytes(),
    );
    hex::encode(hasher.finalize())
}
