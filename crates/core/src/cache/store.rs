//! Key/value store with per-entry TTL.
//!
//! Writes go to Redis when the resolved backend is reachable, otherwise to
//! an in-process map with lazy expiry. Redis errors after resolution are
//! best-effort: logged and treated as a miss (`get`) or a no-op (`set`) for
//! that call only.

use super::backend::{self, Backend};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::Instant;

use redis::AsyncCommands;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

/// TTL key/value store with lazy backend resolution.
///
/// Construct one per process and share it by reference; the backend probe
/// runs once, on first access, even when many requests race to it.
#[derive(Debug)]
pub struct Store {
    redis_url: Option<String>,
    backend: OnceCell<Backend>,
    // Fallback map. The lock guards single map operations only and is never
    // held across an await.
    memory: Mutex<HashMap<String, MemoryEntry>>,
}

impl Store {
    pub fn new(redis_url: Option<String>) -> Self {
        Self { redis_url, backend: OnceCell::new(), memory: Mutex::new(HashMap::new()) }
    }

    /// Resolve the backend, probing on first use.
    ///
    /// `OnceCell` serializes racing first callers, so only one probe runs.
    async fn backend(&self) -> &Backend {
        self.backend
            .get_or_init(|| backend::probe(self.redis_url.as_deref()))
            .await
    }

    /// Look up a key. Expired fallback entries read as absent.
    pub async fn get(&self, key: &str) -> Option<String> {
        match self.backend().await {
            Backend::Remote(conn) => {
                let mut conn = conn.clone();
                match conn.get::<_, Option<String>>(key).await {
                    Ok(value) => value,
                    Err(e) => {
                        tracing::warn!(error = %e, "redis get failed, treating as miss");
                        None
                    }
                }
            }
            Backend::Memory => {
                let map = self.memory.lock().unwrap_or_else(PoisonError::into_inner);
                map.get(key)
                    .filter(|entry| Instant::now() < entry.expires_at)
                    .map(|entry| entry.value.clone())
            }
        }
    }

    /// Insert or overwrite a key with the given TTL.
    ///
    /// A TTL of zero means "do not cache": the write is skipped entirely
    /// rather than storing an already-expired entry.
    pub async fn set(&self, key: &str, value: String, ttl_seconds: u64) {
        if ttl_seconds == 0 {
            tracing::debug!(key, "ttl is zero, skipping cache write");
            return;
        }

        match self.backend().await {
            Backend::Remote(conn) => {
                let mut conn = conn.clone();
                if let Err(e) = conn.set_ex::<_, _, ()>(key, value, ttl_seconds).await {
                    tracing::warn!(error = %e, "redis setex failed, skipping cache write");
                }
            }
            Backend::Memory => {
                let entry =
                    MemoryEntry { value, expires_at: Instant::now() + Duration::from_secs(ttl_seconds) };
                let mut map = self.memory.lock().unwrap_or_else(PoisonError::into_inner);
                map.insert(key.to_string(), entry);
            }
        }
    }

    /// Drop lazily expired fallback entries.
    ///
    /// Expiry is enforced on read, so this is purely opportunistic space
    /// reclamation. Returns the number of removed entries. Redis handles
    /// its own expiry, so the remote path has nothing to purge.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut map = self.memory.lock().unwrap_or_else(PoisonError::into_inner);
        let before = map.len();
        map.retain(|_, entry| now < entry.expires_at);
        before - map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_set_and_get() {
        let store = Store::new(None);
        store.set("k", "v".into(), 60).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = Store::new(None);
        assert!(store.get("nonexistent").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expiry_boundary() {
        let store = Store::new(None);
        store.set("k", "v".into(), 60).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get("k").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_ttl_not_stored() {
        let store = Store::new(None);
        store.set("k", "v".into(), 0).await;
        assert!(store.get("k").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite() {
        let store = Store::new(None);
        store.set("k", "old".into(), 60).await;
        store.set("k", "new".into(), 60).await;
        assert_eq!(store.get("k").await.as_deref(), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_can_be_overwritten() {
        let store = Store::new(None);
        store.set("k", "old".into(), 1).await;
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get("k").await.is_none());

        store.set("k", "new".into(), 60).await;
        assert_eq!(store.get("k").await.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_concurrent_sets_same_key() {
        let store = Arc::new(Store::new(None));

        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.set("shared", format!("value-{i}"), 60).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let value = store.get("shared").await.unwrap();
        assert!(value.starts_with("value-"));
        let n: usize = value.trim_start_matches("value-").parse().unwrap();
        assert!(n < 32);
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back() {
        let store = Store::new(Some("redis://127.0.0.1:1".into()));
        store.set("k", "v".into(), 60).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_purge_expired() {
        let store = Store::new(None);
        store.set("expiring", "v".into(), 1).await;
        store.set("fresh", "v".into(), 3600).await;

        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(store.purge_expired(), 1);
        assert!(store.get("expiring").await.is_none());
        assert!(store.get("fresh").await.is_some());
    }
}
