//! Lazy Redis backend resolution.
//!
//! The backend is probed at most once per process, on first cache access.
//! If no Redis URL is configured the store resolves immediately to the
//! in-process map without any network I/O; otherwise a bounded connect and
//! PING decide. The resolution never changes afterwards: a Redis failure
//! after a successful probe is handled per call, not by falling back.

use redis::aio::MultiplexedConnection;
use std::time::Duration;

/// Connect and response timeout for the reachability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// The physical backend a store resolved to.
#[derive(Clone)]
pub enum Backend {
    /// Redis confirmed reachable at probe time.
    Remote(MultiplexedConnection),
    /// No Redis configured, or the probe failed.
    Memory,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Remote(_) => f.write_str("Remote"),
            Backend::Memory => f.write_str("Memory"),
        }
    }
}

/// Resolve the backend for the given optional Redis URL.
///
/// A probe failure is not fatal; the store keeps serving from the
/// in-process map.
pub(crate) async fn probe(redis_url: Option<&str>) -> Backend {
    let Some(url) = redis_url else {
        tracing::info!("redis not configured, using in-process cache");
        return Backend::Memory;
    };

    match connect(url).await {
        Ok(conn) => {
            tracing::info!("redis cache connected");
            Backend::Remote(conn)
        }
        Err(e) => {
            tracing::warn!(error = %e, "redis unreachable, using in-process cache");
            Backend::Memory
        }
    }
}

async fn connect(url: &str) -> Result<MultiplexedConnection, redis::RedisError> {
    let client = redis::Client::open(url)?;
    let mut conn = client
        .get_multiplexed_async_connection_with_timeouts(PROBE_TIMEOUT, PROBE_TIMEOUT)
        .await?;
    let _: () = redis::cmd("PING").query_async(&mut conn).await?;
    Ok(conn)
}
