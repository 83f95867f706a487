//! Cached database health probe.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use jiff::Timestamp;
use lector_postgres::PgClient;
use tokio::sync::RwLock;

use crate::utility::tracing_targets::TRACING_TARGET_HEALTH_CACHE as TRACING_TARGET;

/// How long a probe result is reused.
const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct HealthCacheEntry {
    is_healthy: AtomicBool,
    /// Monotonic and wall-clock time of the last probe; `None` until the first one.
    last_check: RwLock<Option<(Instant, Timestamp)>>,
    cache_duration: Duration,
}

impl HealthCacheEntry {
    fn new(cache_duration: Duration) -> Self {
        Self {
            is_healthy: AtomicBool::new(false),
            last_check: RwLock::new(None),
            cache_duration,
        }
    }

    async fn get_or_update<F, Fut>(&self, check_fn: F) -> (bool, Timestamp)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        if let Some((checked, checked_at)) = *self.last_check.read().await
            && checked.elapsed() < self.cache_duration
        {
            return (self.is_healthy.load(Ordering::Relaxed), checked_at);
        }

        let healthy = check_fn().await;
        let checked_at = Timestamp::now();

        self.is_healthy.store(healthy, Ordering::Relaxed);
        *self.last_check.write().await = Some((Instant::now(), checked_at));

        (healthy, checked_at)
    }

    async fn invalidate(&self) {
        *self.last_check.write().await = None;
    }
}

/// Database health status, cached for 30 seconds by default.
///
/// Clones share the same cache.
#[derive(Debug, Clone)]
pub struct HealthCache {
    cache: Arc<HealthCacheEntry>,
}

impl HealthCache {
    pub fn new() -> Self {
        Self::with_cache_duration(DEFAULT_CACHE_DURATION)
    }

    pub fn with_cache_duration(cache_duration: Duration) -> Self {
        Self {
            cache: Arc::new(HealthCacheEntry::new(cache_duration)),
        }
    }

    /// Returns whether the database answered `SELECT 1` and when that was
    /// checked, probing only when the cached result has expired.
    pub async fn check(&self, pg_client: &PgClient) -> (bool, Timestamp) {
        self.get_or_update(|| probe_database(pg_client)).await
    }

    /// Returns the cached result, or runs `check_fn` when it has expired.
    pub async fn get_or_update<F, Fut>(&self, check_fn: F) -> (bool, Timestamp)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        self.cache.get_or_update(check_fn).await
    }

    /// Last known status without probing.
    pub fn get_cached_health(&self) -> bool {
        self.cache.is_healthy.load(Ordering::Relaxed)
    }

    /// Forces the next call to probe.
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;
    }
}

impl Default for HealthCache {
    fn default() -> Self {
        Self::new()
    }
}

async fn probe_database(pg_client: &PgClient) -> bool {
    match pg_client.ping().await {
        Ok(()) => {
            tracing::debug!(target: TRACING_TARGET, "database healthy");
            true
        }
        Err(e) => {
            tracing::warn!(target: TRACING_TARGET, error = %e, "database probe failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[tokio::test]
    async fn result_is_cached() {
        let cache = HealthCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let (healthy, _) = cache
                .get_or_update(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    true
                })
                .await;
            assert!(healthy);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.get_cached_health());
    }

    #[tokio::test]
    async fn expired_result_is_refreshed() {
        let cache = HealthCache::with_cache_duration(Duration::ZERO);

        let (first, _) = cache.get_or_update(|| async { true }).await;
        let (second, _) = cache.get_or_update(|| async { false }).await;

        assert!(first);
        assert!(!second);
    }

    #[tokio::test]
    async fn invalidate_forces_probe() {
        let cache = HealthCache::new();
        cache.get_or_update(|| async { false }).await;
        cache.invalidate().await;

        let (healthy, _) = cache.get_or_update(|| async { true }).await;
        assert!(healthy);
    }

    #[tokio::test]
    async fn unreachable_database_is_unhealthy() {
        let pg_client = lector_postgres::PgConfig::new("postgresql://lector@127.0.0.1:1/lector")
            .with_acquire_timeout_secs(1)
            .build()
            .unwrap();

        let (healthy, _) = HealthCache::new().check(&pg_client).await;
        assert!(!healthy);
    }
}
