//! Short-TTL cache for read-only queries.
//!
//! The terminal front-end re-renders some screens (dashboard, alert
//! summary) several times in quick succession; this cache keeps those
//! renders from hammering the API. Values are stored as JSON so one cache
//! can hold differently typed payloads. Mutating commands invalidate the
//! keys they affect.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::ApiError;

/// Identifies one cacheable query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `/reports/dashboard` headline figures.
    DashboardStats,
    /// `/alerts/summary/dashboard` aggregated counts.
    AlertsSummary,
}

/// Cache for read-only API queries.
#[derive(Clone)]
pub struct QueryCache {
    entries: Cache<QueryKey, Arc<serde_json::Value>>,
}

impl QueryCache {
    /// Default freshness window for cached queries.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(30);

    /// Create a cache whose entries expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder().max_capacity(64).time_to_live(ttl).build(),
        }
    }

    /// Return the cached value for `key`, or run `fetch` and cache its
    /// result. Fetch failures are never cached.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error, or [`ApiError::Parse`] if a cached
    /// value no longer matches the requested type.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(cached) = self.entries.get(&key).await {
            return Ok(serde_json::from_value(cached.as_ref().clone())?);
        }

        let value = fetch().await?;
        self.entries
            .insert(key, Arc::new(serde_json::to_value(&value)?))
            .await;
        Ok(value)
    }

    /// Drop the cached value for `key`, if any.
    pub async fn invalidate(&self, key: QueryKey) {
        self.entries.invalidate(&key).await;
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_second_read_hits_cache() {
        let cache = QueryCache::default();
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let n: u32 = cache
                .get_or_fetch(QueryKey::DashboardStats, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                })
                .await
                .expect("fetch");
            assert_eq!(n, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::default();
        let calls = AtomicU32::new(0);

        let first: Result<u32, _> = cache
            .get_or_fetch(QueryKey::AlertsSummary, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::Unauthorized)
            })
            .await;
        assert!(first.is_err());

        let second: u32 = cache
            .get_or_fetch(QueryKey::AlertsSummary, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(3)
            })
            .await
            .expect("fetch");
        assert_eq!(second, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = QueryCache::default();
        let calls = AtomicU32::new(0);

        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(1_u32)
        };
        let _: u32 = cache
            .get_or_fetch(QueryKey::DashboardStats, fetch)
            .await
            .expect("fetch");
        cache.invalidate(QueryKey::DashboardStats).await;
        let _: u32 = cache
            .get_or_fetch(QueryKey::DashboardStats, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(2)
            })
            .await
            .expect("fetch");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
