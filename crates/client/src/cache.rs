//! Read-through cache for lookup lists.
//!
//! Banks, accounts, vendors and the other lists that fill selectors are
//! cached per resource and filter. Mutating calls invalidate every entry
//! of the resource they touched.

use moka::future::Cache;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tesoreria_shared::{AppError, AppResult};
use tesoreria_shared::config::CacheConfig;

/// Lookup list cache keyed by `resource?filter`.
#[derive(Clone)]
pub struct LookupCache {
    cache: Cache<String, Arc<Value>>,
}

impl LookupCache {
    /// Creates a cache from configuration.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_config(config.max_capacity, config.ttl_secs)
    }

    /// Creates a cache with custom limits.
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .support_invalidation_closures()
            .build();
        Self { cache }
    }

    /// Cache key for a resource and its serialized filter.
    #[must_use]
    pub fn key(resource: &str, filter: &str) -> String {
        if filter.is_empty() {
            resource.to_string()
        } else {
            format!("{resource}?{filter}")
        }
    }

    /// Returns the cached value, or runs `fetch` and caches its result.
    ///
    /// Concurrent misses on one key share a single fetch. Failures are
    /// returned to every waiter and not cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: String, fetch: F) -> AppResult<Arc<Value>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<Value>>,
    {
        let miss_key = key.clone();
        self.cache
            .try_get_with(key, async move {
                tracing::trace!(key = %miss_key, "lookup cache miss");
                fetch().await.map(Arc::new)
            })
            .await
            .map_err(|err: Arc<AppError>| AppError::clone(&err))
    }

    /// Drops every entry of `resource`.
    pub fn invalidate_resource(&self, resource: &str) {
        let prefix = resource.to_string();
        let exact = prefix.clone();
        let with_filter = format!("{prefix}?");
        if let Err(err) = self
            .cache
            .invalidate_entries_if(move |k, _| *k == exact || k.starts_with(&with_filter))
        {
            tracing::warn!(error = %err, resource = %prefix, "lookup cache invalidation failed");
            self.cache.invalidate_all();
        }
    }

    /// Drops every entry.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Runs pending maintenance; entries dropped by invalidation stop counting after this.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Number of cached entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
