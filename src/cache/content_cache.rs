//! Generic key/value cache with per-entry time-to-live
//!
//! Expiry is checked at read time: an expired entry is evicted by the read
//! that finds it. A background sweep (see [`ContentCache::start_sweep_task`])
//! evicts entries nobody reads again. Between logical expiry and the next
//! read or sweep an entry still occupies memory but is never returned.

use dashmap::DashMap;
use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use crate::utils::DEFAULT_CACHE_TTL;

/// A cached value with its insertion time and lifetime
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: Instant,
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            timestamp: Instant::now(),
            ttl,
        }
    }

    /// An entry is expired once its age exceeds its TTL
    #[inline]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.timestamp.elapsed() > self.ttl
    }
}

/// Concurrent TTL cache keyed by string
///
/// Safe to share between workers behind an `Arc`; all operations take `&self`.
#[derive(Debug)]
pub struct ContentCache<T> {
    entries: DashMap<String, CacheEntry<T>>,
    default_ttl: Duration,
}

impl<T: Clone> ContentCache<T> {
    /// Create a cache with the default 5 minute TTL
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    #[must_use]
    pub fn with_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Insert `value`, replacing any previous entry; `ttl` of `None` uses the default
    pub fn set(&self, key: impl Into<String>, value: T, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key.into(), CacheEntry::new(value, ttl));
    }

    /// Fetch a live entry, evicting it if it has expired
    pub fn get(&self, key: &str) -> Option<T> {
        // The read guard must be released before remove_if touches the same shard
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => return Some(entry.data.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove_if(key, |_, entry| entry.is_expired());
            log::debug!("Evicted expired cache entry on read: {key}");
        }
        None
    }

    /// True if a live entry exists for `key`
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entry, returning whether one was present
    pub fn delete(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of stored entries, including expired ones not yet evicted
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of stored keys
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key().clone()).collect()
    }

    /// Evict every expired entry, returning how many were removed
    pub fn sweep_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before.saturating_sub(self.entries.len())
    }

    /// Remove every entry whose key contains `pattern`
    pub fn invalidate_matching(&self, pattern: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.contains(pattern));
        before.saturating_sub(self.entries.len())
    }

    /// Return the cached value or run `loader`, caching a `Some` result
    ///
    /// `None` results are not cached, so a missing value is re-attempted on
    /// the next call. Loader errors propagate untouched and cache nothing.
    pub async fn get_or_load<F, Fut, E>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        loader: F,
    ) -> Result<Option<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, E>>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(Some(hit));
        }

        let loaded = loader().await?;
        if let Some(value) = &loaded {
            self.set(key, value.clone(), ttl);
        }
        Ok(loaded)
    }
}

impl<T: Clone + Send + Sync + 'static> ContentCache<T> {
    /// Start the periodic sweep of expired entries
    ///
    /// Only available inside a Tokio runtime; returns `None` otherwise. The
    /// task holds a weak reference and exits once the cache is dropped.
    pub fn start_sweep_task(self: &Arc<Self>, interval: Duration) -> Option<JoinHandle<()>> {
        let handle = tokio::runtime::Handle::try_current().ok()?;
        let weak: Weak<Self> = Arc::downgrade(self);

        Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = weak.upgrade() else {
                    break;
                };
                let evicted = cache.sweep_expired();
                if evicted > 0 {
                    log::debug!(
                        "Cache sweep evicted {evicted} expired entries (remaining: {})",
                        cache.len()
                    );
                }
            }
        }))
    }
}

impl<T: Clone> Default for ContentCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
