//! Hit/miss tracking wrapper around [`ContentCache`]

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::content_cache::ContentCache;

/// Point-in-time cache statistics
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    /// `hits / (hits + misses)`, 0.0 before any lookup
    pub hit_rate: f64,
}

/// A [`ContentCache`] that counts lookups
///
/// Counters are cumulative and lock-free; `reset_stats` zeroes them without
/// touching stored entries.
#[derive(Debug)]
pub struct TrackedCache<T> {
    inner: Arc<ContentCache<T>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<T: Clone> TrackedCache<T> {
    #[must_use]
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(ContentCache::with_ttl(default_ttl)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let value = self.inner.get(key);
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    pub fn set(&self, key: impl Into<String>, value: T, ttl: Option<Duration>) {
        self.inner.set(key, value, ttl);
    }

    /// Access the untracked cache (lookups through it are not counted)
    #[must_use]
    pub fn inner(&self) -> &ContentCache<T> {
        &self.inner
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        CacheStats {
            hits,
            misses,
            size: self.inner.len(),
            hit_rate: if total == 0 {
                0.0
            } else {
                hits as f64 / total as f64
            },
        }
    }

    pub fn reset_stats(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

impl<T: Clone + Send + Sync + 'static> TrackedCache<T> {
    /// Periodically evict expired entries; see [`ContentCache::start_sweep_task`]
    pub fn start_sweep_task(&self, interval: Duration) -> Option<JoinHandle<()>> {
        self.inner.start_sweep_task(interval)
    }
}
