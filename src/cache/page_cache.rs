//! Cache-backed loaders for canonical pages
//!
//! Each loader returns the cached value when present and unexpired, otherwise
//! runs the supplied loader. A single page that loads as `None` is not cached,
//! so a page missing at one moment is looked up again on the next call.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use super::content_cache::ContentCache;
use crate::error::MigrateResult;
use crate::transform::PageContent;

const ALL_PAGES_KEY: &str = "pages:all";

fn page_key(slug: &str) -> String {
    format!("page:{slug}")
}

fn category_key(category: &str) -> String {
    format!("category:{category}")
}

/// Page-level cache shared by content consumers
#[derive(Debug, Clone)]
pub struct PageCache {
    pages: Arc<ContentCache<PageContent>>,
    lists: Arc<ContentCache<Vec<PageContent>>>,
}

impl PageCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            pages: Arc::new(ContentCache::with_ttl(ttl)),
            lists: Arc::new(ContentCache::with_ttl(ttl)),
        }
    }

    /// Load a single page by slug through the cache
    pub async fn page_by_slug<F, Fut>(
        &self,
        slug: &str,
        loader: F,
    ) -> MigrateResult<Option<PageContent>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MigrateResult<Option<PageContent>>>,
    {
        self.pages.get_or_load(&page_key(slug), None, loader).await
    }

    /// Load every page of one category through the cache
    pub async fn pages_by_category<F, Fut>(
        &self,
        category: &str,
        loader: F,
    ) -> MigrateResult<Vec<PageContent>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MigrateResult<Vec<PageContent>>>,
    {
        self.load_list(&category_key(category), loader).await
    }

    /// Load the full page set through the cache
    pub async fn all_pages<F, Fut>(&self, loader: F) -> MigrateResult<Vec<PageContent>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MigrateResult<Vec<PageContent>>>,
    {
        self.load_list(ALL_PAGES_KEY, loader).await
    }

    async fn load_list<F, Fut>(&self, key: &str, loader: F) -> MigrateResult<Vec<PageContent>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = MigrateResult<Vec<PageContent>>>,
    {
        let loaded = self
            .lists
            .get_or_load(key, None, || async move { loader().await.map(Some) })
            .await?;
        Ok(loaded.unwrap_or_default())
    }

    /// Drop cached entries whose key contains `pattern`, or everything when `None`
    pub fn invalidate(&self, pattern: Option<&str>) -> usize {
        match pattern {
            Some(pattern) => {
                let removed =
                    self.pages.invalidate_matching(pattern) + self.lists.invalidate_matching(pattern);
                log::debug!("Invalidated {removed} page cache entries matching '{pattern}'");
                removed
            }
            None => {
                let removed = self.pages.len() + self.lists.len();
                self.pages.clear();
                self.lists.clear();
                log::debug!("Cleared page cache ({removed} entries)");
                removed
            }
        }
    }

    /// Start background sweeps for both underlying caches
    pub fn start_sweep_tasks(&self, interval: Duration) -> Vec<JoinHandle<()>> {
        [
            self.pages.start_sweep_task(interval),
            self.lists.start_sweep_task(interval),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
