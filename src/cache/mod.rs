//! In-memory TTL caching
//!
//! This module provides the generic [`ContentCache`] used by the content API
//! client and the page loaders, a hit/miss tracking wrapper, and cache-backed
//! loaders for canonical pages.

pub mod content_cache;
pub mod page_cache;
pub mod tracked;

pub use content_cache::{CacheEntry, ContentCache};
pub use page_cache::PageCache;
pub use tracked::{CacheStats, TrackedCache};
