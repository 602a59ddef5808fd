//! Category grouping and priority selection over parsed sitemap records
//!
//! Sitemap order is preserved everywhere: the "first N" slices of
//! [`high_priority_urls`] follow document order, which is only stable if
//! the site's sitemap generator emits a stable order.

use std::collections::BTreeMap;

use super::category::UrlCategory;
use super::parser::SitemapUrlRecord;

/// Priority assumed for entries without `<priority>` (sitemap protocol default)
const DEFAULT_ENTRY_PRIORITY: f32 = 0.5;

/// Blog URLs included in the high-priority selection
const HIGH_PRIORITY_BLOG_LIMIT: usize = 5;

/// Customer-story URLs included in the high-priority selection
const HIGH_PRIORITY_CUSTOMER_LIMIT: usize = 3;

/// Group records by category, preserving order within each group
#[must_use]
pub fn group_by_category(
    records: &[SitemapUrlRecord],
) -> BTreeMap<UrlCategory, Vec<SitemapUrlRecord>> {
    let mut groups: BTreeMap<UrlCategory, Vec<SitemapUrlRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.category).or_default().push(record.clone());
    }
    groups
}

/// Records whose priority is at least `threshold`
#[must_use]
pub fn filter_by_priority(records: &[SitemapUrlRecord], threshold: f32) -> Vec<SitemapUrlRecord> {
    records
        .iter()
        .filter(|r| r.priority.unwrap_or(DEFAULT_ENTRY_PRIORITY) >= threshold)
        .cloned()
        .collect()
}

/// Fixed crawl selection policy
///
/// All homepage, main-page, product and solution URLs, then the first 5 blog
/// URLs, then the first 3 customer-story URLs, concatenated in that order.
#[must_use]
pub fn high_priority_urls(records: &[SitemapUrlRecord]) -> Vec<SitemapUrlRecord> {
    let of = |category: UrlCategory| records.iter().filter(move |r| r.category == category);

    of(UrlCategory::Homepage)
        .chain(of(UrlCategory::MainPage))
        .chain(of(UrlCategory::Product))
        .chain(of(UrlCategory::Solution))
        .chain(of(UrlCategory::Blog).take(HIGH_PRIORITY_BLOG_LIMIT))
        .chain(of(UrlCategory::CustomerStory).take(HIGH_PRIORITY_CUSTOMER_LIMIT))
        .cloned()
        .collect()
}
