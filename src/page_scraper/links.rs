//! Navigation link discovery
//!
//! Link discovery is deliberately shallow: only anchors inside `<nav>` and
//! `<header>` elements are considered, and only same-origin targets are kept.

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::utils::{is_same_origin, is_valid_url, normalize_page_url, resolve_url};

// Hardcoded selectors should NEVER fail to parse - if they do, it's a compile-time bug.
static NAV_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("nav a[href], header a[href]")
        .expect("BUG: hardcoded CSS selector 'nav a[href], header a[href]' is invalid")
});

/// Same-origin navigation targets of a page, normalized and deduplicated
///
/// The page itself is excluded. Order follows document order.
#[must_use]
pub fn extract_navigation_links(document: &Html, page_url: &str) -> Vec<String> {
    let origin = normalize_page_url(page_url);
    let mut seen: HashSet<String> = HashSet::from([origin]);
    let mut links = Vec::new();

    for anchor in document.select(&NAV_LINKS) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() || href.starts_with('#') {
            continue;
        }
        let Ok(resolved) = resolve_url(page_url, href) else {
            continue;
        };
        if !is_valid_url(&resolved) || !is_same_origin(page_url, &resolved) {
            continue;
        }

        let normalized = normalize_page_url(&resolved);
        if seen.insert(normalized.clone()) {
            links.push(normalized);
        }
    }

    links
}
