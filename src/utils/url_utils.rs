//! URL manipulation utilities.
//!
//! This module provides functions for resolving and comparing URLs
//! in the context of crawling a single origin.

use crate::error::{MigrateError, MigrateResult};
use url::Url;

/// Resolve a potentially relative URL against a base URL
pub fn resolve_url(base_url: &str, url: &str) -> MigrateResult<String> {
    let base = Url::parse(base_url)
        .map_err(|e| MigrateError::Parse(format!("Invalid base URL '{base_url}': {e}")))?;
    let resolved = base
        .join(url.trim())
        .map_err(|e| MigrateError::Parse(format!("Failed to resolve '{url}' against '{base_url}': {e}")))?;
    Ok(resolved.to_string())
}

/// Check if a URL is a fetchable http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// True when both URLs share scheme, host and port
#[must_use]
pub fn is_same_origin(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a.origin() == b.origin(),
        _ => false,
    }
}

/// Canonical form used for visited-set membership
///
/// Drops the fragment and any trailing slash (except the root path) so
/// `/about`, `/about/` and `/about#team` are treated as one page.
#[must_use]
pub fn normalize_page_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    parsed.set_fragment(None);

    let path = parsed.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        parsed.set_path(path.trim_end_matches('/'));
    }

    parsed.to_string()
}
