//! Slug derivation from page URLs

use url::Url;

/// Slug used for the site root
pub const HOME_SLUG: &str = "home";

/// Slug used when the URL cannot be parsed
pub const FALLBACK_SLUG: &str = "page";

/// Derive a page slug from its URL path
///
/// The root path becomes `home`; otherwise leading and trailing slashes are
/// stripped and inner slashes become hyphens. Query and fragment are ignored.
/// The result is not checked against the slug format here; that is the
/// validator's job.
#[must_use]
pub fn slug_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return FALLBACK_SLUG.to_string();
    };

    let trimmed = parsed.path().trim_matches('/');
    if trimmed.is_empty() {
        HOME_SLUG.to_string()
    } else {
        trimmed.replace('/', "-")
    }
}
