//! Path-based URL categorisation
//!
//! Categories are assigned by an ordered rule table: the first rule whose
//! matcher accepts the URL path wins, and unmatched paths are `Other`.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Content category derived from a URL path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrlCategory {
    Homepage,
    MainPage,
    Blog,
    Product,
    CustomerStory,
    Solution,
    Other,
}

impl UrlCategory {
    pub const ALL: [UrlCategory; 7] = [
        Self::Homepage,
        Self::MainPage,
        Self::Blog,
        Self::Product,
        Self::CustomerStory,
        Self::Solution,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::MainPage => "main-page",
            Self::Blog => "blog",
            Self::Product => "product",
            Self::CustomerStory => "customer-story",
            Self::Solution => "solution",
            Self::Other => "other",
        }
    }

    /// Subdirectory of the content tree that holds pages of this category
    #[must_use]
    pub const fn content_subdir(&self) -> &'static str {
        match self {
            Self::Homepage | Self::MainPage | Self::Other => "pages",
            Self::Blog => "blog",
            Self::Product => "products",
            Self::CustomerStory => "customers",
            Self::Solution => "solutions",
        }
    }
}

impl fmt::Display for UrlCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule inspects a normalized path
#[derive(Debug, Clone, Copy)]
enum PathMatcher {
    /// Path equals the value
    Exact(&'static str),
    /// Path is the value or lies below it (`/blog`, `/blog/post`)
    Section(&'static str),
    /// Path equals one of the values
    OneOf(&'static [&'static str]),
}

impl PathMatcher {
    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(value) => path == *value,
            Self::Section(prefix) => {
                path == *prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
            Self::OneOf(values) => values.contains(&path),
        }
    }
}

const MAIN_PAGES: &[&str] = &[
    "/pricing",
    "/about",
    "/about-us",
    "/contact",
    "/contact-us",
    "/features",
    "/company",
    "/careers",
    "/demo",
    "/integrations",
    "/security",
    "/partners",
];

/// Ordered categorisation rules, first match wins
const CATEGORY_RULES: &[(PathMatcher, UrlCategory)] = &[
    (PathMatcher::Exact("/"), UrlCategory::Homepage),
    (PathMatcher::Section("/blog"), UrlCategory::Blog),
    (PathMatcher::Section("/products"), UrlCategory::Product),
    (PathMatcher::Section("/product"), UrlCategory::Product),
    (PathMatcher::Section("/customers"), UrlCategory::CustomerStory),
    (PathMatcher::Section("/customer-stories"), UrlCategory::CustomerStory),
    (PathMatcher::Section("/case-studies"), UrlCategory::CustomerStory),
    (PathMatcher::Section("/solutions"), UrlCategory::Solution),
    (PathMatcher::OneOf(MAIN_PAGES), UrlCategory::MainPage),
];

/// Lowercase path without trailing slash; `/` for the root
fn normalized_path(url: &str) -> String {
    let raw = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Already a path (or unparseable): strip query/fragment by hand
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };

    let trimmed = raw.trim().trim_end_matches('/').to_ascii_lowercase();
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed
    } else {
        format!("/{trimmed}")
    }
}

/// Categorise an absolute URL or a bare path
#[must_use]
pub fn categorize_url(url: &str) -> UrlCategory {
    let path = normalized_path(url);
    CATEGORY_RULES
        .iter()
        .find(|(matcher, _)| matcher.matches(&path))
        .map_or(UrlCategory::Other, |(_, category)| *category)
}
