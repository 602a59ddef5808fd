//! Head metadata extraction

use scraper::{Html, Selector};
use std::sync::LazyLock;

use super::types::PageMetadata;

// Hardcoded selectors should NEVER fail to parse - if they do, it's a compile-time bug.
static TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("BUG: hardcoded CSS selector 'title' is invalid")
});

static META: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("meta").expect("BUG: hardcoded CSS selector 'meta' is invalid")
});

static CANONICAL: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("link[rel='canonical']")
        .expect("BUG: hardcoded CSS selector 'link[rel=canonical]' is invalid")
});

/// Extract title, description, keywords, Open Graph tags and the canonical URL
///
/// Missing string fields become empty strings; missing Open Graph tags stay `None`.
/// The first occurrence of a tag wins.
#[must_use]
pub fn extract_metadata(document: &Html) -> PageMetadata {
    let mut metadata = PageMetadata {
        title: document
            .select(&TITLE)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
            .unwrap_or_default(),
        canonical_url: document
            .select(&CANONICAL)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(|href| href.trim().to_string())
            .unwrap_or_default(),
        ..PageMetadata::default()
    };

    for meta in document.select(&META) {
        let element = meta.value();
        let Some(content) = element.attr("content").map(str::trim) else {
            continue;
        };
        let key = element
            .attr("name")
            .or_else(|| element.attr("property"))
            .map(str::to_ascii_lowercase);

        match key.as_deref() {
            Some("description") if metadata.description.is_empty() => {
                metadata.description = content.to_string();
            }
            Some("keywords") if metadata.keywords.is_empty() => {
                metadata.keywords = content.to_string();
            }
            Some("og:title") => set_once(&mut metadata.og_title, content),
            Some("og:description") => set_once(&mut metadata.og_description, content),
            Some("og:image") => set_once(&mut metadata.og_image, content),
            Some("og:type") => set_once(&mut metadata.og_type, content),
            Some("og:url") => set_once(&mut metadata.og_url, content),
            _ => {}
        }
    }

    metadata
}

fn set_once(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
}
