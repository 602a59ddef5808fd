//! Asset reference extraction
//!
//! Every URL is resolved against the page's origin; references that do not
//! resolve to an http(s) URL (data URIs, `javascript:`) are dropped.

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

use super::types::{AssetDimensions, AssetKind, ScrapedAsset, ScrapedPage};
use crate::utils::{is_valid_url, resolve_url};

// Hardcoded selectors should NEVER fail to parse - if they do, it's a compile-time bug.
static IMG: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("img[src]").expect("BUG: hardcoded CSS selector 'img[src]' is invalid")
});

static LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("link[href]").expect("BUG: hardcoded CSS selector 'link[href]' is invalid")
});

static SCRIPT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script[src]").expect("BUG: hardcoded CSS selector 'script[src]' is invalid")
});

const FONT_EXTENSIONS: &[&str] = &[".woff2", ".woff", ".ttf", ".otf", ".eot"];
const FONT_HOSTS: &[&str] = &["fonts.googleapis.com", "fonts.gstatic.com", "use.typekit.net"];

/// Classify a `<link>` element as a stylesheet, a font, or neither
fn classify_link(rel: &str, as_attr: Option<&str>, href: &str) -> Option<AssetKind> {
    let rel = rel.to_ascii_lowercase();
    let href_lower = href.to_ascii_lowercase();
    let path = href_lower.split(['?', '#']).next().unwrap_or_default();

    let is_font = as_attr.is_some_and(|a| a.eq_ignore_ascii_case("font"))
        || FONT_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        || FONT_HOSTS.iter().any(|host| href_lower.contains(host));

    if is_font {
        Some(AssetKind::Font)
    } else if rel.split_whitespace().any(|r| r == "stylesheet") {
        Some(AssetKind::Css)
    } else {
        None
    }
}

/// `scheme://host[:port]/` of `page_url`, or the URL itself when it has no tuple origin
fn origin_base(page_url: &str) -> String {
    match Url::parse(page_url) {
        Ok(url) if url.origin().is_tuple() => format!("{}/", url.origin().ascii_serialization()),
        _ => page_url.to_string(),
    }
}

fn parse_dimension(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().trim_end_matches("px").parse().ok())
}

/// Extract image, stylesheet, font and script references from a page
///
/// Duplicate URLs within the page are recorded once; the first occurrence wins.
#[must_use]
pub fn extract_assets(document: &Html, page_url: &str) -> Vec<ScrapedAsset> {
    let base = origin_base(page_url);
    let mut seen = HashSet::new();
    let mut assets = Vec::new();

    let mut push = |kind: AssetKind, raw: &str, alt: Option<String>, dims: Option<AssetDimensions>| {
        let Ok(url) = resolve_url(&base, raw) else {
            log::debug!("Skipping unresolvable asset reference '{raw}' on {page_url}");
            return;
        };
        if !is_valid_url(&url) || !seen.insert(url.clone()) {
            return;
        }
        assets.push(ScrapedAsset {
            kind,
            url,
            local_path: None,
            alt,
            dimensions: dims,
        });
    };

    for img in document.select(&IMG) {
        let element = img.value();
        let Some(src) = element.attr("src").filter(|s| !s.trim().is_empty()) else {
            continue;
        };
        let width = parse_dimension(element.attr("width"));
        let height = parse_dimension(element.attr("height"));
        let dimensions = (width.is_some() || height.is_some()).then_some(AssetDimensions { width, height });
        push(
            AssetKind::Image,
            src,
            element.attr("alt").map(ToString::to_string),
            dimensions,
        );
    }

    for link in document.select(&LINK) {
        let element = link.value();
        let Some(href) = element.attr("href") else {
            continue;
        };
        if let Some(kind) = classify_link(element.attr("rel").unwrap_or_default(), element.attr("as"), href) {
            push(kind, href, None, None);
        }
    }

    for script in document.select(&SCRIPT) {
        if let Some(src) = script.value().attr("src") {
            push(AssetKind::Js, src, None, None);
        }
    }

    assets
}

/// Collect assets across pages, unique by URL, first occurrence wins
#[must_use]
pub fn dedupe_assets(pages: &[ScrapedPage]) -> Vec<ScrapedAsset> {
    let mut seen = HashSet::new();
    pages
        .iter()
        .flat_map(|page| page.assets.iter())
        .filter(|asset| seen.insert(asset.url.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
        <link rel="stylesheet" href="/css/site.css">
        <link rel="preload" as="font" href="/fonts/inter.woff2" crossorigin>
        <link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Inter">
        <link rel="icon" href="/favicon.ico">
        <script src="js/app.js"></script>
    </head><body>
        <img src="/img/hero.png" alt="Hero" width="1200" height="630">
        <img src="/img/hero.png" alt="Duplicate">
        <img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=">
        <img src="">
    </body></html>"#;

    #[test]
    fn extracts_all_asset_kinds_with_absolute_urls() {
        let assets = extract_assets(&Html::parse_document(PAGE), "https://acme.com/about/");

        let urls: Vec<(AssetKind, &str)> = assets.iter().map(|a| (a.kind, a.url.as_str())).collect();
        assert_eq!(
            urls,
            vec![
                (AssetKind::Image, "https://acme.com/img/hero.png"),
                (AssetKind::Css, "https://acme.com/css/site.css"),
                (AssetKind::Font, "https://acme.com/fonts/inter.woff2"),
                (AssetKind::Font, "https://fonts.googleapis.com/css2?family=Inter"),
                (AssetKind::Js, "https://acme.com/js/app.js"),
            ]
        );

        let hero = &assets[0];
        assert_eq!(hero.alt.as_deref(), Some("Hero"));
        assert_eq!(
            hero.dimensions,
            Some(AssetDimensions {
                width: Some(1200),
                height: Some(630)
            })
        );
    }

    #[test]
    fn relative_paths_resolve_against_the_origin() {
        let html = Html::parse_document(
            r#"<img src="img/x.png"><img src="../shared/y.png"><script src="//cdn.acme.com/app.js"></script>"#,
        );
        let assets = extract_assets(&html, "http://localhost:8080/blog/post?ref=nav");

        let urls: Vec<&str> = assets.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:8080/img/x.png",
                "http://localhost:8080/shared/y.png",
                "http://cdn.acme.com/app.js",
            ]
        );
    }

    #[test]
    fn dedupes_across_pages_by_url() {
        let asset = |url: &str| ScrapedAsset {
            kind: AssetKind::Image,
            url: url.to_string(),
            local_path: None,
            alt: None,
            dimensions: None,
        };
        let page = |assets: Vec<ScrapedAsset>| ScrapedPage {
            url: "https://acme.com/".to_string(),
            title: String::new(),
            description: String::new(),
            raw_html: String::new(),
            sections: Vec::new(),
            assets,
            metadata: Default::default(),
            scraped_at: chrono::Utc::now(),
        };

        let pages = vec![
            page(vec![asset("https://acme.com/a.png"), asset("https://acme.com/b.png")]),
            page(vec![asset("https://acme.com/b.png"), asset("https://acme.com/c.png")]),
        ];
        let unique = dedupe_assets(&pages);
        assert_eq!(unique.len(), 3);
    }
}
