//! Image reference discovery in markup and metadata

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static IMG_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*>"#).expect("BUG: hardcoded img tag regex is invalid")
});

// Attribute names must follow whitespace so `data-src` and friends never match
static SRC_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\ssrc\s*=\s*["']([^"']+)["']"#).expect("BUG: hardcoded src attribute regex is invalid")
});

static ALT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\salt\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("BUG: hardcoded alt attribute regex is invalid")
});

static BACKGROUND_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)background-image\s*:\s*url\(\s*(?:&quot;|["'])?([^"')&]+(?:&amp;[^"')&]+)*)(?:&quot;|["'])?\s*\)"#)
        .expect("BUG: hardcoded background-image regex is invalid")
});

static SRCSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)srcset\s*=\s*["']([^"']+)["']"#)
        .expect("BUG: hardcoded srcset regex is invalid")
});

/// Where a reference was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetSource {
    ImgTag,
    BackgroundImage,
    Srcset,
    Metadata,
}

impl AssetSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ImgTag => "img-tag",
            Self::BackgroundImage => "background-image",
            Self::Srcset => "srcset",
            Self::Metadata => "metadata",
        }
    }
}

/// One `srcset` candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SrcSetEntry {
    pub url: String,
    pub width: Option<u32>,
}

/// A raw reference before filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundReference {
    pub url: String,
    pub source: AssetSource,
    pub width: Option<u32>,
    /// Non-empty `alt` text of the `<img>` the reference came from
    pub alt: Option<String>,
}

fn decode_entities(url: &str) -> String {
    url.trim().replace("&amp;", "&")
}

/// Split a `srcset` value on commas, then each candidate on whitespace
///
/// A trailing `w` descriptor becomes the width; density descriptors are
/// ignored.
#[must_use]
pub fn parse_srcset(value: &str) -> Vec<SrcSetEntry> {
    value
        .split(',')
        .filter_map(|candidate| {
            let mut parts = candidate.split_whitespace();
            let url = parts.next()?;
            let width = parts
                .next()
                .and_then(|descriptor| descriptor.strip_suffix('w'))
                .and_then(|w| w.parse().ok());
            Some(SrcSetEntry {
                url: decode_entities(url),
                width,
            })
        })
        .collect()
}

/// Every image-like reference in `html`: `<img src>`, then CSS backgrounds, then srcset candidates
#[must_use]
pub fn find_in_html(html: &str) -> Vec<FoundReference> {
    let mut found = Vec::new();

    for tag in IMG_TAG.find_iter(html) {
        let Some(src) = SRC_ATTR.captures(tag.as_str()) else {
            continue;
        };
        let alt = ALT_ATTR
            .captures(tag.as_str())
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().trim().replace("&amp;", "&"))
            .filter(|alt| !alt.is_empty());
        found.push(FoundReference {
            url: decode_entities(&src[1]),
            source: AssetSource::ImgTag,
            width: None,
            alt,
        });
    }
    for caps in BACKGROUND_IMAGE.captures_iter(html) {
        found.push(FoundReference {
            url: decode_entities(&caps[1]),
            source: AssetSource::BackgroundImage,
            width: None,
            alt: None,
        });
    }
    for caps in SRCSET.captures_iter(html) {
        found.extend(parse_srcset(&caps[1]).into_iter().map(|entry| FoundReference {
            url: entry.url,
            source: AssetSource::Srcset,
            width: entry.width,
            alt: None,
        }));
    }

    found
}

/// Every string in a JSON tree that `accept` approves, depth first
pub fn find_in_metadata(value: &serde_json::Value, accept: &dyn Fn(&str) -> bool) -> Vec<FoundReference> {
    let mut found = Vec::new();
    walk(value, accept, &mut found);
    found
}

fn walk(value: &serde_json::Value, accept: &dyn Fn(&str) -> bool, out: &mut Vec<FoundReference>) {
    match value {
        serde_json::Value::String(s) => {
            let candidate = s.trim();
            if accept(candidate) {
                out.push(FoundReference {
                    url: candidate.to_string(),
                    source: AssetSource::Metadata,
                    width: None,
                    alt: None,
                });
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                walk(item, accept, out);
            }
        }
        serde_json::Value::Object(map) => {
            for item in map.values() {
                walk(item, accept, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_srcset_descriptors() {
        let entries = parse_srcset("a.jpg 320w, b.jpg 2x,  c.jpg ,d.jpg 1024w");
        assert_eq!(
            entries,
            vec![
                SrcSetEntry { url: "a.jpg".into(), width: Some(320) },
                SrcSetEntry { url: "b.jpg".into(), width: None },
                SrcSetEntry { url: "c.jpg".into(), width: None },
                SrcSetEntry { url: "d.jpg".into(), width: Some(1024) },
            ]
        );
    }

    #[test]
    fn finds_all_three_markup_patterns() {
        let html = r#"<div style="background-image: url('https://cdn.acme.com/bg.jpg')">
            <img alt="x" src="https://cdn.acme.com/a.png?x=1&amp;y=2"
                 srcset="https://cdn.acme.com/a-320.png 320w, https://cdn.acme.com/a-640.png 640w">
            <div style="background-image:url(&quot;https://cdn.acme.com/q.webp&quot;)"></div>
        </div>"#;

        let found = find_in_html(html);
        let summary: Vec<(AssetSource, &str, Option<u32>)> =
            found.iter().map(|f| (f.source, f.url.as_str(), f.width)).collect();
        assert_eq!(
            summary,
            vec![
                (AssetSource::ImgTag, "https://cdn.acme.com/a.png?x=1&y=2", None),
                (AssetSource::BackgroundImage, "https://cdn.acme.com/bg.jpg", None),
                (AssetSource::BackgroundImage, "https://cdn.acme.com/q.webp", None),
                (AssetSource::Srcset, "https://cdn.acme.com/a-320.png", Some(320)),
                (AssetSource::Srcset, "https://cdn.acme.com/a-640.png", Some(640)),
            ]
        );
    }

    #[test]
    fn lazy_loading_attributes_are_not_sources() {
        let html = r#"<img data-src="https://cdn.acme.com/lazy.png" src="https://cdn.acme.com/placeholder.gif">
            <img data-srcset="https://cdn.acme.com/lazy-640.png 640w" alt="Lazy">
            <source data-srcset="https://cdn.acme.com/lazy-320.png 320w">"#;

        let urls: Vec<String> = find_in_html(html).into_iter().map(|f| f.url).collect();
        assert_eq!(urls, vec!["https://cdn.acme.com/placeholder.gif".to_string()]);
    }

    #[test]
    fn img_alt_text_is_captured() {
        let html = r#"<img alt="Launch pad &amp; tower" src="https://cdn.acme.com/pad.jpg">
            <img src='https://cdn.acme.com/crew.jpg' alt='Crew'>
            <img src="https://cdn.acme.com/spacer.gif" alt="">
            <img data-alt="nope" src="https://cdn.acme.com/bare.png">"#;

        let found = find_in_html(html);
        let alts: Vec<Option<&str>> = found.iter().map(|f| f.alt.as_deref()).collect();
        assert_eq!(alts, vec![Some("Launch pad & tower"), Some("Crew"), None, None]);
    }

    #[test]
    fn walks_nested_metadata() {
        let metadata = serde_json::json!({
            "title": "Hello",
            "hero": {"image": "https://cdn.acme.com/h.jpg", "count": 3},
            "gallery": ["https://cdn.acme.com/1.jpg", {"src": "https://cdn.acme.com/2.jpg"}]
        });
        let found = find_in_metadata(&metadata, &|s: &str| s.ends_with(".jpg"));
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|f| f.source == AssetSource::Metadata));
    }
}
