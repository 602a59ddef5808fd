//! Content scanning and optimization driver

use std::collections::HashSet;
use std::sync::Arc;

use super::filter::ExtractorConfig;
use super::patterns::{AssetSource, find_in_html, find_in_metadata};
use super::types::{ContentItem, ExtractedAsset, ExtractionOutcome};
use crate::image_optimizer::{ImageOptimizer, ImageRequest};
use crate::utils::resolve_url;

/// A validated reference of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredReference {
    pub content_id: String,
    pub url: String,
    pub source: AssetSource,
    pub declared_width: Option<u32>,
    pub alt: Option<String>,
}

/// Finds image references in content and hands unique URLs to the optimizer
pub struct AssetExtractor {
    config: ExtractorConfig,
    optimizer: Arc<ImageOptimizer>,
}

impl AssetExtractor {
    pub fn new(config: ExtractorConfig, optimizer: Arc<ImageOptimizer>) -> Self {
        Self { config, optimizer }
    }

    #[must_use]
    pub fn optimizer(&self) -> &Arc<ImageOptimizer> {
        &self.optimizer
    }

    /// Valid references per item, each URL at most once per item
    ///
    /// Relative references in markup and metadata are resolved against the
    /// item's base URL. Markup patterns are scanned before metadata; within an
    /// item the first occurrence of a URL decides its source.
    #[must_use]
    pub fn discover(&self, items: &[ContentItem]) -> Vec<DiscoveredReference> {
        let mut discovered = Vec::new();

        for item in items {
            let base = item.base_url.as_deref();
            let accept_metadata = |candidate: &str| {
                is_path_like(candidate) && self.config.is_valid_image_url(&absolutize(base, candidate))
            };

            let mut seen: HashSet<String> = HashSet::new();
            let found = find_in_html(&item.html)
                .into_iter()
                .chain(find_in_metadata(&item.metadata, &accept_metadata));

            for reference in found {
                let url = absolutize(base, &reference.url);
                if !self.config.is_valid_image_url(&url) || !seen.insert(url.clone()) {
                    continue;
                }
                discovered.push(DiscoveredReference {
                    content_id: item.id.clone(),
                    url,
                    source: reference.source,
                    declared_width: reference.width,
                    alt: reference.alt,
                });
            }
        }

        discovered
    }

    /// Discover, deduplicate globally and optimize every image of `items`
    ///
    /// Each unique URL is optimized once; every reference to it gets an
    /// [`ExtractedAsset`] carrying the same hash. Failed images are reported
    /// in the outcome and their references dropped.
    pub async fn extract_from_content(&self, items: &[ContentItem]) -> ExtractionOutcome {
        let references = self.discover(items);

        let mut unique: HashSet<&str> = HashSet::new();
        let requests: Vec<ImageRequest> = references
            .iter()
            .filter(|reference| unique.insert(reference.url.as_str()))
            .map(|reference| ImageRequest::new(reference.url.clone(), reference.alt.clone()))
            .collect();

        let reused = requests
            .iter()
            .filter(|request| self.optimizer.cached(&request.url).is_some())
            .count();
        log::info!(
            "Found {} image references ({} unique, {} from manifest) in {} items",
            references.len(),
            requests.len(),
            reused,
            items.len()
        );

        let batch = self.optimizer.process_batch(&requests).await;

        let assets = references
            .into_iter()
            .filter_map(|reference| {
                let image = batch.assets.iter().find(|asset| asset.url == reference.url)?.clone();
                Some(ExtractedAsset {
                    content_id: reference.content_id,
                    source: reference.source,
                    url: reference.url,
                    declared_width: reference.declared_width,
                    hash: image.hash.clone(),
                    image,
                })
            })
            .collect();

        ExtractionOutcome {
            assets,
            failures: batch.failures,
            reused,
        }
    }
}

/// `url` joined onto `base`, or unchanged when there is no base or the join fails
fn absolutize(base: Option<&str>, url: &str) -> String {
    match base {
        Some(base) => resolve_url(base, url).unwrap_or_else(|_| url.to_string()),
        None => url.to_string(),
    }
}

// Metadata holds prose too; only single-token values can be URLs
fn is_path_like(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_optimizer::OptimizerConfig;

    fn extractor() -> AssetExtractor {
        let optimizer = ImageOptimizer::new(OptimizerConfig::default()).unwrap();
        AssetExtractor::new(ExtractorConfig::default(), Arc::new(optimizer))
    }

    #[test]
    fn discover_dedupes_within_item_and_filters() {
        let items = vec![
            ContentItem::new(
                "home",
                r#"<img src="https://cdn.acme.com/a.png"><img src="https://cdn.acme.com/a.png">
                   <a href="https://acme.com/doc.pdf">doc</a><img src="/relative.png">"#,
                serde_json::json!({"og": "https://cdn.acme.com/a.png", "other": "https://cdn.acme.com/b.jpg"}),
            ),
            ContentItem::new("about", r#"<img src="https://cdn.acme.com/a.png">"#, serde_json::Value::Null),
        ];

        let refs = extractor().discover(&items);
        let pairs: Vec<(&str, &str, AssetSource)> = refs
            .iter()
            .map(|r| (r.content_id.as_str(), r.url.as_str(), r.source))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("home", "https://cdn.acme.com/a.png", AssetSource::ImgTag),
                ("home", "https://cdn.acme.com/b.jpg", AssetSource::Metadata),
                ("about", "https://cdn.acme.com/a.png", AssetSource::ImgTag),
            ]
        );
    }

    #[test]
    fn relative_references_need_a_base_url() {
        let html = r#"<img src="/img/logo.png">"#;
        let without = ContentItem::new("a", html, serde_json::Value::Null);
        let with = ContentItem::new("b", html, serde_json::Value::Null).with_base_url("https://acme.com/about");

        let refs = extractor().discover(&[without, with]);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].url, "https://acme.com/img/logo.png");
    }

    #[test]
    fn relative_open_graph_image_is_resolved() {
        let metadata = serde_json::json!({
            "title": "Rocket launch.png day",
            "openGraphImage": "/img/og.png",
        });
        let without = ContentItem::new("a", "", metadata.clone());
        let with = ContentItem::new("b", "", metadata).with_base_url("https://acme.com/blog/launch");

        let refs = extractor().discover(&[without, with]);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].content_id, "b");
        assert_eq!(refs[0].url, "https://acme.com/img/og.png");
        assert_eq!(refs[0].source, AssetSource::Metadata);
    }

    #[test]
    fn scraped_page_og_image_is_discovered() {
        let html = r#"<html><head><title>Launch</title>
            <meta property="og:image" content="../img/og.png"></head>
            <body><section class="hero"><h1>Launch</h1><img src="hero.png" alt="Pad"></section></body></html>"#;
        let scraped = crate::page_scraper::PageScraper::parse_page("https://acme.com/blog/launch", html);
        let content = crate::transform::transform_page(&scraped);
        let item = ContentItem::from_page(&content).with_base_url(&scraped.url);

        let refs = extractor().discover(&[item]);
        let urls: Vec<(&str, AssetSource, Option<&str>)> = refs
            .iter()
            .map(|r| (r.url.as_str(), r.source, r.alt.as_deref()))
            .collect();
        assert_eq!(
            urls,
            vec![
                ("https://acme.com/blog/hero.png", AssetSource::ImgTag, Some("Pad")),
                ("https://acme.com/img/og.png", AssetSource::Metadata, None),
            ]
        );
    }
}
