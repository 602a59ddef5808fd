//! Asset extraction inputs and outputs

use serde::{Deserialize, Serialize};

use super::patterns::AssetSource;
use crate::image_optimizer::{AssetFailure, ImageAsset};
use crate::transform::PageContent;

/// A unit of content to scan: rendered markup plus arbitrary metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub html: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Relative references are resolved against this URL; without it they are skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ContentItem {
    pub fn new(id: impl Into<String>, html: impl Into<String>, metadata: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            html: html.into(),
            metadata,
            base_url: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Render a canonical page: section markup joined, SEO fields as metadata
    #[must_use]
    pub fn from_page(page: &PageContent) -> Self {
        let html = page
            .sections
            .iter()
            .map(|section| section.data.raw_html.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            id: page.slug.clone(),
            html,
            metadata: serde_json::json!({
                "title": page.title,
                "description": page.description,
                "seoTitle": page.seo_title,
                "seoDescription": page.seo_description,
                "openGraphImage": page.open_graph_image,
            }),
            base_url: None,
        }
    }
}

/// An image reference of one content item, resolved to its optimized asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedAsset {
    pub content_id: String,
    pub source: AssetSource,
    pub url: String,
    /// Width descriptor from a `srcset` candidate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_width: Option<u32>,
    /// Fingerprint shared by every reference to the same URL
    pub hash: String,
    pub image: ImageAsset,
}

/// Extraction result with per-image failures kept apart
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutcome {
    pub assets: Vec<ExtractedAsset>,
    pub failures: Vec<AssetFailure>,
    /// Unique URLs served from the manifest without a download
    pub reused: usize,
}
