//! `ScrapedPage` → `PageContent`

use serde::{Deserialize, Serialize};

use super::mapping::transform_section;
use super::model::PageContent;
use super::slug::slug_from_url;
use crate::page_scraper::ScrapedPage;
use crate::sitemap::{UrlCategory, categorize_url};

/// A canonical page together with where it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedPage {
    pub source_url: String,
    pub category: UrlCategory,
    pub content: PageContent,
}

/// Transform one scraped page into the canonical model
///
/// Pure and deterministic. Slug uniqueness is not enforced here.
#[must_use]
pub fn transform_page(page: &ScrapedPage) -> PageContent {
    let metadata = &page.metadata;
    PageContent {
        slug: slug_from_url(&page.url),
        title: page.title.clone(),
        description: page.description.clone(),
        seo_title: metadata.og_title.clone(),
        seo_description: metadata.og_description.clone(),
        open_graph_image: metadata.og_image.clone(),
        sections: page.sections.iter().map(transform_section).collect(),
    }
}

/// Transform a batch of pages, keeping source URL and category alongside
#[must_use]
pub fn transform_pages(pages: &[ScrapedPage]) -> Vec<TransformedPage> {
    let transformed: Vec<TransformedPage> = pages
        .iter()
        .map(|page| TransformedPage {
            source_url: page.url.clone(),
            category: categorize_url(&page.url),
            content: transform_page(page),
        })
        .collect();

    log::info!("Transformed {} pages", transformed.len());
    transformed
}
