//! End-to-end migration run
//!
//! sitemap → scrape → transform → validate → persist → assets → manifest.
//! The content tree is only written when validation has no blocking errors;
//! asset optimization runs either way.

use std::sync::Arc;

use crate::asset_extractor::{AssetExtractor, AssetStats, ContentItem, render_markdown_report};
use crate::cms_client::CmsClient;
use crate::config::MigrationConfig;
use crate::content_saver::{ContentWriter, write_atomic};
use crate::error::MigrateResult;
use crate::image_optimizer::{AssetFailure, AssetManifest, ImageOptimizer};
use crate::page_scraper::{PageScraper, ScrapedPage};
use crate::sitemap::{SitemapParser, high_priority_urls};
use crate::transform::transform_pages;
use crate::validate::{ValidationReport, generate_report};

/// Markdown asset report written next to the manifest
pub const ASSET_REPORT_FILE: &str = "asset-report.md";

/// What a migration run produced
#[derive(Debug, Clone)]
pub struct MigrationSummary {
    pub pages_scraped: usize,
    pub validation: ValidationReport,
    /// False when validation blocked publication
    pub content_written: bool,
    pub asset_stats: AssetStats,
    pub asset_failures: Vec<AssetFailure>,
    /// Unique images served from the persisted manifest
    pub assets_reused: usize,
}

impl MigrationSummary {
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.validation.is_blocking()
    }
}

/// Scrape the sitemap's priority URLs, or crawl from the root when the
/// sitemap is unavailable or empty
async fn scrape_site(config: &MigrationConfig, scraper: &PageScraper) -> MigrateResult<Vec<ScrapedPage>> {
    let sitemap_url = config.sitemap_url();
    let parser = SitemapParser::with_timeout(config.request_timeout())?;
    let targets: Vec<String> = match parser.fetch(&sitemap_url).await {
        Ok(records) => high_priority_urls(&records).into_iter().map(|r| r.url).collect(),
        Err(e) => {
            log::warn!("Sitemap {sitemap_url} unavailable, crawling from root: {e}");
            Vec::new()
        }
    };

    if targets.is_empty() {
        return scraper.scrape_website(config.site_url()).await;
    }

    log::info!("Scraping {} priority URLs from sitemap", targets.len());
    let mut pages = vec![scraper.scrape_page(config.site_url()).await?];
    pages.extend(scraper.scrape_urls(&targets).await);
    Ok(pages)
}

/// Content items from live CMS collections; nothing in mock mode
async fn cms_items(config: &MigrationConfig) -> MigrateResult<Vec<ContentItem>> {
    if config.api().is_none() {
        return Ok(Vec::new());
    }
    let client = CmsClient::from_config(config)?;
    let collections = client.list_collections().await;
    if !collections.is_live() {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    for collection in collections.into_data() {
        let listed = client.list_items(&collection.id).await;
        if !listed.is_live() {
            continue;
        }
        items.extend(listed.into_data().into_iter().map(|item| {
            let metadata = serde_json::to_value(&item.field_data).unwrap_or_default();
            ContentItem::new(item.id, String::new(), metadata)
        }));
    }
    log::info!("Loaded {} CMS items for asset extraction", items.len());
    Ok(items)
}

/// Run the full migration described by `config`
pub async fn run_migration(config: &MigrationConfig) -> MigrateResult<MigrationSummary> {
    let scraper = PageScraper::from_config(config)?;
    let scraped = scrape_site(config, &scraper).await?;

    let transformed = transform_pages(&scraped);
    let contents: Vec<_> = transformed.iter().map(|page| page.content.clone()).collect();

    let validation = generate_report(&contents);
    validation.log_summary();

    let content_written = if validation.is_blocking() {
        log::error!("Validation failed, content tree not written");
        false
    } else {
        ContentWriter::from_config(config).write_all(&transformed).await?;
        true
    };

    let assets_dir = config.assets_dir();
    let manifest = AssetManifest::load(assets_dir).await;
    let optimizer = Arc::new(ImageOptimizer::from_config(config)?.with_manifest(&manifest));
    let extractor = AssetExtractor::new(config.extractor_config(), Arc::clone(&optimizer));

    let mut items: Vec<ContentItem> = transformed
        .iter()
        .map(|page| ContentItem::from_page(&page.content).with_base_url(&page.source_url))
        .collect();
    items.extend(cms_items(config).await?);
    let outcome = extractor.extract_from_content(&items).await;

    optimizer.manifest().save(assets_dir).await?;
    let report = render_markdown_report(&outcome.assets);
    write_atomic(&assets_dir.join(ASSET_REPORT_FILE), report.as_bytes()).await?;

    Ok(MigrationSummary {
        pages_scraped: scraped.len(),
        validation,
        content_written,
        asset_stats: AssetStats::from_assets(&outcome.assets),
        asset_failures: outcome.failures,
        assets_reused: outcome.reused,
    })
}
