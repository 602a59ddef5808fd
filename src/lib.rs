pub mod asset_extractor;
pub mod cache;
pub mod cms_client;
pub mod config;
pub mod content_saver;
pub mod error;
pub mod image_optimizer;
pub mod page_scraper;
pub mod pipeline;
pub mod sitemap;
pub mod transform;
pub mod utils;
pub mod validate;

pub use asset_extractor::{
    AssetExtractor, AssetStats, ContentItem, ExtractedAsset, ExtractorConfig, render_markdown_report,
};
pub use cache::{CacheStats, ContentCache, PageCache, TrackedCache};
pub use cms_client::{ApiOutcome, CmsClient, FallbackReason};
pub use config::{ApiCredentials, MigrationConfig, MigrationConfigBuilder};
pub use content_saver::ContentWriter;
pub use error::{MigrateError, MigrateResult};
pub use image_optimizer::{
    AssetManifest, BatchOutcome, ImageAsset, ImageOptimizer, OptimizerConfig,
    generate_responsive_image_set, get_optimized_image_url,
};
pub use page_scraper::{PageScraper, ScrapedPage, ScrapedSection, SectionType};
pub use pipeline::{MigrationSummary, run_migration};
pub use sitemap::{SitemapParser, SitemapUrlRecord, UrlCategory, categorize_url};
pub use transform::{ContentSection, ContentSectionType, PageContent, TransformedPage, transform_page};
pub use validate::{ValidationIssue, ValidationReport, ValidationResult, generate_report, validate_page};
