//! Getter methods for `MigrationConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::{ApiCredentials, MigrationConfig};
use crate::asset_extractor::ExtractorConfig;
use crate::image_optimizer::OptimizerConfig;

impl MigrationConfig {
    #[must_use]
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// Sitemap location, falling back to `/sitemap.xml` under the site root
    #[must_use]
    pub fn sitemap_url(&self) -> String {
        self.sitemap_url.clone().unwrap_or_else(|| {
            format!("{}/sitemap.xml", self.site_url.trim_end_matches('/'))
        })
    }

    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    #[must_use]
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    #[must_use]
    pub fn public_assets_path(&self) -> &str {
        &self.public_assets_path
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    #[must_use]
    pub fn crawl_delay(&self) -> Duration {
        self.crawl_delay
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    #[must_use]
    pub fn cache_sweep_interval(&self) -> Duration {
        self.cache_sweep_interval
    }

    #[must_use]
    pub fn api(&self) -> Option<&ApiCredentials> {
        self.api.as_ref()
    }

    /// Image optimizer settings derived from this configuration
    #[must_use]
    pub fn optimizer_config(&self) -> OptimizerConfig {
        OptimizerConfig {
            output_dir: PathBuf::from(&self.assets_dir),
            public_path: self.public_assets_path.clone(),
            sizes: self.image_sizes.clone(),
            formats: self.image_formats.clone(),
            batch_size: self.batch_size,
            batch_delay: self.batch_delay,
            request_timeout: self.request_timeout,
        }
    }

    /// Asset discovery filters derived from this configuration
    #[must_use]
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            allowed_domains: self.allowed_image_domains.clone(),
            extensions: self.image_extensions.clone(),
            cms_domains: self.cms_asset_domains.clone(),
        }
    }
}
