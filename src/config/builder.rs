//! Type-safe builder for `MigrationConfig` using the typestate pattern
//!
//! This module provides a fluent builder interface with compile-time validation
//! ensuring that the site URL and content directory are set before building.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::time::Duration;

use super::types::{ApiCredentials, MigrationConfig};
use crate::error::{MigrateError, MigrateResult};
use crate::utils::is_valid_url;

// Type states for the builder
pub struct WithSiteUrl;
pub struct Complete;

pub struct MigrationConfigBuilder<State = ()> {
    inner: MigrationConfig,
    _phantom: PhantomData<State>,
}

impl MigrationConfig {
    /// Create a builder for configuring a `MigrationConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> MigrationConfigBuilder<()> {
        MigrationConfigBuilder {
            inner: MigrationConfig::default(),
            _phantom: PhantomData,
        }
    }

    /// Build a configuration from process environment variables
    ///
    /// Reads `SITE_URL` (required), `CONTENT_DIR`, `ASSETS_DIR`, `SITEMAP_URL`,
    /// `CMS_API_TOKEN`, `CMS_SITE_ID` and `CMS_API_BASE_URL`. API credentials are
    /// only set when both token and site id are present and non-empty.
    pub fn from_env() -> MigrateResult<MigrationConfig> {
        let site_url = env_var("SITE_URL")
            .ok_or_else(|| MigrateError::Config("SITE_URL is not set".to_string()))?;
        let content_dir = env_var("CONTENT_DIR").unwrap_or_else(|| "./content".to_string());

        let mut builder = Self::builder().site_url(site_url).content_dir(content_dir);

        if let Some(assets_dir) = env_var("ASSETS_DIR") {
            builder = builder.assets_dir(assets_dir);
        }
        if let Some(sitemap_url) = env_var("SITEMAP_URL") {
            builder = builder.sitemap_url(sitemap_url);
        }
        if let (Some(token), Some(site_id)) = (env_var("CMS_API_TOKEN"), env_var("CMS_SITE_ID")) {
            let mut credentials = ApiCredentials::new(token, site_id);
            if let Some(base_url) = env_var("CMS_API_BASE_URL") {
                credentials = credentials.with_base_url(base_url);
            }
            builder = builder.api_credentials(credentials);
        } else {
            log::info!("CMS_API_TOKEN or CMS_SITE_ID not set, content API will run in mock mode");
        }

        builder.build()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl MigrationConfigBuilder<()> {
    pub fn site_url(mut self, url: impl Into<String>) -> MigrationConfigBuilder<WithSiteUrl> {
        self.inner.site_url = url.into();
        MigrationConfigBuilder {
            inner: self.inner,
            _phantom: PhantomData,
        }
    }
}

impl MigrationConfigBuilder<WithSiteUrl> {
    pub fn content_dir(mut self, dir: impl Into<PathBuf>) -> MigrationConfigBuilder<Complete> {
        self.inner.content_dir = dir.into();
        MigrationConfigBuilder {
            inner: self.inner,
            _phantom: PhantomData,
        }
    }
}

impl<State> MigrationConfigBuilder<State> {
    #[must_use]
    pub fn sitemap_url(mut self, url: impl Into<String>) -> Self {
        self.inner.sitemap_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.inner.assets_dir = dir.into();
        self
    }

    #[must_use]
    pub fn public_assets_path(mut self, path: impl Into<String>) -> Self {
        self.inner.public_assets_path = path.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.inner.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn crawl_delay(mut self, delay: Duration) -> Self {
        self.inner.crawl_delay = delay;
        self
    }

    #[must_use]
    pub fn image_sizes(mut self, sizes: Vec<u32>) -> Self {
        self.inner.image_sizes = sizes;
        self
    }

    #[must_use]
    pub fn image_formats(mut self, formats: Vec<String>) -> Self {
        self.inner.image_formats = formats;
        self
    }

    #[must_use]
    pub fn allowed_image_domains(mut self, domains: Vec<String>) -> Self {
        self.inner.allowed_image_domains = domains;
        self
    }

    #[must_use]
    pub fn image_extensions(mut self, extensions: Vec<String>) -> Self {
        self.inner.image_extensions = extensions;
        self
    }

    #[must_use]
    pub fn batch_size(mut self, size: usize) -> Self {
        self.inner.batch_size = size;
        self
    }

    #[must_use]
    pub fn batch_delay(mut self, delay: Duration) -> Self {
        self.inner.batch_delay = delay;
        self
    }

    #[must_use]
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.inner.cache_ttl = ttl;
        self
    }

    #[must_use]
    pub fn cache_sweep_interval(mut self, interval: Duration) -> Self {
        self.inner.cache_sweep_interval = interval;
        self
    }

    #[must_use]
    pub fn api_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.inner.api = Some(credentials);
        self
    }
}

impl MigrationConfigBuilder<Complete> {
    /// Validate and produce the configuration
    ///
    /// # Errors
    ///
    /// Returns `MigrateError::Config` when the site URL is not an http(s) URL,
    /// when no image sizes or formats are configured, or when the batch size is zero.
    pub fn build(self) -> MigrateResult<MigrationConfig> {
        let mut config = self.inner;
        config.site_url = config.site_url.trim().to_string();

        if !is_valid_url(&config.site_url) {
            return Err(MigrateError::Config(format!(
                "site_url must be an absolute http(s) URL, got '{}'",
                config.site_url
            )));
        }
        if config.image_sizes.is_empty() {
            return Err(MigrateError::Config("image_sizes must not be empty".to_string()));
        }
        if config.image_formats.is_empty() {
            return Err(MigrateError::Config("image_formats must not be empty".to_string()));
        }
        if config.batch_size == 0 {
            return Err(MigrateError::Config("batch_size must be at least 1".to_string()));
        }

        config.image_sizes.sort_unstable();
        config.image_sizes.dedup();
        config.image_formats = config
            .image_formats
            .into_iter()
            .map(|f| f.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        Ok(config)
    }
}
