//! Core configuration types for site migration
//!
//! This module contains the main `MigrationConfig` struct and the headless
//! API credentials that switch the external content client out of mock mode.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::{
    CMS_ASSET_DOMAINS, DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE, DEFAULT_CACHE_SWEEP_INTERVAL,
    DEFAULT_CACHE_TTL, DEFAULT_CRAWL_DELAY, DEFAULT_IMAGE_EXTENSIONS, DEFAULT_IMAGE_FORMATS,
    DEFAULT_IMAGE_SIZES, DEFAULT_REQUEST_TIMEOUT,
};

/// Default base URL of the headless content API
pub const DEFAULT_API_BASE_URL: &str = "https://api.webflow.com/v2";

/// Bearer credential and site identifier for the headless content API
///
/// Both values are required; if either is missing the client runs in mock mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiCredentials {
    pub token: String,
    pub site_id: String,
    pub base_url: String,
}

impl ApiCredentials {
    #[must_use]
    pub fn new(token: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            site_id: site_id.into(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API host (self-hosted proxies, tests)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Main configuration struct for migration runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Root URL of the site being migrated; crawls start here
    pub(crate) site_url: String,
    /// Sitemap location; defaults to `{site_url}/sitemap.xml`
    pub(crate) sitemap_url: Option<String>,
    /// Directory receiving the canonical content tree
    pub(crate) content_dir: PathBuf,
    /// Directory receiving original and optimized images plus the manifest
    pub(crate) assets_dir: PathBuf,
    /// Public URL prefix under which `assets_dir` is served
    pub(crate) public_assets_path: String,
    pub(crate) request_timeout: Duration,
    pub(crate) crawl_delay: Duration,
    pub(crate) image_sizes: Vec<u32>,
    pub(crate) image_formats: Vec<String>,
    /// Hostnames images may come from; empty allows every host
    pub(crate) allowed_image_domains: Vec<String>,
    pub(crate) image_extensions: Vec<String>,
    pub(crate) cms_asset_domains: Vec<String>,
    pub(crate) batch_size: usize,
    pub(crate) batch_delay: Duration,
    pub(crate) cache_ttl: Duration,
    pub(crate) cache_sweep_interval: Duration,
    pub(crate) api: Option<ApiCredentials>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            sitemap_url: None,
            content_dir: PathBuf::from("./content"),
            assets_dir: PathBuf::from("./public/images/optimized"),
            public_assets_path: "/images/optimized".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            crawl_delay: DEFAULT_CRAWL_DELAY,
            image_sizes: DEFAULT_IMAGE_SIZES.to_vec(),
            image_formats: DEFAULT_IMAGE_FORMATS.iter().map(ToString::to_string).collect(),
            allowed_image_domains: Vec::new(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            cms_asset_domains: CMS_ASSET_DOMAINS.iter().map(ToString::to_string).collect(),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_sweep_interval: DEFAULT_CACHE_SWEEP_INTERVAL,
            api: None,
        }
    }
}
