//! Shared configuration constants for sitemigrate
//!
//! This module contains default values and configuration constants used
//! throughout the pipeline to ensure consistency and avoid magic numbers.

use std::time::Duration;

/// Chrome user agent string sent with every page, sitemap and asset fetch
///
/// Marketing sites frequently serve degraded markup (or a bot wall) to
/// unknown clients, so fetches identify as a current stable Chrome.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Per-request deadline for page and sitemap fetches
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Pause between sequential page fetches during a full-site crawl
pub const DEFAULT_CRAWL_DELAY: Duration = Duration::from_secs(1);

/// Default time-to-live for content cache entries (5 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Interval of the background sweep that evicts expired cache entries (10 minutes)
pub const DEFAULT_CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Number of images optimized concurrently within one batch chunk
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Pause between batch chunks so the origin server is not hammered
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(1);

/// Responsive widths generated for every optimized image
pub const DEFAULT_IMAGE_SIZES: [u32; 6] = [320, 640, 768, 1024, 1280, 1920];

/// Output formats generated for every optimized image, primary format first
pub const DEFAULT_IMAGE_FORMATS: [&str; 2] = ["webp", "jpg"];

/// Path extensions accepted as image references
pub const DEFAULT_IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "avif", "svg"];

/// Asset hosts of the headless CMS; their URLs rarely carry a file extension
pub const CMS_ASSET_DOMAINS: [&str; 3] = [
    "uploads-ssl.webflow.com",
    "assets-global.website-files.com",
    "cdn.prod.website-files.com",
];

/// Minimum sitemap priority kept by [`crate::sitemap::filter_by_priority`]
pub const DEFAULT_PRIORITY_THRESHOLD: f32 = 0.5;

/// Version string written into (and required from) the asset manifest
pub const MANIFEST_VERSION: &str = "1.0";

/// Fallback dimensions used when an image header cannot be recognised
pub const FALLBACK_IMAGE_WIDTH: u32 = 800;
pub const FALLBACK_IMAGE_HEIGHT: u32 = 600;
