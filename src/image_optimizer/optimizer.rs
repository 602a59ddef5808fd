//! Download, fingerprint and variant generation for single images
//!
//! Variants are byte copies of the original named after the width and
//! format they stand for. A real encoder can replace the copy step without
//! changing any file name or manifest field.

use dashmap::DashMap;
use futures::future::join_all;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::download::download_image;
use super::fingerprint::url_fingerprint;
use super::header::read_image_info;
use super::manifest::AssetManifest;
use super::responsive::generate_responsive_image_set;
use super::types::{
    AssetFailure, BatchOutcome, ImageAsset, ImageRequest, OptimizerConfig, ResponsiveImageSet,
};
use crate::config::MigrationConfig;
use crate::content_saver::write_atomic;
use crate::error::{MigrateError, MigrateResult};
use crate::utils::CHROME_USER_AGENT;

/// Image optimizer with an in-memory cache keyed by URL fingerprint
///
/// Concurrent requests for the same URL share one download: the first
/// caller runs it, the others wait on the same cell.
pub struct ImageOptimizer {
    client: Client,
    config: OptimizerConfig,
    cache: DashMap<String, ImageAsset>,
    in_flight: DashMap<String, Arc<OnceCell<ImageAsset>>>,
}

impl ImageOptimizer {
    pub fn new(config: OptimizerConfig) -> MigrateResult<Self> {
        let client = Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| MigrateError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            cache: DashMap::new(),
            in_flight: DashMap::new(),
        })
    }

    pub fn from_config(config: &MigrationConfig) -> MigrateResult<Self> {
        Self::new(config.optimizer_config())
    }

    /// Seed the cache from a persisted manifest
    ///
    /// Entries whose stored hash does not match their URL are ignored.
    #[must_use]
    pub fn with_manifest(self, manifest: &AssetManifest) -> Self {
        for (url, asset) in &manifest.assets {
            let hash = url_fingerprint(url);
            if asset.hash == hash {
                self.cache.insert(hash, asset.clone());
            }
        }
        log::debug!("Seeded optimizer cache with {} manifest entries", self.cache.len());
        self
    }

    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Cached result for `url`, if it has been optimized already
    #[must_use]
    pub fn cached(&self, url: &str) -> Option<ImageAsset> {
        self.cache.get(&url_fingerprint(url)).map(|entry| entry.clone())
    }

    /// Snapshot of every cached asset as a manifest
    #[must_use]
    pub fn manifest(&self) -> AssetManifest {
        let mut manifest = AssetManifest::empty();
        for entry in &self.cache {
            manifest.insert(entry.value().clone());
        }
        manifest
    }

    /// Optimize one image, reusing the cached result when present
    pub async fn download_and_optimize(&self, url: &str, alt: Option<&str>) -> MigrateResult<ImageAsset> {
        let hash = url_fingerprint(url);
        if let Some(hit) = self.cache.get(&hash) {
            log::debug!("Image cache hit: {url}");
            return Ok(hit.clone());
        }

        let cell = Arc::clone(
            &*self
                .in_flight
                .entry(hash.clone())
                .or_insert_with(|| Arc::new(OnceCell::new())),
        );
        // Another caller may have finished between the cache check and here
        if let Some(hit) = self.cache.get(&hash) {
            return Ok(hit.clone());
        }

        let result = cell
            .get_or_try_init(|| self.fetch_and_store(url, alt, &hash))
            .await
            .cloned();

        if let Ok(asset) = &result {
            self.cache.insert(hash.clone(), asset.clone());
        }
        // Only this caller's cell may go, and after a failure only once no
        // other caller is still waiting to retry it
        let succeeded = result.is_ok();
        self.in_flight.remove_if(&hash, |_, current| {
            Arc::ptr_eq(current, &cell) && (succeeded || Arc::strong_count(current) == 2)
        });
        result
    }

    async fn fetch_and_store(&self, url: &str, alt: Option<&str>, hash: &str) -> MigrateResult<ImageAsset> {
        let bytes = download_image(&self.client, url).await?;
        let info = read_image_info(&bytes);

        let original = self
            .config
            .output_dir
            .join(format!("{hash}-original.{}", info.format));
        write_atomic(&original, &bytes).await?;
        self.write_variants(hash, info.width, &bytes).await?;

        let public_path = self.config.public_path.trim_end_matches('/');
        log::debug!("Optimized {url} -> {hash} ({}x{} {})", info.width, info.height, info.format);

        Ok(ImageAsset {
            url: url.to_string(),
            alt: alt.map(ToString::to_string),
            width: Some(info.width),
            height: Some(info.height),
            format: Some(info.format.to_string()),
            size: Some(bytes.len() as u64),
            local_path: Some(original.display().to_string()),
            optimized_path: Some(format!("{public_path}/{hash}.{}", self.config.primary_format())),
            hash: hash.to_string(),
        })
    }

    /// Write `{hash}-{w}w.{fmt}` for every size up to `source_width` and `{hash}.{fmt}`, per format
    async fn write_variants(&self, hash: &str, source_width: u32, bytes: &[u8]) -> MigrateResult<()> {
        let dir: &Path = &self.config.output_dir;
        for format in &self.config.formats {
            for size in self.config.sizes.iter().filter(|&&size| size <= source_width) {
                tokio::fs::write(dir.join(format!("{hash}-{size}w.{format}")), bytes).await?;
            }
            tokio::fs::write(dir.join(format!("{hash}.{format}")), bytes).await?;
        }
        Ok(())
    }

    /// Responsive attributes over the configured sizes in the primary format
    pub fn responsive_image_set(&self, asset: &ImageAsset) -> MigrateResult<ResponsiveImageSet> {
        generate_responsive_image_set(asset, &self.config.sizes, self.config.primary_format())
    }

    /// Optimize images in chunks of `batch_size`, pausing between chunks
    ///
    /// A failed image is logged and recorded; it never stops the batch.
    pub async fn process_batch(&self, requests: &[ImageRequest]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let chunk_size = self.config.batch_size.max(1);

        for (index, chunk) in requests.chunks(chunk_size).enumerate() {
            if index > 0 && !self.config.batch_delay.is_zero() {
                tokio::time::sleep(self.config.batch_delay).await;
            }

            let results = join_all(chunk.iter().map(|request| async move {
                let result = self
                    .download_and_optimize(&request.url, request.alt.as_deref())
                    .await;
                (request, result)
            }))
            .await;

            for (request, result) in results {
                match result {
                    Ok(asset) => outcome.assets.push(asset),
                    Err(e) => {
                        log::warn!("Image optimization failed for {}: {e}", request.url);
                        outcome.failures.push(AssetFailure {
                            url: request.url.clone(),
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        log::info!(
            "Optimized {} of {} images ({} failed)",
            outcome.assets.len(),
            outcome.total(),
            outcome.failures.len()
        );
        outcome
    }
}
