//! Persisted asset manifest
//!
//! Maps source URL to its [`ImageAsset`] so later runs can reuse optimized
//! images without downloading them again. Stored as
//! `{assets_dir}/asset-manifest.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::types::ImageAsset;
use crate::content_saver::write_json_atomic;
use crate::error::MigrateResult;
use crate::utils::MANIFEST_VERSION;

pub const MANIFEST_FILENAME: &str = "asset-manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetManifest {
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub assets: BTreeMap<String, ImageAsset>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::empty()
    }
}

impl AssetManifest {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            generated_at: Utc::now(),
            assets: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn path(assets_dir: &Path) -> PathBuf {
        assets_dir.join(MANIFEST_FILENAME)
    }

    /// Load from the assets directory
    ///
    /// A missing, unreadable or corrupt file, or one written with another
    /// version, yields an empty manifest.
    pub async fn load(assets_dir: &Path) -> Self {
        let path = Self::path(assets_dir);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(_) => return Self::empty(),
        };
        let manifest: Self = match serde_json::from_str(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                log::warn!("Ignoring corrupt asset manifest {}: {e}", path.display());
                return Self::empty();
            }
        };
        if manifest.version != MANIFEST_VERSION {
            log::info!(
                "Asset manifest version {} does not match {MANIFEST_VERSION}, starting fresh",
                manifest.version
            );
            return Self::empty();
        }
        manifest
    }

    /// Save atomically, stamping `generated_at`
    pub async fn save(&mut self, assets_dir: &Path) -> MigrateResult<()> {
        self.generated_at = Utc::now();
        write_json_atomic(&Self::path(assets_dir), self).await
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<&ImageAsset> {
        self.assets.get(url)
    }

    pub fn insert(&mut self, asset: ImageAsset) {
        self.assets.insert(asset.url.clone(), asset);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
