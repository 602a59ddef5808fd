//! Type definitions for image optimization

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::utils::{
    DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE, DEFAULT_IMAGE_FORMATS, DEFAULT_IMAGE_SIZES,
    DEFAULT_REQUEST_TIMEOUT,
};

/// Optimizer settings
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Directory the original and variant files are written to
    pub output_dir: PathBuf,
    /// Public URL prefix under which `output_dir` is served
    pub public_path: String,
    /// Responsive widths, ascending
    pub sizes: Vec<u32>,
    /// Output formats, primary first
    pub formats: Vec<String>,
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./public/images/optimized"),
            public_path: "/images/optimized".to_string(),
            sizes: DEFAULT_IMAGE_SIZES.to_vec(),
            formats: DEFAULT_IMAGE_FORMATS.iter().map(ToString::to_string).collect(),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl OptimizerConfig {
    /// First configured format, `jpg` if none is configured
    #[must_use]
    pub fn primary_format(&self) -> &str {
        self.formats.first().map_or("jpg", String::as_str)
    }
}

/// An optimized image, keyed by the fingerprint of its source URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Size of the original in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Filesystem path of the stored original
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    /// Public path of the primary-format variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimized_path: Option<String>,
    pub hash: String,
}

/// `srcset`/`sizes` pair for a responsive `<img>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveImageSet {
    pub src: String,
    pub src_set: String,
    pub sizes: String,
    pub width: u32,
    pub height: u32,
}

/// Error information for a failed image in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFailure {
    pub url: String,
    pub error: String,
}

/// Result of a batch run with success and failure tracking
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub assets: Vec<ImageAsset>,
    pub failures: Vec<AssetFailure>,
}

impl BatchOutcome {
    /// Total number of images processed
    #[must_use]
    pub fn total(&self) -> usize {
        self.assets.len() + self.failures.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Get failure rate as a ratio between 0.0 and 1.0
    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.failures.len() as f64 / total as f64
        }
    }
}

/// One image to optimize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub url: String,
    pub alt: Option<String>,
}

impl ImageRequest {
    pub fn new(url: impl Into<String>, alt: Option<String>) -> Self {
        Self {
            url: url.into(),
            alt,
        }
    }
}
