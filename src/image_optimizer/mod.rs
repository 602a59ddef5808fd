//! Image download, fingerprinting and responsive variant generation.
//!
//! An image is identified by the fingerprint of its source URL. The
//! optimizer downloads it once, reads its dimensions from the file header,
//! stores the original and one file per (format, width) variant, and
//! records the result in a persisted manifest.

pub mod download;
pub mod fingerprint;
pub mod header;
pub mod manifest;
pub mod optimizer;
pub mod responsive;
pub mod types;

pub use fingerprint::url_fingerprint;
pub use header::{ImageInfo, read_image_info};
pub use manifest::{AssetManifest, MANIFEST_FILENAME};
pub use optimizer::ImageOptimizer;
pub use responsive::{generate_responsive_image_set, get_optimized_image_url};
pub use types::{
    AssetFailure, BatchOutcome, ImageAsset, ImageRequest, OptimizerConfig, ResponsiveImageSet,
};
