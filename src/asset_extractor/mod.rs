//! Image discovery across content and optimization of what is found.
//!
//! Content items are scanned for `<img src>`, CSS background images,
//! `srcset` candidates and image-looking strings in their metadata. URLs
//! that pass the allowlist are deduplicated across all items and optimized
//! once each.

pub mod extractor;
pub mod filter;
pub mod patterns;
pub mod report;
pub mod types;

pub use extractor::{AssetExtractor, DiscoveredReference};
pub use filter::ExtractorConfig;
pub use patterns::{AssetSource, SrcSetEntry, find_in_html, find_in_metadata, parse_srcset};
pub use report::{AssetStats, render_markdown_report};
pub use types::{ContentItem, ExtractedAsset, ExtractionOutcome};
