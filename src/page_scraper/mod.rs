//! Page fetching and structural extraction.
//!
//! This module fetches pages over HTTP and parses their markup once into a
//! [`ScrapedPage`]: metadata, a hierarchical section tree classified by
//! heuristic rules, and a flat list of referenced assets.

// Sub-modules
pub mod assets;
pub mod crawler;
pub mod links;
pub mod metadata;
pub mod section_rules;
pub mod sections;
pub mod types;

// Re-exports for public API
pub use assets::{dedupe_assets, extract_assets};
pub use crawler::PageScraper;
pub use links::extract_navigation_links;
pub use metadata::extract_metadata;
pub use section_rules::{SECTION_RULES, SectionRule, infer_section_type};
pub use sections::{extract_sections, parse_inline_styles};
pub use types::{
    AssetDimensions, AssetKind, PageMetadata, ScrapedAsset, ScrapedPage, ScrapedSection,
    SectionType,
};
