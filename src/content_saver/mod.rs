//! Persistence of the canonical content tree.

pub mod atomic;
pub mod writer;

pub use atomic::{write_atomic, write_json_atomic};
pub use writer::{
    ContentWriter, INDEX_FILE, IndexEntry, SITE_MAP_FILE, SUMMARY_FILE, SiteMapEntry,
    TransformationSummary,
};
