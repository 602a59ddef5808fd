//! Sitemap fetching, parsing and URL prioritisation
//!
//! The sitemap gives the crawl its guidance: every `<url>` entry becomes a
//! [`SitemapUrlRecord`] classified into a [`UrlCategory`] by path.

pub mod category;
pub mod parser;
pub mod selection;

pub use category::{UrlCategory, categorize_url};
pub use parser::{SitemapDocument, SitemapParser, SitemapUrlRecord, parse_sitemap_document, parse_sitemap_xml};
pub use selection::{filter_by_priority, group_by_category, high_priority_urls};
