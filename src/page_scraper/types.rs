//! Scrape-time page representation
//!
//! A [`ScrapedPage`] is produced once per fetch and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Structural role inferred for a scraped section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Hero,
    Navigation,
    Footer,
    Header,
    Contact,
    Gallery,
    Testimonial,
    Features,
    About,
    Content,
    Section,
}

impl SectionType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Navigation => "navigation",
            Self::Footer => "footer",
            Self::Header => "header",
            Self::Contact => "contact",
            Self::Gallery => "gallery",
            Self::Testimonial => "testimonial",
            Self::Features => "features",
            Self::About => "about",
            Self::Content => "content",
            Self::Section => "section",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the section tree
///
/// `children` are built only from the node's own direct child elements, so
/// no subtree is shared between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedSection {
    pub id: String,
    pub inferred_type: SectionType,
    pub inner_html: String,
    pub text: String,
    pub css_classes: Vec<String>,
    /// Declarations of the `style` attribute keyed by lowercase property name
    pub inline_styles: BTreeMap<String, String>,
    pub children: Vec<ScrapedSection>,
}

impl ScrapedSection {
    /// Number of nodes in this subtree, including `self`
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Kind of asset referenced by a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Font,
    Css,
    Js,
}

/// Declared `<img>` dimensions; either side may be missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDimensions {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Asset reference discovered on a page, URL already absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedAsset {
    pub kind: AssetKind,
    pub url: String,
    pub local_path: Option<String>,
    pub alt: Option<String>,
    pub dimensions: Option<AssetDimensions>,
}

/// Head metadata; strings default to empty, Open Graph fields stay optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical_url: String,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,
    pub og_url: Option<String>,
}

/// A fetched and parsed page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedPage {
    pub url: String,
    pub title: String,
    pub description: String,
    pub raw_html: String,
    pub sections: Vec<ScrapedSection>,
    pub assets: Vec<ScrapedAsset>,
    pub metadata: PageMetadata,
    pub scraped_at: DateTime<Utc>,
}
