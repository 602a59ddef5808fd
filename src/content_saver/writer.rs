//! Content tree persistence
//!
//! Layout under the content directory:
//!
//! ```text
//! {subdir}/{slug}.json        one canonical page
//! {subdir}/index.json         list of the pages in that directory
//! site-map.json               slug -> title, category, relative path
//! transformation-summary.json counts, section histogram, palette
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::atomic::write_json_atomic;
use crate::config::MigrationConfig;
use crate::error::MigrateResult;
use crate::sitemap::UrlCategory;
use crate::transform::{ContentSection, PageContent, TransformedPage, extract_palette};

pub const SITE_MAP_FILE: &str = "site-map.json";
pub const SUMMARY_FILE: &str = "transformation-summary.json";
pub const INDEX_FILE: &str = "index.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMapEntry {
    pub title: String,
    pub category: UrlCategory,
    /// Path of the page file relative to the content directory
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub slug: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationSummary {
    pub generated_at: DateTime<Utc>,
    pub total_pages: usize,
    pub pages_by_category: BTreeMap<UrlCategory, usize>,
    /// Count of every section in the tree, nested ones included
    pub section_types: BTreeMap<String, usize>,
    pub palette: Vec<String>,
}

/// Writes transformed pages into the content tree
#[derive(Debug, Clone)]
pub struct ContentWriter {
    content_dir: PathBuf,
}

fn count_section_types(section: &ContentSection, counts: &mut BTreeMap<String, usize>) {
    *counts.entry(section.section_type.to_string()).or_insert(0) += 1;
    for child in &section.data.children {
        count_section_types(child, counts);
    }
}

impl ContentWriter {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &MigrationConfig) -> Self {
        Self::new(config.content_dir())
    }

    #[must_use]
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    fn relative_path(page: &TransformedPage) -> String {
        format!("{}/{}.json", page.category.content_subdir(), page.content.slug)
    }

    /// Absolute location of a page's JSON file
    #[must_use]
    pub fn page_path(&self, page: &TransformedPage) -> PathBuf {
        self.content_dir.join(Self::relative_path(page))
    }

    pub async fn write_page(&self, page: &TransformedPage) -> MigrateResult<PathBuf> {
        let path = self.page_path(page);
        write_json_atomic(&path, &page.content).await?;
        log::debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Write every page plus the site map, per-directory indexes and the summary
    ///
    /// Returns the paths of the page files in input order.
    pub async fn write_all(&self, pages: &[TransformedPage]) -> MigrateResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(pages.len());
        let mut site_map: BTreeMap<String, SiteMapEntry> = BTreeMap::new();
        let mut indexes: BTreeMap<&'static str, Vec<IndexEntry>> = BTreeMap::new();
        let mut pages_by_category: BTreeMap<UrlCategory, usize> = BTreeMap::new();
        let mut section_types: BTreeMap<String, usize> = BTreeMap::new();

        for page in pages {
            written.push(self.write_page(page).await?);

            let content = &page.content;
            site_map.insert(
                content.slug.clone(),
                SiteMapEntry {
                    title: content.title.clone(),
                    category: page.category,
                    path: Self::relative_path(page),
                },
            );
            indexes
                .entry(page.category.content_subdir())
                .or_default()
                .push(IndexEntry {
                    slug: content.slug.clone(),
                    title: content.title.clone(),
                    description: content.description.clone(),
                });
            *pages_by_category.entry(page.category).or_insert(0) += 1;
            for section in &content.sections {
                count_section_types(section, &mut section_types);
            }
        }

        for (subdir, entries) in &indexes {
            write_json_atomic(&self.content_dir.join(subdir).join(INDEX_FILE), entries).await?;
        }
        write_json_atomic(&self.content_dir.join(SITE_MAP_FILE), &site_map).await?;

        let contents: Vec<PageContent> = pages.iter().map(|p| p.content.clone()).collect();
        let summary = TransformationSummary {
            generated_at: Utc::now(),
            total_pages: pages.len(),
            pages_by_category,
            section_types,
            palette: extract_palette(&contents),
        };
        write_json_atomic(&self.content_dir.join(SUMMARY_FILE), &summary).await?;

        log::info!(
            "Wrote {} pages to {}",
            written.len(),
            self.content_dir.display()
        );
        Ok(written)
    }
}
