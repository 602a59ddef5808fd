//! Aggregate statistics and the Markdown asset report

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

use super::types::ExtractedAsset;

/// Totals over an extracted asset list
///
/// Reference counts (`total_references`, `by_source`) count every entry;
/// image counts (`unique_images`, `by_format`, `total_bytes`, `optimized`)
/// count each hash once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStats {
    pub total_references: usize,
    pub unique_images: usize,
    pub by_source: BTreeMap<String, usize>,
    pub by_format: BTreeMap<String, usize>,
    pub total_bytes: u64,
    pub optimized: usize,
}

impl AssetStats {
    #[must_use]
    pub fn from_assets(assets: &[ExtractedAsset]) -> Self {
        let mut stats = Self {
            total_references: assets.len(),
            ..Self::default()
        };
        let mut seen = HashSet::new();

        for asset in assets {
            *stats
                .by_source
                .entry(asset.source.as_str().to_string())
                .or_insert(0) += 1;

            if !seen.insert(asset.hash.as_str()) {
                continue;
            }
            stats.unique_images += 1;
            let format = asset.image.format.clone().unwrap_or_else(|| "unknown".to_string());
            *stats.by_format.entry(format).or_insert(0) += 1;
            stats.total_bytes += asset.image.size.unwrap_or(0);
            if asset.image.optimized_path.is_some() {
                stats.optimized += 1;
            }
        }

        stats
    }
}

fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Human-readable Markdown summary of an extraction run
#[must_use]
pub fn render_markdown_report(assets: &[ExtractedAsset]) -> String {
    let stats = AssetStats::from_assets(assets);
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "# Asset Extraction Report\n");
    let _ = writeln!(out, "## Summary\n");
    let _ = writeln!(out, "| Metric | Value |");
    let _ = writeln!(out, "|---|---|");
    let _ = writeln!(out, "| References | {} |", stats.total_references);
    let _ = writeln!(out, "| Unique images | {} |", stats.unique_images);
    let _ = writeln!(out, "| Optimized | {} |", stats.optimized);
    let _ = writeln!(out, "| Total size | {} |", human_bytes(stats.total_bytes));

    let _ = writeln!(out, "\n## By source\n");
    for (source, count) in &stats.by_source {
        let _ = writeln!(out, "- {source}: {count}");
    }

    let _ = writeln!(out, "\n## By format\n");
    for (format, count) in &stats.by_format {
        let _ = writeln!(out, "- {format}: {count}");
    }

    let _ = writeln!(out, "\n## Images\n");
    let _ = writeln!(out, "| Content | Source | URL | Size | Dimensions | Optimized |");
    let _ = writeln!(out, "|---|---|---|---|---|---|");
    for asset in assets {
        let image = &asset.image;
        let dimensions = match (image.width, image.height) {
            (Some(w), Some(h)) => format!("{w}×{h}"),
            _ => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            asset.content_id,
            asset.source.as_str(),
            asset.url,
            image.size.map_or_else(|| "-".to_string(), human_bytes),
            dimensions,
            image.optimized_path.as_deref().unwrap_or("-"),
        );
    }

    out
}
