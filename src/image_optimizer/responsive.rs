//! Responsive `<img>` attributes for optimized assets

use super::types::{ImageAsset, ResponsiveImageSet};
use crate::error::{MigrateError, MigrateResult};

/// Breakpoints of the `sizes` attribute, widest first
const SIZE_BREAKPOINTS: [u32; 4] = [1280, 1024, 768, 640];

/// Optimized path without its extension
fn variant_base(optimized_path: &str) -> &str {
    let file_start = optimized_path.rfind('/').map_or(0, |i| i + 1);
    match optimized_path[file_start..].rfind('.') {
        Some(dot) => &optimized_path[..file_start + dot],
        None => optimized_path,
    }
}

/// Public URL of one variant of `asset`
///
/// Without an optimized path the source URL is returned unchanged, so a
/// failed optimization degrades to hot-linking the original.
#[must_use]
pub fn get_optimized_image_url(asset: &ImageAsset, width: Option<u32>, format: &str) -> String {
    let Some(optimized) = asset.optimized_path.as_deref() else {
        return asset.url.clone();
    };
    let base = variant_base(optimized);
    match width {
        Some(width) => format!("{base}-{width}w.{format}"),
        None => format!("{base}.{format}"),
    }
}

/// Build `srcset` and `sizes` for an asset over the configured widths
///
/// Only widths not larger than the source are used. Breakpoints appear in
/// `sizes` only when a variant of that width exists.
pub fn generate_responsive_image_set(
    asset: &ImageAsset,
    sizes: &[u32],
    format: &str,
) -> MigrateResult<ResponsiveImageSet> {
    let (Some(width), Some(height), Some(_)) = (asset.width, asset.height, asset.optimized_path.as_ref())
    else {
        return Err(MigrateError::MissingImageData(asset.url.clone()));
    };

    let available: Vec<u32> = sizes.iter().copied().filter(|&size| size <= width).collect();

    let src_set = available
        .iter()
        .map(|&size| format!("{} {size}w", get_optimized_image_url(asset, Some(size), format)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut size_hints: Vec<String> = SIZE_BREAKPOINTS
        .iter()
        .filter(|breakpoint| available.contains(breakpoint))
        .map(|breakpoint| format!("(min-width: {breakpoint}px) {breakpoint}px"))
        .collect();
    size_hints.push("100vw".to_string());

    Ok(ResponsiveImageSet {
        src: get_optimized_image_url(asset, None, format),
        src_set,
        sizes: size_hints.join(", "),
        width,
        height,
    })
}
