//! Brand palette helpers
//!
//! Colors found in section styling are normalized to `#rrggbb`, named after
//! the nearest entry of a fixed reference table, and expanded into a
//! 50…950 tint/shade scale for the design-token output.

use std::collections::BTreeMap;

use super::model::{ContentSection, PageContent};

/// Reference colors used for naming
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0x00, 0x00, 0x00]),
    ("white", [0xff, 0xff, 0xff]),
    ("gray", [0x6b, 0x72, 0x80]),
    ("slate", [0x64, 0x74, 0x8b]),
    ("red", [0xef, 0x44, 0x44]),
    ("orange", [0xf9, 0x73, 0x16]),
    ("amber", [0xf5, 0x9e, 0x0b]),
    ("yellow", [0xea, 0xb3, 0x08]),
    ("lime", [0x84, 0xcc, 0x16]),
    ("green", [0x22, 0xc5, 0x5e]),
    ("emerald", [0x10, 0xb9, 0x81]),
    ("teal", [0x14, 0xb8, 0xa6]),
    ("cyan", [0x06, 0xb6, 0xd4]),
    ("sky", [0x0e, 0xa5, 0xe9]),
    ("blue", [0x3b, 0x82, 0xf6]),
    ("indigo", [0x63, 0x66, 0xf1]),
    ("violet", [0x8b, 0x5c, 0xf6]),
    ("purple", [0xa8, 0x55, 0xf7]),
    ("fuchsia", [0xd9, 0x46, 0xef]),
    ("pink", [0xec, 0x48, 0x99]),
    ("rose", [0xf4, 0x3f, 0x5e]),
];

/// Scale steps and their mix amount: positive mixes toward white, negative toward black
const SCALE_STEPS: [(u16, f32); 11] = [
    (50, 0.95),
    (100, 0.9),
    (200, 0.75),
    (300, 0.6),
    (400, 0.3),
    (500, 0.0),
    (600, -0.1),
    (700, -0.3),
    (800, -0.45),
    (900, -0.6),
    (950, -0.75),
];

/// Parse `#rgb` / `#rrggbb` (case-insensitive, leading `#` required)
#[must_use]
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(digits.chars()) {
                let v = u8::try_from(c.to_digit(16)?).ok()?;
                *slot = v * 17;
            }
            Some(rgb)
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(rgb)
        }
        _ => None,
    }
}

fn to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Normalize a hex color to lowercase `#rrggbb`
#[must_use]
pub fn normalize_hex(hex: &str) -> Option<String> {
    parse_hex(hex).map(to_hex)
}

/// Name of the nearest reference color (squared RGB distance, first wins on ties)
#[must_use]
pub fn color_name(hex: &str) -> Option<&'static str> {
    let rgb = parse_hex(hex)?;
    NAMED_COLORS
        .iter()
        .min_by_key(|(_, reference)| {
            rgb.iter()
                .zip(reference)
                .map(|(a, b)| {
                    let d = i32::from(*a) - i32::from(*b);
                    d * d
                })
                .sum::<i32>()
        })
        .map(|(name, _)| *name)
}

fn mix(rgb: [u8; 3], amount: f32) -> [u8; 3] {
    let target = if amount >= 0.0 { 255.0 } else { 0.0 };
    let weight = amount.abs();
    rgb.map(|channel| {
        let c = f32::from(channel);
        // Result stays within 0..=255 because it is a convex combination
        (c + (target - c) * weight).round() as u8
    })
}

/// Tint/shade scale keyed by step (50, 100, …, 900, 950); step 500 is the input color
#[must_use]
pub fn color_scale(hex: &str) -> Option<BTreeMap<u16, String>> {
    let rgb = parse_hex(hex)?;
    Some(
        SCALE_STEPS
            .iter()
            .map(|&(step, amount)| (step, to_hex(mix(rgb, amount))))
            .collect(),
    )
}

fn collect_colors(section: &ContentSection, out: &mut Vec<String>) {
    if let Some(styling) = &section.styling {
        for value in [&styling.background_color, &styling.text_color].into_iter().flatten() {
            if let Some(hex) = normalize_hex(value) {
                if !out.contains(&hex) {
                    out.push(hex);
                }
            }
        }
    }
    for child in &section.data.children {
        collect_colors(child, out);
    }
}

/// Distinct hex colors used in section styling, in first-seen order
#[must_use]
pub fn extract_palette(pages: &[PageContent]) -> Vec<String> {
    let mut colors = Vec::new();
    for section in pages.iter().flat_map(|page| page.sections.iter()) {
        collect_colors(section, &mut colors);
    }
    colors
}
