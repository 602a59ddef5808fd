//! Minimal image header parsing
//!
//! Only the bytes needed to read dimensions are inspected; nothing is decoded.

use crate::utils::{FALLBACK_IMAGE_HEIGHT, FALLBACK_IMAGE_WIDTH};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Dimensions and format read from an image header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// File extension of the detected format
    pub format: &'static str,
}

impl ImageInfo {
    /// Used when no known signature matches
    pub const FALLBACK: Self = Self {
        width: FALLBACK_IMAGE_WIDTH,
        height: FALLBACK_IMAGE_HEIGHT,
        format: "jpg",
    };
}

fn be_u16(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 2)?;
    Some(u32::from(u16::from_be_bytes([b[0], b[1]])))
}

fn le_u16(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 2)?;
    Some(u32::from(u16::from_le_bytes([b[0], b[1]])))
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// PNG: IHDR width/height, big-endian at 16 and 20
fn png_info(bytes: &[u8]) -> Option<ImageInfo> {
    if !bytes.starts_with(PNG_SIGNATURE) {
        return None;
    }
    Some(ImageInfo {
        width: be_u32(bytes, 16)?,
        height: be_u32(bytes, 20)?,
        format: "png",
    })
}

/// WebP: little-endian 16-bit width/height at 26 and 28, each stored minus one
fn webp_info(bytes: &[u8]) -> Option<ImageInfo> {
    if !bytes.starts_with(b"RIFF") || bytes.get(8..12) != Some(&b"WEBP"[..]) {
        return None;
    }
    Some(ImageInfo {
        width: le_u16(bytes, 26)? + 1,
        height: le_u16(bytes, 28)? + 1,
        format: "webp",
    })
}

/// JPEG: walk marker segments until SOF0 or SOF2
fn jpeg_info(bytes: &[u8]) -> Option<ImageInfo> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut offset = 2;
    while offset + 4 <= bytes.len() {
        if bytes[offset] != 0xFF {
            return None;
        }
        let marker = bytes[offset + 1];
        // Fill bytes between segments
        if marker == 0xFF {
            offset += 1;
            continue;
        }
        if marker == 0xC0 || marker == 0xC2 {
            return Some(ImageInfo {
                height: be_u16(bytes, offset + 5)?,
                width: be_u16(bytes, offset + 7)?,
                format: "jpg",
            });
        }
        let length = usize::try_from(be_u16(bytes, offset + 2)?).ok()?;
        offset += 2 + length;
    }
    None
}

/// Detect format and dimensions, falling back to 800×600 jpg
#[must_use]
pub fn read_image_info(bytes: &[u8]) -> ImageInfo {
    png_info(bytes)
        .or_else(|| webp_info(bytes))
        .or_else(|| jpeg_info(bytes))
        .unwrap_or(ImageInfo::FALLBACK)
}
