//! Source-URL fingerprints
//!
//! The fingerprint identifies an image by the URL it was downloaded from,
//! not by its pixels, so it is known before any network access.

use xxhash_rust::xxh3::xxh3_128;

/// 32 lowercase hex characters of the XXH3-128 hash of `url`
#[must_use]
pub fn url_fingerprint(url: &str) -> String {
    format!("{:032x}", xxh3_128(url.as_bytes()))
}
