//! Error types for migration operations
//!
//! Fetch and parse failures are caller-visible because a missing page changes
//! the pipeline output. Asset failures are wrapped in [`MigrateError::Asset`]
//! and isolated by the batch layer; validation defects and headless API
//! failures never travel through this type at all.

/// Error type for migration operations
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Network-level failure while fetching a page, sitemap or asset
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Server answered with a non-2xx status
    #[error("HTTP error {status}: {url}")]
    HttpStatus { url: String, status: u16 },

    /// The single fetch deadline elapsed
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    /// Malformed sitemap XML, URL or markup shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Per-asset download or decode failure
    #[error("Asset processing failed for {url}: {reason}")]
    Asset { url: String, reason: String },

    /// Responsive image set requested for an asset lacking dimensions or an optimized path
    #[error("Image is missing required data: {0}")]
    MissingImageData(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MigrateError {
    /// Classify a reqwest failure for `url` into a fetch or timeout error
    pub(crate) fn from_request(url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Fetch {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }

    /// Returns true if the failure happened on the network side (retrying later may help)
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::HttpStatus { .. } | Self::Timeout { .. }
        )
    }
}

/// Convenience alias for Result with `MigrateError`
pub type MigrateResult<T> = Result<T, MigrateError>;
