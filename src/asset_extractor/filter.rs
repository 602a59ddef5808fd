//! Image URL allowlist

use url::Url;

use crate::utils::{CMS_ASSET_DOMAINS, DEFAULT_IMAGE_EXTENSIONS};

/// Which URLs count as images worth optimizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Hosts images may come from; empty allows every host
    pub allowed_domains: Vec<String>,
    /// Lowercase path extensions without the dot
    pub extensions: Vec<String>,
    /// Hosts whose URLs are images even without an extension
    pub cms_domains: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            allowed_domains: Vec::new(),
            extensions: DEFAULT_IMAGE_EXTENSIONS.iter().map(ToString::to_string).collect(),
            cms_domains: CMS_ASSET_DOMAINS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ExtractorConfig {
    /// Host allowed AND (image extension OR CMS asset host)
    #[must_use]
    pub fn is_valid_image_url(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = parsed.host_str() else {
            return false;
        };

        let host_allowed = self.allowed_domains.is_empty()
            || self
                .allowed_domains
                .iter()
                .any(|domain| domain.eq_ignore_ascii_case(host));
        if !host_allowed {
            return false;
        }

        let path = parsed.path().to_ascii_lowercase();
        let has_extension = path
            .rsplit_once('.')
            .is_some_and(|(_, ext)| self.extensions.iter().any(|allowed| allowed == ext));

        has_extension
            || self
                .cms_domains
                .iter()
                .any(|domain| domain.eq_ignore_ascii_case(host))
    }
}
