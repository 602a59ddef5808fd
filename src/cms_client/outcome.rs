//! Live or substituted API responses

use std::fmt;

/// Why mock data was served instead of a live response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredentials,
    Network(String),
    HttpStatus(u16),
    Decode(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredentials => f.write_str("no API credentials configured"),
            Self::Network(e) => write!(f, "network error: {e}"),
            Self::HttpStatus(status) => write!(f, "HTTP status {status}"),
            Self::Decode(e) => write!(f, "unexpected response shape: {e}"),
        }
    }
}

/// Result of a CMS call; never an error
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    Live(T),
    Fallback { data: T, reason: FallbackReason },
}

impl<T> ApiOutcome<T> {
    #[must_use]
    pub fn data(&self) -> &T {
        match self {
            Self::Live(data) | Self::Fallback { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Self::Live(data) | Self::Fallback { data, .. } => data,
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    #[must_use]
    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Live(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    /// Transform the payload, keeping the live/fallback marker
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Live(data) => ApiOutcome::Live(f(data)),
            Self::Fallback { data, reason } => ApiOutcome::Fallback {
                data: f(data),
                reason,
            },
        }
    }
}
