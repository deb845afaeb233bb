//! Error types shared across the crate.
//!
//! Lower layers (store, loader) never surface missing translations as errors;
//! only the cases below cross a public boundary.

use thiserror::Error;

/// Failure fetching a single static file from the site.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout or body-read failure
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body was not valid JSON
    #[error("malformed JSON at {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The relative path could not be resolved against the page URL
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),
}

impl FetchError {
    /// Network errors, 5xx and 429 are worth retrying. Other 4xx, bad JSON
    /// and bad URLs are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network { .. } => true,
            FetchError::Status { status, .. } => *status >= 500 || *status == 429,
            FetchError::Malformed { .. } | FetchError::InvalidUrl(_) => false,
        }
    }
}

/// Errors reported to callers of the page pipeline.
#[derive(Debug, Error)]
pub enum SiteError {
    /// The page dataset could not be loaded. Fatal for the page.
    #[error("could not load page data: {0}")]
    DatasetFetch(#[source] FetchError),

    #[error("unsupported language code '{0}'")]
    UnsupportedLanguage(String),

    #[error("language '{0}' is not enabled")]
    DisabledLanguage(String),

    /// `set_language` was called before `initialize`
    #[error("language controller is not initialized")]
    NotReady,
}
