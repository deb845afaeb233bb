//! HTTP access to the static site.
//!
//! Every file the page needs (dataset, translations) is a JSON document
//! addressed relative to the current page URL, the way a browser resolves
//! `fetch("data.json")` from a page.

use crate::error::FetchError;
use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("crisis-docs/", env!("CARGO_PKG_VERSION"));

/// Client bound to one page of the site.
#[derive(Debug, Clone)]
pub struct SiteClient {
    client: reqwest::Client,
    page_url: Url,
}

impl SiteClient {
    /// Build a client for `page_path` under `base_url`.
    ///
    /// `page_path` is the page's path on the site (e.g. `/massacres/lydda.html`).
    pub fn new(base_url: &str, page_path: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base_url).map_err(|_| FetchError::InvalidUrl(base_url.to_string()))?;
        let page_url = base
            .join(page_path)
            .map_err(|_| FetchError::InvalidUrl(page_path.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| FetchError::Network {
                url: page_url.to_string(),
                source,
            })?;

        Ok(Self { client, page_url })
    }

    /// Absolute URL of the page itself.
    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Path component of the page URL (used for root-prefix computation).
    pub fn page_path(&self) -> &str {
        self.page_url.path()
    }

    /// Resolve a path relative to the page, as a browser would.
    pub fn resolve(&self, relative: &str) -> Result<Url, FetchError> {
        self.page_url
            .join(relative)
            .map_err(|_| FetchError::InvalidUrl(relative.to_string()))
    }

    /// Fetch and parse a JSON document relative to the page.
    pub async fn get_json(&self, relative: &str) -> Result<Value, FetchError> {
        let url = self.resolve(relative)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| FetchError::Malformed {
            url: url.to_string(),
            source,
        })
    }
}
