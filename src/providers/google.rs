//! Google Custom Search adapter.
//!
//! Queries `GET /customsearch/v1` with an API key and search engine id,
//! biased toward recent news ("뉴스" suffix, one-month date restriction).
//! Uses only the top-priority variant.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Result, VerifyError};
use crate::provider::{domain_of, strip_html, NewsProvider};
use crate::providers::is_excluded;
use crate::types::Candidate;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Configuration for the Google Custom Search adapter.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: String,
    /// Custom search engine id (`cx`).
    pub cx: String,
    /// Base URL, overridable for tests.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Results requested per query.
    pub num: u32,
}

impl GoogleConfig {
    pub fn new(api_key: impl Into<String>, cx: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cx: cx.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: 7,
            num: 5,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Google Custom Search API client.
pub struct GoogleAdapter {
    config: GoogleConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<GoogleItem>,
}

#[derive(Debug, Deserialize)]
struct GoogleItem {
    title: String,
    link: String,
    #[serde(default)]
    snippet: String,
}

impl GoogleAdapter {
    pub fn new(config: GoogleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VerifyError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl NewsProvider for GoogleAdapter {
    async fn search(&self, variants: &[String]) -> Result<Vec<Candidate>> {
        let Some(query) = variants.first() else {
            return Ok(Vec::new());
        };
        tracing::trace!(query, "Google custom search");

        let q = format!("{query} 뉴스");
        let num = self.config.num.to_string();
        let response = self
            .client
            .get(format!("{}/customsearch/v1", self.config.base_url))
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.cx.as_str()),
                ("q", q.as_str()),
                ("num", num.as_str()),
                ("dateRestrict", "m1"),
            ])
            .send()
            .await
            .map_err(|e| VerifyError::Http(format!("Google request failed: {e}")))?
            .error_for_status()
            .map_err(|e| VerifyError::Http(format!("Google HTTP error: {e}")))?;

        let body: GoogleResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::Parse(format!("Google response parse failed: {e}")))?;

        let candidates = body
            .items
            .into_iter()
            .filter_map(|item| {
                let domain = domain_of(&item.link);
                if domain.is_empty() || is_excluded(&domain) {
                    return None;
                }
                Some(Candidate {
                    title: strip_html(&item.title),
                    url: item.link,
                    domain,
                    published_date: None,
                    description: strip_html(&item.snippet),
                    provider_score: None,
                    provider: "google".to_owned(),
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(query, count = candidates.len(), "Google returned results");
        Ok(candidates)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
