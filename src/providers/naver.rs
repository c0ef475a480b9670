//! Naver News Search API adapter.
//!
//! Queries `GET /v1/search/news.json` with client-id/secret headers.
//! Naver wraps matched terms in `<b>` tags and escapes entities, so
//! titles and descriptions are stripped before normalization. Uses up
//! to two query variants and deduplicates its own results by URL
//! before returning.

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;

use crate::error::{Result, VerifyError};
use crate::pipeline::url_normalize::normalize_url;
use crate::provider::{domain_of, strip_html, NewsProvider};
use crate::providers::is_excluded;
use crate::types::Candidate;

const DEFAULT_BASE_URL: &str = "https://openapi.naver.com";

/// How many variants this adapter fans out to internally.
const MAX_VARIANTS: usize = 2;

/// Configuration for the Naver adapter.
#[derive(Debug, Clone)]
pub struct NaverConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Base URL, overridable for tests.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Results requested per query.
    pub display: u32,
}

impl NaverConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: 7,
            display: 5,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Naver News Search API client.
pub struct NaverAdapter {
    config: NaverConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct NaverResponse {
    #[serde(default)]
    items: Vec<NaverItem>,
}

#[derive(Debug, Deserialize)]
struct NaverItem {
    title: String,
    link: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "pubDate")]
    pub_date: String,
}

impl NaverAdapter {
    pub fn new(config: NaverConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VerifyError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    async fn search_one(&self, query: &str) -> Result<Vec<Candidate>> {
        tracing::trace!(query, "Naver news search");

        let display = self.config.display.to_string();
        let response = self
            .client
            .get(format!("{}/v1/search/news.json", self.config.base_url))
            .query(&[
                ("query", query),
                ("display", display.as_str()),
                ("start", "1"),
                ("sort", "date"),
            ])
            .header("X-Naver-Client-Id", &self.config.client_id)
            .header("X-Naver-Client-Secret", &self.config.client_secret)
            .send()
            .await
            .map_err(|e| VerifyError::Http(format!("Naver request failed: {e}")))?
            .error_for_status()
            .map_err(|e| VerifyError::Http(format!("Naver HTTP error: {e}")))?;

        let body: NaverResponse = response
            .json()
            .await
            .map_err(|e| VerifyError::Parse(format!("Naver response parse failed: {e}")))?;

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
                    published_date: DateTime::parse_from_rfc2822(&item.pub_date)
                        .ok()
                        .map(|d| d.date_naive()),
                    description: strip_html(&item.description),
                    provider_score: None,
                    provider: "naver".to_owned(),
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(query, count = candidates.len(), "Naver returned results");
        Ok(candidates)
    }
}

#[async_trait]
impl NewsProvider for NaverAdapter {
    async fn search(&self, variants: &[String]) -> Result<Vec<Candidate>> {
        let mut merged: Vec<Candidate> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        let mut last_err: Option<VerifyError> = None;

        for variant in variants.iter().take(MAX_VARIANTS) {
            match self.search_one(variant).await {
                Ok(candidates) => {
                    for c in candidates {
                        if seen.insert(normalize_url(&c.url)) {
                            merged.push(c);
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!(variant, error = %err, "Naver variant query failed");
                    last_err = Some(err);
                }
            }
        }

        // Fail only when every variant failed and nothing came back.
        if merged.is_empty() {
            if let Some(err) = last_err {
                return Err(err);
            }
        }
        Ok(merged)
    }

    fn name(&self) -> &'static str {
        "naver"
    }
}
