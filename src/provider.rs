//! Trait definition for pluggable news search providers.
//!
//! Each provider (Naver News Search, Google Custom Search, …) implements
//! [`NewsProvider`] to expose a uniform contract: given the ordered query
//! variants, return zero or more normalized [`Candidate`]s or fail. The
//! aggregator absorbs every failure at this boundary — no provider error
//! crosses into the caller-facing result.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::types::Candidate;

/// A pluggable news search backend.
///
/// Implementors handle their own URL construction, credential headers,
/// response parsing, and domain allow/deny biasing. They may fan out to
/// up to two query variants internally; if they do, they deduplicate
/// their own results by URL before returning.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Search using the ordered variant list (highest priority first).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot
    /// be parsed. The aggregator treats any error as an empty result.
    async fn search(&self, variants: &[String]) -> Result<Vec<Candidate>>;

    /// Short stable name used in logs, status reports, and candidates.
    fn name(&self) -> &'static str;
}

/// Derive the host portion of a result URL, or empty when unparseable.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_default()
}

/// Strip HTML tags and decode the few entities provider payloads carry
/// (Naver wraps matched terms in `<b>` and escapes quotes).
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
