//! Error types for the factlens crate.
//!
//! All errors use stable string messages suitable for display to users.
//! Provider credentials never appear in error messages.

use crate::types::FilterStats;

/// Errors that can occur during news verification.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The query was empty after trimming.
    #[error("query must not be empty")]
    EmptyQuery,

    /// The query exceeded the configured maximum length.
    #[error("query exceeds {0} characters")]
    QueryTooLong(usize),

    /// No search provider was configured at startup.
    #[error("no search providers configured")]
    NoProviders,

    /// Providers ran but zero candidates survived relevance filtering.
    #[error("no relevant results found")]
    NoResults {
        /// Diagnostic statistics from the relevance filter.
        stats: FilterStats,
        /// Query-refinement suggestions for the caller.
        suggestions: Vec<String>,
    },

    /// The process-wide rate limit was exceeded.
    #[error("rate limit exceeded, retry after {retry_after}s")]
    RateLimited {
        /// Seconds until the oldest request leaves the window.
        retry_after: u64,
    },

    /// An HTTP request to a provider failed. Absorbed at the adapter
    /// boundary; never crosses the API surface.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid verifier configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for factlens results.
pub type Result<T> = std::result::Result<T, VerifyError>;
