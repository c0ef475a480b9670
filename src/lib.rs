//! News verification via multi-provider search aggregation.
//!
//! Given a short claim or topic query, the pipeline extracts tiered
//! keywords, plans optimized search variants, fans out to the configured
//! news search providers concurrently, deduplicates and ranks the merged
//! candidates by title relevance, classifies source credibility, and
//! aggregates an overall trust score with a verdict.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use factlens::{NaverAdapter, NaverConfig, Verifier, VerifierConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let naver = NaverAdapter::new(NaverConfig::new("id", "secret"))?;
//! let verifier = Verifier::new(VerifierConfig::default(), vec![Arc::new(naver)])?;
//! let report = verifier.verify("F1 경기 결과").await?;
//! println!("{}% {}", report.credibility_score, report.analysis.consensus);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credibility;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod provider;
pub mod providers;
pub mod query_plan;
pub mod rate_limit;
pub mod server;
pub mod trust;
pub mod types;
pub mod verdict;

pub use config::{ScoringMode, VerifierConfig};
pub use error::{Result, VerifyError};
pub use pipeline::Verifier;
pub use provider::NewsProvider;
pub use providers::google::{GoogleAdapter, GoogleConfig};
pub use providers::naver::{NaverAdapter, NaverConfig};
pub use rate_limit::RateLimiter;
pub use types::{
    Analysis, Candidate, CredibilityTier, FilterStats, ScoredCandidate, VerificationReport,
    VerificationStatus,
};
