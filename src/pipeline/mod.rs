//! The verification pipeline: query validation, keyword extraction,
//! provider fan-out, deduplication, relevance ranking, credibility
//! classification, trust aggregation, and verdict generation.

pub mod dedup;
pub mod relevance;
pub mod url_normalize;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::VerifierConfig;
use crate::error::{Result, VerifyError};
use crate::provider::NewsProvider;
use crate::types::{Candidate, FilterStats, ScoredCandidate, VerificationReport};
use crate::{credibility, keywords, query_plan, trust, verdict};

/// Refinement hints returned alongside a no-results failure.
const NO_RESULT_SUGGESTIONS: &[&str] = &[
    "더 구체적인 키워드를 사용해보세요",
    "다른 단어로 바꿔서 검색해보세요",
    "맞춤법과 띄어쓰기를 확인해보세요",
];

/// The verification pipeline over a set of search providers.
///
/// Construction validates the configuration; a verifier with zero
/// providers is allowed to exist (so the status endpoint can report
/// misconfiguration) but fails every verify call.
pub struct Verifier {
    config: VerifierConfig,
    providers: Vec<Arc<dyn NewsProvider>>,
}

impl Verifier {
    pub fn new(config: VerifierConfig, providers: Vec<Arc<dyn NewsProvider>>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, providers })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Names of the configured providers, in registration order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Run the full pipeline for one query.
    ///
    /// Provider failures and timeouts are absorbed: the pipeline
    /// proceeds with whatever candidates the remaining providers
    /// returned. Input validation happens before any provider call.
    pub async fn verify(&self, query: &str) -> Result<VerificationReport> {
        let query = query.trim();
        if query.is_empty() {
            return Err(VerifyError::EmptyQuery);
        }
        if query.chars().count() > self.config.max_query_len {
            return Err(VerifyError::QueryTooLong(self.config.max_query_len));
        }
        if self.providers.is_empty() {
            return Err(VerifyError::NoProviders);
        }

        let keywords = keywords::extract(query);
        let plan = query_plan::build_plan(&keywords);
        let variants = if plan.variants.is_empty() {
            vec![query.to_string()]
        } else {
            plan.variants.clone()
        };
        debug!(
            strategy = ?plan.strategy,
            variant_count = variants.len(),
            keyword_count = keywords.len(),
            "query plan built"
        );

        let candidates = self.fan_out(&variants).await;
        let original_count = candidates.len();
        let deduped = dedup::deduplicate(candidates);
        debug!(
            fetched = original_count,
            after_dedup = deduped.len(),
            "candidates collected"
        );

        let ranked = relevance::filter_and_rank(deduped, &keywords);
        let sources: Vec<ScoredCandidate> = ranked
            .into_iter()
            .map(|(candidate, outcome)| {
                let credibility = credibility::classify(&candidate.domain);
                ScoredCandidate {
                    candidate,
                    relevance_score: outcome.score,
                    matched_keywords: outcome.matched,
                    credibility,
                }
            })
            .collect();

        let filter_stats = FilterStats::new(original_count, sources.len(), keywords.breakdown());
        if sources.is_empty() {
            return Err(VerifyError::NoResults {
                stats: filter_stats,
                suggestions: NO_RESULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            });
        }

        // Score and analyse over the full ranked list, then truncate
        // for display.
        let credibility_score = trust::aggregate(&sources, query, self.config.scoring_mode);
        let analysis = verdict::generate(&sources, credibility_score);
        let search_count = sources.len();

        let mut sources = sources;
        sources.truncate(self.config.max_sources);

        Ok(VerificationReport {
            query: query.to_string(),
            credibility_score,
            sources,
            analysis,
            search_count,
            timestamp: Utc::now(),
            searched_sources: self.provider_names().iter().map(|s| s.to_string()).collect(),
            filter_stats,
        })
    }

    /// Query every provider concurrently, each under the configured
    /// timeout, and merge whatever succeeded.
    async fn fan_out(&self, variants: &[String]) -> Vec<Candidate> {
        let timeout = Duration::from_secs(self.config.provider_timeout_secs);
        let searches = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            async move {
                let name = provider.name();
                match tokio::time::timeout(timeout, provider.search(variants)).await {
                    Ok(Ok(candidates)) => {
                        debug!(provider = name, count = candidates.len(), "provider returned");
                        candidates
                    }
                    Ok(Err(err)) => {
                        warn!(provider = name, error = %err, "provider failed");
                        Vec::new()
                    }
                    Err(_) => {
                        warn!(provider = name, timeout_secs = timeout.as_secs(), "provider timed out");
                        Vec::new()
                    }
                }
            }
        });
        join_all(searches).await.into_iter().flatten().collect()
    }
}
