//! Core types for candidates, scored results, and verification reports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Importance tier assigned to a query keyword at extraction time.
///
/// Tiers are never mutated after extraction. `Essential` keywords carry
/// the highest relevance weight, `Optional` the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordTier {
    Essential,
    Important,
    Optional,
}

impl fmt::Display for KeywordTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Essential => f.write_str("essential"),
            Self::Important => f.write_str("important"),
            Self::Optional => f.write_str("optional"),
        }
    }
}

/// A normalized query keyword with its tier and synonym expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    /// Normalized (lowercased, stripped) keyword text.
    pub text: String,
    /// Importance tier, assigned once from the static lookup tables.
    pub tier: KeywordTier,
    /// Synonyms from the static domain-term table, excluding the keyword itself.
    pub synonyms: Vec<&'static str>,
}

/// Keyword texts grouped by tier, used in filter diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordBreakdown {
    pub essential: Vec<String>,
    pub important: Vec<String>,
    pub optional: Vec<String>,
}

/// A raw search result from one provider, before scoring.
///
/// The URL is the dedup identity key: two candidates with the same
/// normalized URL (scheme + host + path, query-string-insensitive)
/// are the same entity, and the first-seen copy wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub title: String,
    pub url: String,
    /// Host derived from the URL.
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
    pub description: String,
    /// Provider-native relevance score, when the provider supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_score: Option<f64>,
    /// Name of the provider that returned this candidate.
    pub provider: String,
}

/// Credibility tier of a result's source domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredibilityTier {
    High,
    Medium,
    Low,
}

impl fmt::Display for CredibilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("High"),
            Self::Medium => f.write_str("Medium"),
            Self::Low => f.write_str("Low"),
        }
    }
}

/// A candidate annotated with relevance score, matched keywords, and
/// source credibility. Created once per surviving candidate; never
/// re-scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub relevance_score: i32,
    /// Matched keyword forms. Partial and synonym matches carry a
    /// provenance suffix: `(partial)`, `(tail)`, `(synonym)`.
    pub matched_keywords: Vec<String>,
    pub credibility: CredibilityTier,
}

/// Discrete verification status derived from the trust score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    #[serde(rename = "verified")]
    Verified,
    #[serde(rename = "partially verified")]
    PartiallyVerified,
    #[serde(rename = "needs verification")]
    NeedsVerification,
    #[serde(rename = "unverifiable")]
    Unverifiable,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verified => f.write_str("verified"),
            Self::PartiallyVerified => f.write_str("partially verified"),
            Self::NeedsVerification => f.write_str("needs verification"),
            Self::Unverifiable => f.write_str("unverifiable"),
        }
    }
}

/// Verdict summary attached to a verification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub verification_status: VerificationStatus,
    /// Human-readable consensus sentence for the status band.
    pub consensus: String,
    /// True when more than two candidates remain but fewer than 60%
    /// come from High-credibility domains.
    pub conflicting_info: bool,
}

/// Statistics describing how the relevance filter narrowed the
/// candidate set. Included in reports and in no-result diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub original_count: usize,
    pub filtered_count: usize,
    /// Percentage of candidates removed by filtering, rounded.
    pub filter_rate: u8,
    pub keywords: KeywordBreakdown,
    pub message: String,
}

impl FilterStats {
    pub fn new(original_count: usize, filtered_count: usize, keywords: KeywordBreakdown) -> Self {
        let filter_rate = if original_count == 0 {
            0
        } else {
            let removed = original_count.saturating_sub(filtered_count);
            ((removed as f64 / original_count as f64) * 100.0).round() as u8
        };
        let message = format!(
            "{filtered_count} of {original_count} results judged relevant by title matching"
        );
        Self {
            original_count,
            filtered_count,
            filter_rate,
            keywords,
            message,
        }
    }
}

/// The terminal artifact returned to the caller. Not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub query: String,
    /// Aggregate trust score, 0..=100.
    pub credibility_score: u8,
    /// Ranked scored candidates, truncated to the display cap.
    pub sources: Vec<ScoredCandidate>,
    pub analysis: Analysis,
    /// Number of candidates that survived filtering, pre-truncation.
    pub search_count: usize,
    pub timestamp: DateTime<Utc>,
    /// Names of the providers that were queried.
    pub searched_sources: Vec<String>,
    pub filter_stats: FilterStats,
}
