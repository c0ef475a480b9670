//! Verifier configuration with sensible defaults.
//!
//! [`VerifierConfig`] collects the tunables that the source code used to
//! scatter as inline literals across server variants: the per-provider
//! timeout, display cap, query length limit, rate-limit window, and the
//! trust scoring mode.

use crate::error::VerifyError;

/// Trust score aggregation mode.
///
/// Two incompatible formulas exist upstream; both are preserved as
/// explicit modes rather than silent code divergence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringMode {
    /// Credibility base averaging (High=90) plus a diversity bonus.
    #[default]
    Permissive,
    /// Conservative bases (High=35) plus relevance, freshness, and
    /// title-quality components, hard-capped when no high-quality
    /// source is present.
    Strict,
}

impl ScoringMode {
    /// Parse a mode name, defaulting to [`ScoringMode::Permissive`] for
    /// unknown values.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "strict" => Self::Strict,
            _ => Self::Permissive,
        }
    }
}

/// Configuration for the verification pipeline.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Per-provider timeout in seconds. A timeout counts as a provider
    /// failure and is absorbed like any other.
    pub provider_timeout_secs: u64,
    /// Maximum number of ranked sources returned to the caller.
    pub max_sources: usize,
    /// Maximum accepted query length in characters.
    pub max_query_len: usize,
    /// Maximum requests allowed within the rate-limit window.
    pub rate_limit_max: usize,
    /// Rate-limit window length in seconds.
    pub rate_limit_window_secs: u64,
    /// Trust score aggregation mode.
    pub scoring_mode: ScoringMode,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            provider_timeout_secs: 8,
            max_sources: 10,
            max_query_len: 100,
            rate_limit_max: 10,
            rate_limit_window_secs: 60,
            scoring_mode: ScoringMode::Permissive,
        }
    }
}

impl VerifierConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    pub fn validate(&self) -> Result<(), VerifyError> {
        if self.provider_timeout_secs == 0 {
            return Err(VerifyError::Config(
                "provider_timeout_secs must be greater than 0".into(),
            ));
        }
        if self.max_sources == 0 {
            return Err(VerifyError::Config(
                "max_sources must be greater than 0".into(),
            ));
        }
        if self.max_query_len == 0 {
            return Err(VerifyError::Config(
                "max_query_len must be greater than 0".into(),
            ));
        }
        if self.rate_limit_max == 0 {
            return Err(VerifyError::Config(
                "rate_limit_max must be greater than 0".into(),
            ));
        }
        if self.rate_limit_window_secs == 0 {
            return Err(VerifyError::Config(
                "rate_limit_window_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
