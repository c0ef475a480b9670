//! Verdict generation: mapping an aggregate trust score onto a
//! verification status and a short consensus summary.

use crate::types::{Analysis, CredibilityTier, ScoredCandidate, VerificationStatus};

const VERIFIED_THRESHOLD: u8 = 80;
const PARTIALLY_VERIFIED_THRESHOLD: u8 = 60;
const NEEDS_VERIFICATION_THRESHOLD: u8 = 40;

/// Produce the analysis block for a report.
///
/// Thresholds are boundary-inclusive: a score of exactly 80 is
/// Verified, exactly 60 is PartiallyVerified, exactly 40 is
/// NeedsVerification.
pub fn generate(sources: &[ScoredCandidate], credibility_score: u8) -> Analysis {
    let verification_status = status_for(credibility_score);
    Analysis {
        verification_status,
        consensus: consensus_for(verification_status).to_string(),
        conflicting_info: has_conflicting_info(sources),
    }
}

fn status_for(score: u8) -> VerificationStatus {
    if score >= VERIFIED_THRESHOLD {
        VerificationStatus::Verified
    } else if score >= PARTIALLY_VERIFIED_THRESHOLD {
        VerificationStatus::PartiallyVerified
    } else if score >= NEEDS_VERIFICATION_THRESHOLD {
        VerificationStatus::NeedsVerification
    } else {
        VerificationStatus::Unverifiable
    }
}

fn consensus_for(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Verified => {
            "Multiple reliable sources confirm this information"
        }
        VerificationStatus::PartiallyVerified => {
            "Some reliable sources support this information"
        }
        VerificationStatus::NeedsVerification => {
            "Limited source support, further verification recommended"
        }
        VerificationStatus::Unverifiable => {
            "Insufficient reliable sources to verify this information"
        }
    }
}

/// Conflicting coverage is suspected when more than two sources exist
/// and fewer than 60% of them are high-credibility.
fn has_conflicting_info(sources: &[ScoredCandidate]) -> bool {
    if sources.len() <= 2 {
        return false;
    }
    let high_count = sources
        .iter()
        .filter(|s| s.credibility == CredibilityTier::High)
        .count();
    (high_count as f64) < sources.len() as f64 * 0.6
}
