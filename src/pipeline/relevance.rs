//! Tiered keyword relevance scoring, inclusion filtering, and ranking.
//!
//! Titles are scored against the extracted keyword set: Essential hits
//! weigh most, partial and synonym matches add small bonuses with a
//! provenance tag. The inclusion policy is deliberately layered and
//! permissive — it reproduces the upstream behaviour exactly and is
//! locked by tests; do not tighten it without product review.

use crate::keywords::{normalize_text, KeywordSet};
use crate::types::{Candidate, KeywordTier};

const ESSENTIAL_HIT: i32 = 10;
const ESSENTIAL_MISS: i32 = -1;
const IMPORTANT_HIT: i32 = 5;
const OPTIONAL_HIT: i32 = 3;
const FRONT_PARTIAL_BONUS: i32 = 2;
const TAIL_PARTIAL_BONUS: i32 = 1;
const SYNONYM_BONUS: i32 = 1;

/// Inclusion threshold for keyword sets containing short/ambiguous tokens.
const SHORT_TOKEN_THRESHOLD: i32 = -3;
/// Last-resort inclusion floor: anything scoring above this survives.
const FALLBACK_FLOOR: i32 = -5;

/// Result of scoring one title against the keyword set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub score: i32,
    /// Matched forms; partial and synonym matches carry a provenance
    /// suffix: `(partial)`, `(tail)`, `(synonym)`.
    pub matched: Vec<String>,
    /// True when at least one Essential keyword matched verbatim.
    pub essential_hit: bool,
}

/// Score a candidate title against the tiered keyword set.
pub fn score_title(title: &str, keywords: &KeywordSet) -> MatchOutcome {
    let normalized = normalize_text(title);
    let mut score = 0;
    let mut matched: Vec<String> = Vec::new();
    let mut essential_hit = false;

    for keyword in keywords.iter() {
        let hit = normalized.contains(&keyword.text);
        match keyword.tier {
            KeywordTier::Essential => {
                if hit {
                    score += ESSENTIAL_HIT;
                    matched.push(keyword.text.clone());
                    essential_hit = true;
                } else {
                    // Absent essentials cost a token penalty, not exclusion.
                    score += ESSENTIAL_MISS;
                }
            }
            KeywordTier::Important => {
                if hit {
                    score += IMPORTANT_HIT;
                    matched.push(keyword.text.clone());
                }
            }
            KeywordTier::Optional => {
                if hit {
                    score += OPTIONAL_HIT;
                    matched.push(keyword.text.clone());
                }
            }
        }
    }

    // Partial match bonus: leading ~70% of the keyword present, or the
    // trailing ~70%, when the whole keyword did not already match.
    for keyword in keywords.iter() {
        let chars: Vec<char> = keyword.text.chars().collect();
        if chars.len() <= 2 {
            continue;
        }
        let front_len = ((chars.len() as f64) * 0.7).ceil() as usize;
        let front: String = chars[..front_len].iter().collect();
        let partial_tag = format!("{}(partial)", keyword.text);
        if front.chars().count() > 1
            && normalized.contains(&front)
            && !matched.contains(&keyword.text)
        {
            score += FRONT_PARTIAL_BONUS;
            matched.push(partial_tag.clone());
        }

        let tail_start = ((chars.len() as f64) * 0.3).floor() as usize;
        let tail: String = chars[tail_start..].iter().collect();
        if tail.chars().count() > 1
            && normalized.contains(&tail)
            && !matched.contains(&keyword.text)
            && !matched.contains(&partial_tag)
        {
            score += TAIL_PARTIAL_BONUS;
            matched.push(format!("{}(tail)", keyword.text));
        }
    }

    // Synonym match for keywords that did not match verbatim.
    for keyword in keywords.iter() {
        if matched.contains(&keyword.text) {
            continue;
        }
        for synonym in &keyword.synonyms {
            if normalized.contains(synonym) {
                score += SYNONYM_BONUS;
                matched.push(format!("{synonym}(synonym)"));
            }
        }
    }

    MatchOutcome {
        score,
        matched,
        essential_hit,
    }
}

/// The layered inclusion policy, preserved from upstream bit-for-bit.
/// Each condition is an independent "include anyway" fallback.
pub fn should_include(outcome: &MatchOutcome, keywords: &KeywordSet) -> bool {
    if !outcome.matched.is_empty() {
        return true;
    }
    if outcome.score >= 0 {
        return true;
    }
    if keywords.tier(KeywordTier::Essential).count() > 0 && outcome.essential_hit {
        return true;
    }
    if keywords.has_short_or_ambiguous() && outcome.score >= SHORT_TOKEN_THRESHOLD {
        return true;
    }
    outcome.score > FALLBACK_FLOOR
}

/// Score, filter, and rank candidates.
///
/// Sort order: score descending, then match-count ratio descending,
/// then provider-native score descending; the sort is stable so full
/// ties keep their original (first-seen) order.
pub fn filter_and_rank(
    candidates: Vec<Candidate>,
    keywords: &KeywordSet,
) -> Vec<(Candidate, MatchOutcome)> {
    let total = keywords.len();
    let ratio = |o: &MatchOutcome| {
        if total == 0 {
            0.0
        } else {
            o.matched.len() as f64 / total as f64
        }
    };

    let mut scored: Vec<(Candidate, MatchOutcome)> = candidates
        .into_iter()
        .map(|c| {
            let outcome = score_title(&c.title, keywords);
            (c, outcome)
        })
        .filter(|(_, o)| should_include(o, keywords))
        .collect();

    scored.sort_by(|(ca, oa), (cb, ob)| {
        ob.score
            .cmp(&oa.score)
            .then_with(|| {
                ratio(ob)
                    .partial_cmp(&ratio(oa))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| {
                let pa = ca.provider_score.unwrap_or(f64::NEG_INFINITY);
                let pb = cb.provider_score.unwrap_or(f64::NEG_INFINITY);
                pb.partial_cmp(&pa).unwrap_or(std::cmp::Ordering::Equal)
            })
    });
    scored
}
