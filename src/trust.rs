//! Trust score aggregation: combining per-candidate credibility into one
//! overall percentage.
//!
//! Two formulas exist upstream and both are preserved as explicit
//! [`ScoringMode`] variants. Permissive averages generous credibility
//! bases with a diversity bonus. Strict starts from conservative bases
//! and adds capped relevance, freshness, and title-quality components,
//! with a hard cap when no high-quality source is found.

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};

use crate::config::ScoringMode;
use crate::types::{CredibilityTier, ScoredCandidate};

// Permissive mode constants.
const PERMISSIVE_BASE_HIGH: f64 = 90.0;
const PERMISSIVE_BASE_MEDIUM: f64 = 60.0;
const PERMISSIVE_BASE_LOW: f64 = 30.0;
const PERMISSIVE_DIVERSITY_PER_DOMAIN: f64 = 5.0;
const PERMISSIVE_DIVERSITY_CAP: f64 = 20.0;

// Strict mode constants.
const STRICT_BASE_HIGH: f64 = 35.0;
const STRICT_BASE_MEDIUM: f64 = 20.0;
const STRICT_BASE_LOW: f64 = 5.0;
const STRICT_RELEVANCE_WEIGHT: f64 = 30.0;
const STRICT_FRESHNESS_WEIGHT: f64 = 15.0;
const STRICT_TITLE_QUALITY_WEIGHT: f64 = 10.0;
const STRICT_DESCRIPTION_BONUS: f64 = 10.0;
const STRICT_DIVERSITY_PER_DOMAIN: f64 = 2.0;
const STRICT_DIVERSITY_CAP: f64 = 8.0;
/// Ceiling applied when no High-credibility source is closely relevant.
const STRICT_NO_QUALITY_CAP: f64 = 45.0;

// Shared count adjustments.
const LOW_COUNT_PENALTY: f64 = -10.0;
const HIGH_COUNT_BONUS: f64 = 5.0;

/// Ad-flavoured title terms that reduce title quality.
const AD_TITLE_TERMS: &[&str] = &["클릭", "바로가기", "이벤트", "할인", "무료"];

/// Aggregate an overall trust percentage from the scored candidates.
///
/// Operates on the full post-filter list, before truncation to the
/// display cap. Returns 0 for an empty list.
pub fn aggregate(sources: &[ScoredCandidate], query: &str, mode: ScoringMode) -> u8 {
    if sources.is_empty() {
        return 0;
    }
    let score = match mode {
        ScoringMode::Permissive => permissive_score(sources),
        ScoringMode::Strict => strict_score(sources, query),
    };
    score.clamp(0.0, 100.0).round() as u8
}

fn permissive_score(sources: &[ScoredCandidate]) -> f64 {
    let total: f64 = sources
        .iter()
        .map(|s| credibility_base(s.credibility, ScoringMode::Permissive))
        .sum();
    let mut score = total / sources.len() as f64;
    score += diversity_bonus(
        sources,
        PERMISSIVE_DIVERSITY_PER_DOMAIN,
        PERMISSIVE_DIVERSITY_CAP,
    );
    score + count_adjustment(sources.len())
}

fn strict_score(sources: &[ScoredCandidate], query: &str) -> f64 {
    let total: f64 = sources
        .iter()
        .map(|s| {
            let mut per_source = credibility_base(s.credibility, ScoringMode::Strict);
            per_source += relevance_ratio(&s.candidate.title, query) * STRICT_RELEVANCE_WEIGHT;
            per_source += freshness(s.candidate.published_date) * STRICT_FRESHNESS_WEIGHT;
            per_source += title_quality(&s.candidate.title) * STRICT_TITLE_QUALITY_WEIGHT;
            if s.candidate.description.chars().count() > 20 {
                per_source += STRICT_DESCRIPTION_BONUS;
            }
            per_source
        })
        .sum();
    let mut score = total / sources.len() as f64;
    score += diversity_bonus(sources, STRICT_DIVERSITY_PER_DOMAIN, STRICT_DIVERSITY_CAP);
    score += count_adjustment(sources.len());

    let has_quality_source = sources.iter().any(|s| {
        s.credibility == CredibilityTier::High
            && relevance_ratio(&s.candidate.title, query) > 0.7
    });
    if !has_quality_source {
        score = score.min(STRICT_NO_QUALITY_CAP);
    }
    score
}

fn credibility_base(tier: CredibilityTier, mode: ScoringMode) -> f64 {
    match (mode, tier) {
        (ScoringMode::Permissive, CredibilityTier::High) => PERMISSIVE_BASE_HIGH,
        (ScoringMode::Permissive, CredibilityTier::Medium) => PERMISSIVE_BASE_MEDIUM,
        (ScoringMode::Permissive, CredibilityTier::Low) => PERMISSIVE_BASE_LOW,
        (ScoringMode::Strict, CredibilityTier::High) => STRICT_BASE_HIGH,
        (ScoringMode::Strict, CredibilityTier::Medium) => STRICT_BASE_MEDIUM,
        (ScoringMode::Strict, CredibilityTier::Low) => STRICT_BASE_LOW,
    }
}

fn diversity_bonus(sources: &[ScoredCandidate], per_domain: f64, cap: f64) -> f64 {
    let unique: HashSet<&str> = sources.iter().map(|s| s.candidate.domain.as_str()).collect();
    (unique.len() as f64 * per_domain).min(cap)
}

fn count_adjustment(count: usize) -> f64 {
    if count < 3 {
        LOW_COUNT_PENALTY
    } else if count >= 10 {
        HIGH_COUNT_BONUS
    } else {
        0.0
    }
}

/// Word-overlap relevance of a title to the query, 0.0..=1.0.
///
/// Counts query words (longer than one character) that appear in, or
/// contain, a title word; an exact full-query substring match adds 0.3.
pub fn relevance_ratio(title: &str, query: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let title_lower = title.to_lowercase();
    let query_words: Vec<&str> = query_lower.split_whitespace().collect();
    if query_words.is_empty() {
        return 0.0;
    }
    let title_words: Vec<&str> = title_lower.split_whitespace().collect();

    let match_count = query_words
        .iter()
        .filter(|qw| qw.chars().count() > 1)
        .filter(|qw| {
            title_words
                .iter()
                .any(|tw| tw.contains(*qw) || qw.contains(tw))
        })
        .count();

    let mut ratio = match_count as f64 / query_words.len() as f64;
    if title_lower.contains(&query_lower) {
        ratio += 0.3;
    }
    ratio.min(1.0)
}

/// Freshness of a publish date, 0.0..=1.0, decaying by day bucket.
pub fn freshness(published: Option<NaiveDate>) -> f64 {
    let Some(date) = published else {
        return 0.3;
    };
    let days = (Utc::now().date_naive() - date).num_days();
    match days {
        d if d <= 1 => 1.0,
        d if d <= 7 => 0.8,
        d if d <= 30 => 0.6,
        d if d <= 90 => 0.4,
        _ => 0.2,
    }
}

/// Heuristic title quality, 0.0..=1.0: reasonable length, no shouting
/// punctuation runs, no ad-flavoured terms.
pub fn title_quality(title: &str) -> f64 {
    let mut score: f64 = 0.5;
    let len = title.chars().count();
    if (10..=100).contains(&len) {
        score += 0.2;
    }
    if !(title.contains("!!") || title.contains("??") || title.contains("...")) {
        score += 0.1;
    }
    if !AD_TITLE_TERMS.iter().any(|t| title.contains(t)) {
        score += 0.2;
    }
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Candidate;
    use chrono::Duration;

    fn make_source(domain: &str, credibility: CredibilityTier) -> ScoredCandidate {
        ScoredCandidate {
            candidate: Candidate {
                title: "충분히 길고 평범한 뉴스 제목입니다".into(),
                url: format!("https://{domain}/article"),
                domain: domain.to_string(),
                published_date: None,
                description: String::new(),
                provider_score: None,
                provider: "naver".into(),
            },
            relevance_score: 10,
            matched_keywords: vec![],
            credibility,
        }
    }

    #[test]
    fn empty_sources_score_zero() {
        assert_eq!(aggregate(&[], "질의", ScoringMode::Permissive), 0);
        assert_eq!(aggregate(&[], "질의", ScoringMode::Strict), 0);
    }

    #[test]
    fn permissive_single_high_source() {
        let sources = vec![make_source("yna.co.kr", CredibilityTier::High)];
        // 90 base + 5 diversity - 10 low-count penalty.
        assert_eq!(aggregate(&sources, "질의", ScoringMode::Permissive), 85);
    }

    #[test]
    fn permissive_three_distinct_high_sources() {
        let sources = vec![
            make_source("yna.co.kr", CredibilityTier::High),
            make_source("kbs.co.kr", CredibilityTier::High),
            make_source("sbs.co.kr", CredibilityTier::High),
        ];
        // 90 base + 15 diversity, no count adjustment.
        assert_eq!(aggregate(&sources, "질의", ScoringMode::Permissive), 100);
    }

    #[test]
    fn permissive_diversity_bonus_is_capped() {
        let sources: Vec<ScoredCandidate> = (0..12)
            .map(|i| make_source(&format!("site{i}.co.kr"), CredibilityTier::Low))
            .collect();
        // 30 base + capped 20 diversity + 5 high-count bonus.
        assert_eq!(aggregate(&sources, "질의", ScoringMode::Permissive), 55);
    }

    #[test]
    fn duplicate_domains_earn_no_extra_diversity() {
        let sources = vec![
            make_source("yna.co.kr", CredibilityTier::High),
            make_source("yna.co.kr", CredibilityTier::High),
            make_source("yna.co.kr", CredibilityTier::High),
        ];
        // 90 base + 5 diversity (one unique domain).
        assert_eq!(aggregate(&sources, "질의", ScoringMode::Permissive), 95);
    }

    #[test]
    fn strict_caps_without_a_quality_source() {
        let sources = vec![
            make_source("a.co.kr", CredibilityTier::Low),
            make_source("b.co.kr", CredibilityTier::Low),
            make_source("c.co.kr", CredibilityTier::Low),
        ];
        let score = aggregate(&sources, "무관한 검색어", ScoringMode::Strict);
        assert!(score <= 45, "strict score {score} exceeds no-quality cap");
    }

    #[test]
    fn strict_relevant_high_source_lifts_the_cap() {
        let mut relevant = make_source("yna.co.kr", CredibilityTier::High);
        relevant.candidate.title = "삼성전자 실적 발표 종합".into();
        relevant.candidate.published_date = Some(Utc::now().date_naive());
        relevant.candidate.description = "삼성전자가 분기 실적을 발표했습니다 종합 정리".into();
        let sources = vec![
            relevant,
            make_source("kbs.co.kr", CredibilityTier::High),
            make_source("mbc.co.kr", CredibilityTier::High),
        ];
        let score = aggregate(&sources, "삼성전자 실적", ScoringMode::Strict);
        assert!(score > 45, "strict score {score} should exceed the cap");
    }

    #[test]
    fn strict_scores_below_permissive_for_same_input() {
        let sources = vec![
            make_source("yna.co.kr", CredibilityTier::High),
            make_source("kbs.co.kr", CredibilityTier::High),
            make_source("sbs.co.kr", CredibilityTier::High),
        ];
        let permissive = aggregate(&sources, "질의", ScoringMode::Permissive);
        let strict = aggregate(&sources, "질의", ScoringMode::Strict);
        assert!(strict < permissive);
    }

    #[test]
    fn relevance_ratio_full_match() {
        let ratio = relevance_ratio("삼성전자 실적 발표", "삼성전자 실적");
        assert!((ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn relevance_ratio_no_match_is_zero() {
        assert!(relevance_ratio("전혀 다른 제목", "삼성전자 실적").abs() < f64::EPSILON);
    }

    #[test]
    fn relevance_ratio_empty_query_is_zero() {
        assert!(relevance_ratio("제목", "").abs() < f64::EPSILON);
    }

    #[test]
    fn freshness_decays_by_day_bucket() {
        let today = Utc::now().date_naive();
        assert!((freshness(Some(today)) - 1.0).abs() < f64::EPSILON);
        assert!((freshness(Some(today - Duration::days(5))) - 0.8).abs() < f64::EPSILON);
        assert!((freshness(Some(today - Duration::days(20))) - 0.6).abs() < f64::EPSILON);
        assert!((freshness(Some(today - Duration::days(60))) - 0.4).abs() < f64::EPSILON);
        assert!((freshness(Some(today - Duration::days(365))) - 0.2).abs() < f64::EPSILON);
        assert!((freshness(None) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn title_quality_rewards_clean_titles() {
        let clean = title_quality("적당한 길이의 평범한 기사 제목");
        assert!((clean - 1.0).abs() < f64::EPSILON);
        let shouting = title_quality("충격!! 클릭 유도 제목...");
        assert!(shouting < clean);
    }

    #[test]
    fn score_always_clamped_to_percentage() {
        let sources: Vec<ScoredCandidate> = (0..15)
            .map(|i| make_source(&format!("site{i}.co.kr"), CredibilityTier::High))
            .collect();
        let score = aggregate(&sources, "질의", ScoringMode::Permissive);
        assert!(score <= 100);
    }
}
