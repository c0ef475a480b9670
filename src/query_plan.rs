//! Query optimization: search strategy selection and variant generation.
//!
//! The extracted keyword set drives a small ordered list of alternate
//! query strings (at most four). The first variant carries the highest
//! priority; adapters that fan out internally use the head of the list.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::keywords::KeywordSet;

/// Terms that mark a query as being about a specific event.
const EVENT_TERMS: &[&str] = &["올림픽", "월드컵", "그랑프리", "아시안게임", "f1", "축제", "대회"];

/// Terms that mark a query as being about a place.
const PLACE_TERMS: &[&str] = &[
    "서울", "부산", "대구", "인천", "광주", "대전", "울산", "세종",
    "한국", "미국", "중국", "일본", "러시아", "독일", "프랑스", "영국",
];

/// Category vocabulary that boosts a keyword's importance weight.
const CATEGORY_TERMS: &[&str] = &[
    // Sports
    "축구", "야구", "농구", "f1", "올림픽", "월드컵", "그랑프리", "gp",
    // Politics
    "대통령", "국회", "정부", "장관", "의원", "선거", "정치",
    // Economy
    "주가", "경제", "금리", "투자", "기업", "삼성", "lg", "현대",
    // Entertainment
    "bts", "블랙핑크", "드라마", "영화", "연예인",
    // Technology
    "ai", "인공지능", "로봇", "스마트폰", "애플", "구글",
];

/// Importance above which a keyword counts toward the targeted strategy.
const TARGETED_IMPORTANCE_THRESHOLD: f64 = 1.5;

/// Maximum number of query variants emitted per plan.
const MAX_VARIANTS: usize = 4;

/// Search strategy selected from the keyword mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// An event keyword co-occurs with a place keyword.
    SpecificEvent,
    /// At least two keywords carry high importance.
    Targeted,
    /// Anything else.
    Broad,
}

/// An ordered set of alternate search queries with the strategy that
/// produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPlan {
    pub strategy: SearchStrategy,
    /// Up to four variants, ordered by priority, duplicates removed.
    pub variants: Vec<String>,
}

/// Importance weight of a single keyword: 1.0 base, +0.5 for a
/// comfortable length, +1.0 for category vocabulary membership.
fn importance(word: &str) -> f64 {
    let mut score = 1.0;
    let len = word.chars().count();
    if (3..=8).contains(&len) {
        score += 0.5;
    }
    if CATEGORY_TERMS
        .iter()
        .any(|t| word.contains(t) || t.contains(word))
    {
        score += 1.0;
    }
    score
}

fn is_event(word: &str) -> bool {
    EVENT_TERMS.contains(&word) || word.ends_with('컵') || word.ends_with("대회")
}

fn is_place(word: &str) -> bool {
    PLACE_TERMS.contains(&word) || word.ends_with('시') || word.ends_with('구')
}

/// Build a query plan from the extracted keywords.
///
/// An empty keyword set yields an empty variant list; callers fall back
/// to the raw query.
pub fn build_plan(keywords: &KeywordSet) -> QueryPlan {
    // Keywords ordered by importance, most important first. Stable sort
    // keeps the tier ordering for equal weights.
    let mut weighted: Vec<&str> = keywords.texts();
    weighted.sort_by(|a, b| {
        importance(b)
            .partial_cmp(&importance(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top: Vec<&str> = weighted.iter().take(MAX_VARIANTS).copied().collect();

    let strategy = select_strategy(keywords);
    let variants = generate_variants(&top, strategy);
    QueryPlan { strategy, variants }
}

fn select_strategy(keywords: &KeywordSet) -> SearchStrategy {
    let has_event = keywords.iter().any(|k| is_event(&k.text));
    let has_place = keywords.iter().any(|k| is_place(&k.text));
    let high_importance = keywords
        .iter()
        .filter(|k| importance(&k.text) > TARGETED_IMPORTANCE_THRESHOLD)
        .count();

    if has_event && has_place {
        SearchStrategy::SpecificEvent
    } else if high_importance >= 2 {
        SearchStrategy::Targeted
    } else {
        SearchStrategy::Broad
    }
}

fn generate_variants(top: &[&str], strategy: SearchStrategy) -> Vec<String> {
    if top.is_empty() {
        return Vec::new();
    }

    let mut variants: Vec<String> = Vec::new();
    match strategy {
        SearchStrategy::SpecificEvent => {
            variants.push(format!("\"{}\" 뉴스", top.join(" ")));
            variants.push(format!("{} 최신", top.join(" AND ")));
            if top.len() >= 2 {
                variants.push(format!("{} {} {}", top[0], top[1], Utc::now().year()));
            }
        }
        SearchStrategy::Targeted => {
            let head = &top[..top.len().min(3)];
            variants.push(format!("{} 뉴스", head.join(" ")));
            if top.len() >= 2 {
                variants.push(format!("\"{}\" {}", top[0], top[1]));
            }
            variants.push(top.join(" OR "));
        }
        SearchStrategy::Broad => {
            variants.push(top.join(" "));
            variants.push(format!("{} 관련", top[0]));
        }
    }

    // Dedup preserving priority order, cap the fan-out volume.
    let mut unique: Vec<String> = Vec::new();
    for v in variants {
        if !unique.contains(&v) {
            unique.push(v);
        }
    }
    unique.truncate(MAX_VARIANTS);
    unique
}
