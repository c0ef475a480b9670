//! Keyword extraction: normalization, tier classification, synonym expansion.
//!
//! A query is lowercased, stripped of everything outside alphanumerics of
//! the supported scripts, split into tokens, and cleaned of stop-words and
//! single-character tokens. Each surviving token is classified once into a
//! [`KeywordTier`] by the static term tables below. Extraction never fails;
//! an empty keyword set is valid and means "no constrained search".

use crate::types::{Keyword, KeywordBreakdown, KeywordTier};

/// Terms excluded from keyword extraction. Mixed Korean/English because
/// the corpus queries and article titles are.
const STOP_WORDS: &[&str] = &[
    "뉴스", "기사", "보도", "발표", "공개", "확인", "관련", "대한", "에서", "으로", "에게",
    "news", "article", "report", "announced", "confirmed", "related", "about", "the", "an",
    "and", "or", "but",
];

/// Essential-tier terms: named persons, companies, brands, public figures,
/// major cities, countries, marquee events, and sports.
const ESSENTIAL_TERMS: &[&str] = &[
    // Persons
    "윤석열", "문재인", "이재명", "홍준표", "안철수", "심상정",
    // Companies
    "삼성", "lg", "현대", "sk", "롯데", "포스코", "네이버", "카카오", "쿠팡",
    // Brands and products
    "갤럭시", "아이폰", "테슬라", "bmw", "벤츠", "아우디",
    // Public figures and groups
    "bts", "블랙핑크", "손흥민", "이강인", "김민재",
    // Major cities
    "서울", "부산", "대구", "인천", "광주", "대전", "울산", "세종",
    // Countries
    "한국", "미국", "중국", "일본", "러시아", "독일", "프랑스", "영국",
    // Marquee events
    "올림픽", "월드컵", "그랑프리", "아시안게임",
    // Sports
    "f1", "포뮬러", "경기", "축구", "야구", "농구", "배구", "골프", "테니스", "수영",
    "육상", "레이싱", "모터스포츠",
];

/// Important-tier terms: domain category vocabulary.
const IMPORTANT_TERMS: &[&str] = &[
    // Politics
    "대통령", "국회", "정부", "장관", "의원", "선거", "정치", "국정감사",
    // Economy
    "주가", "경제", "금리", "투자", "부동산", "코스피", "달러", "환율",
    // Society and health
    "코로나", "백신", "교육", "의료", "복지", "범죄", "사고",
    // Technology
    "ai", "인공지능", "로봇", "5g", "메타버스", "블록체인", "nft",
];

/// Synonym groups by domain term. A keyword belonging to a group expands
/// to the rest of that group for low-weight relevance matching.
const SYNONYM_GROUPS: &[&[&str]] = &[
    &["대통령", "문재인", "윤석열", "청와대"],
    &["정부", "행정부", "내각", "정권"],
    &["경제", "경기", "금융", "재정"],
    &["코로나", "코비드", "covid", "바이러스", "팬데믹"],
    &["주가", "주식", "증시", "코스피", "코스닥"],
    &["부동산", "집값", "아파트", "주택"],
    &["교육", "학교", "대학", "입시"],
    &["의료", "병원", "의사", "간호사"],
    &["스포츠", "체육", "운동", "경기"],
    &["문화", "예술", "공연", "전시"],
    &["기술", "테크", "it", "디지털"],
    &["환경", "기후", "온실가스", "탄소"],
    &["국제", "해외", "외국", "글로벌"],
    &["사회", "시민", "국민", "민간"],
    &["f1", "포뮬러1", "포뮬러원", "그랑프리", "레이싱", "모터스포츠", "formula1"],
    &["포뮬러", "f1", "포뮬러1", "레이싱", "그랑프리"],
    &["경기", "게임", "시합", "대회", "매치", "라운드"],
    &["레이싱", "f1", "포뮬러", "자동차경주", "모터스포츠"],
    &["그랑프리", "f1", "포뮬러", "레이싱", "gp"],
];

/// Very short tokens that are still meaningful queries on their own.
const AMBIGUOUS_TOKENS: &[&str] = &["f1", "ai", "it"];

/// Ordered keywords extracted from one query: Essential first, then
/// Important, then Optional, each group in original appearance order.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// All keywords in tier order.
    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    pub fn tier(&self, tier: KeywordTier) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter().filter(move |k| k.tier == tier)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.keywords.iter().map(|k| k.text.as_str()).collect()
    }

    /// True when the set contains a token that is very short or in the
    /// ambiguous-token list (e.g. "f1", "ai"). Such sets get a more
    /// lenient inclusion threshold in relevance filtering.
    pub fn has_short_or_ambiguous(&self) -> bool {
        self.keywords.iter().any(|k| {
            k.text.chars().count() <= 2
                || AMBIGUOUS_TOKENS.iter().any(|t| k.text.contains(t))
        })
    }

    pub fn breakdown(&self) -> KeywordBreakdown {
        let texts = |tier| {
            self.tier(tier)
                .map(|k| k.text.clone())
                .collect::<Vec<String>>()
        };
        KeywordBreakdown {
            essential: texts(KeywordTier::Essential),
            important: texts(KeywordTier::Important),
            optional: texts(KeywordTier::Optional),
        }
    }
}

/// Normalize free text for keyword extraction and title matching:
/// lowercase, replace non-alphanumeric characters with spaces, collapse
/// whitespace. Unicode-aware, so Hangul survives alongside Latin.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut last_space = true;
    for c in lowered.chars() {
        if c.is_alphanumeric() {
            out.push(c);
            last_space = false;
        } else if !last_space {
            out.push(' ');
            last_space = true;
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Extract tiered keywords from a raw query. Never fails.
pub fn extract(query: &str) -> KeywordSet {
    let normalized = normalize_text(query);
    let tokens: Vec<&str> = normalized
        .split(' ')
        .filter(|t| t.chars().count() > 1 && !STOP_WORDS.contains(t))
        .collect();

    let mut essential = Vec::new();
    let mut important = Vec::new();
    let mut optional = Vec::new();

    for token in tokens {
        let tier = classify(token);
        let keyword = Keyword {
            text: token.to_string(),
            tier,
            synonyms: synonyms_for(token),
        };
        match tier {
            KeywordTier::Essential => essential.push(keyword),
            KeywordTier::Important => important.push(keyword),
            KeywordTier::Optional => optional.push(keyword),
        }
    }

    let mut keywords = essential;
    keywords.append(&mut important);
    keywords.append(&mut optional);
    tracing::trace!(count = keywords.len(), "keywords extracted");
    KeywordSet { keywords }
}

fn classify(token: &str) -> KeywordTier {
    if ESSENTIAL_TERMS.contains(&token) {
        KeywordTier::Essential
    } else if IMPORTANT_TERMS.contains(&token) {
        KeywordTier::Important
    } else {
        KeywordTier::Optional
    }
}

/// Synonyms for a term from the static groups, excluding the term itself.
/// Returns an empty list for terms outside every group.
pub fn synonyms_for(term: &str) -> Vec<&'static str> {
    for group in SYNONYM_GROUPS {
        if group.contains(&term) {
            return group.iter().copied().filter(|s| *s != term).collect();
        }
    }
    Vec::new()
}
