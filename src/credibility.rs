//! Domain credibility classification via static reputation tables.
//!
//! Pure function of the source domain — no network calls. Wire services,
//! national broadcasters, and major dailies rate High; large portals and
//! business outlets Medium; everything else Low.

use crate::types::CredibilityTier;

const HIGH_DOMAINS: &[&str] = &[
    "yonhapnews.co.kr",
    "yna.co.kr",
    "kbs.co.kr",
    "mbc.co.kr",
    "sbs.co.kr",
    "chosun.com",
    "donga.com",
    "joongang.co.kr",
    "hani.co.kr",
    "khan.co.kr",
    "bbc.com",
    "cnn.com",
    "reuters.com",
    "ap.org",
    "nytimes.com",
];

const MEDIUM_DOMAINS: &[&str] = &[
    "naver.com",
    "daum.net",
    "mk.co.kr",
    "mt.co.kr",
    "etnews.com",
    "newsis.com",
    "news1.kr",
    "edaily.co.kr",
];

/// Classify a source domain into a credibility tier.
///
/// The longest matching table entry wins, so a subdomain of a listed
/// outlet classifies like the outlet while an ambiguous shorter match
/// cannot shadow a more specific one.
pub fn classify(domain: &str) -> CredibilityTier {
    let mut best: Option<(usize, CredibilityTier)> = None;
    let mut consider = |entry: &str, tier: CredibilityTier| {
        if domain.contains(entry) && best.is_none_or(|(len, _)| entry.len() > len) {
            best = Some((entry.len(), tier));
        }
    };
    for entry in HIGH_DOMAINS {
        consider(entry, CredibilityTier::High);
    }
    for entry in MEDIUM_DOMAINS {
        consider(entry, CredibilityTier::Medium);
    }
    best.map_or(CredibilityTier::Low, |(_, tier)| tier)
}
