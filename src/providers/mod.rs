//! Concrete news search provider adapters.

pub mod google;
pub mod naver;

pub use google::{GoogleAdapter, GoogleConfig};
pub use naver::{NaverAdapter, NaverConfig};

/// Hosts excluded from every provider's result set: video, social,
/// shopping, and blog platforms that are not news-like sources.
pub(crate) const EXCLUDED_HOSTS: &[&str] = &[
    "youtube.com",
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "shopping.naver.com",
    "auction.co.kr",
    "11st.co.kr",
    "blog.naver.com",
];

/// True when the domain matches the deny list.
pub(crate) fn is_excluded(domain: &str) -> bool {
    EXCLUDED_HOSTS.iter().any(|h| domain.contains(h))
}
