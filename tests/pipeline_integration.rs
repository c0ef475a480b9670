//! End-to-end pipeline tests with in-process mock providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use factlens::provider::NewsProvider;
use factlens::{Candidate, Result, Verifier, VerifierConfig, VerifyError};

struct MockProvider {
    name: &'static str,
    candidates: Vec<Candidate>,
    calls: Arc<AtomicUsize>,
    fail: bool,
    delay: Option<Duration>,
}

impl MockProvider {
    fn returning(name: &'static str, candidates: Vec<Candidate>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Self {
            name,
            candidates,
            calls: Arc::clone(&calls),
            fail: false,
            delay: None,
        };
        (provider, calls)
    }

    fn failing(name: &'static str) -> Self {
        Self {
            name,
            candidates: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
            fail: true,
            delay: None,
        }
    }

    fn slow(name: &'static str, delay: Duration, candidates: Vec<Candidate>) -> Self {
        Self {
            name,
            candidates,
            calls: Arc::new(AtomicUsize::new(0)),
            fail: false,
            delay: Some(delay),
        }
    }
}

#[async_trait]
impl NewsProvider for MockProvider {
    async fn search(&self, _variants: &[String]) -> Result<Vec<Candidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(VerifyError::Http("simulated outage".into()));
        }
        Ok(self.candidates.clone())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

fn article(title: &str, url: &str, domain: &str) -> Candidate {
    Candidate {
        title: title.to_string(),
        url: url.to_string(),
        domain: domain.to_string(),
        published_date: None,
        description: String::new(),
        provider_score: None,
        provider: "mock".to_string(),
    }
}

fn verifier_with(providers: Vec<Arc<dyn NewsProvider>>) -> Verifier {
    Verifier::new(VerifierConfig::default(), providers).expect("valid config")
}

#[tokio::test]
async fn ranks_full_matches_above_partial_and_keeps_weak_matches_last() {
    let (provider, _) = MockProvider::returning(
        "naver",
        vec![
            article("삼성전자 실적 발표", "https://a.co.kr/1", "a.co.kr"),
            article("F1 시즌 개막 소식", "https://www.yna.co.kr/2", "www.yna.co.kr"),
            article("F1 경기 하이라이트", "https://news.kbs.co.kr/3", "news.kbs.co.kr"),
        ],
    );
    let verifier = verifier_with(vec![Arc::new(provider)]);

    let report = verifier.verify("F1 경기").await.expect("report");

    assert_eq!(report.sources.len(), 3);
    assert_eq!(report.sources[0].candidate.title, "F1 경기 하이라이트");
    assert_eq!(report.sources[1].candidate.title, "F1 시즌 개막 소식");
    // Unrelated title survives the permissive inclusion policy but
    // sorts last with a negative score.
    assert_eq!(report.sources[2].candidate.title, "삼성전자 실적 발표");
    assert!(report.sources[2].relevance_score < 0);
    assert!(report.sources[0].relevance_score > report.sources[1].relevance_score);
    assert!(report.credibility_score > 0);
    assert_eq!(report.filter_stats.original_count, 3);
    assert_eq!(report.search_count, 3);
}

#[tokio::test]
async fn dedups_the_same_article_across_providers() {
    let (naver, _) = MockProvider::returning(
        "naver",
        vec![article(
            "F1 경기 결과",
            "https://www.yna.co.kr/view/AKR1?ref=rss",
            "www.yna.co.kr",
        )],
    );
    let (google, _) = MockProvider::returning(
        "google",
        vec![article(
            "F1 경기 결과",
            "https://www.yna.co.kr/view/AKR1",
            "www.yna.co.kr",
        )],
    );
    let verifier = verifier_with(vec![Arc::new(naver), Arc::new(google)]);

    let report = verifier.verify("F1 경기").await.expect("report");

    assert_eq!(report.search_count, 1);
    // First-seen copy wins; providers are queried in registration order.
    assert_eq!(report.sources[0].candidate.provider, "mock");
    assert_eq!(report.filter_stats.original_count, 2);
    assert_eq!(report.searched_sources, vec!["naver", "google"]);
}

#[tokio::test]
async fn verification_is_deterministic_for_fixed_inputs() {
    let candidates = vec![
        article("F1 경기 분석", "https://www.yna.co.kr/1", "www.yna.co.kr"),
        article("F1 중계 일정", "https://news.sbs.co.kr/2", "news.sbs.co.kr"),
    ];
    let (provider, _) = MockProvider::returning("naver", candidates);
    let verifier = verifier_with(vec![Arc::new(provider)]);

    let first = verifier.verify("F1 경기").await.expect("report");
    let second = verifier.verify("F1 경기").await.expect("report");

    assert_eq!(first.sources, second.sources);
    assert_eq!(first.credibility_score, second.credibility_score);
    assert_eq!(
        first.analysis.verification_status,
        second.analysis.verification_status
    );
}

#[tokio::test]
async fn empty_query_rejected_before_any_provider_call() {
    let (provider, calls) = MockProvider::returning("naver", vec![]);
    let verifier = verifier_with(vec![Arc::new(provider)]);

    let err = verifier.verify("   ").await.expect_err("empty");
    assert!(matches!(err, VerifyError::EmptyQuery));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_query_rejected_before_any_provider_call() {
    let (provider, calls) = MockProvider::returning("naver", vec![]);
    let verifier = verifier_with(vec![Arc::new(provider)]);

    let long_query = "가".repeat(101);
    let err = verifier.verify(&long_query).await.expect_err("too long");
    assert!(matches!(err, VerifyError::QueryTooLong(100)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn no_providers_fails_fast() {
    let verifier = verifier_with(vec![]);
    let err = verifier.verify("F1 경기").await.expect_err("no providers");
    assert!(matches!(err, VerifyError::NoProviders));
}

#[tokio::test]
async fn empty_provider_results_yield_no_results_with_diagnostics() {
    let (provider, _) = MockProvider::returning("naver", vec![]);
    let verifier = verifier_with(vec![Arc::new(provider)]);

    let err = verifier.verify("F1 경기").await.expect_err("no results");
    match err {
        VerifyError::NoResults { stats, suggestions } => {
            assert_eq!(stats.original_count, 0);
            assert_eq!(stats.filtered_count, 0);
            assert_eq!(stats.filter_rate, 0);
            assert!(!suggestions.is_empty());
            assert!(stats.keywords.essential.contains(&"f1".to_string()));
        }
        other => panic!("expected NoResults, got {other:?}"),
    }
}

#[tokio::test]
async fn one_failing_provider_does_not_sink_the_pipeline() {
    let (healthy, _) = MockProvider::returning(
        "naver",
        vec![article("F1 경기 소식", "https://www.yna.co.kr/1", "www.yna.co.kr")],
    );
    let failing = MockProvider::failing("google");
    let verifier = verifier_with(vec![Arc::new(failing), Arc::new(healthy)]);

    let report = verifier.verify("F1 경기").await.expect("report");
    assert_eq!(report.search_count, 1);
    assert_eq!(report.searched_sources, vec!["google", "naver"]);
}

#[tokio::test]
async fn slow_provider_is_timed_out_and_absorbed() {
    let config = VerifierConfig {
        provider_timeout_secs: 1,
        ..Default::default()
    };
    let slow = MockProvider::slow(
        "google",
        Duration::from_secs(10),
        vec![article("늦게 온 결과", "https://late.co.kr/1", "late.co.kr")],
    );
    let (fast, _) = MockProvider::returning(
        "naver",
        vec![article("F1 경기 속보", "https://www.yna.co.kr/1", "www.yna.co.kr")],
    );
    let verifier = Verifier::new(config, vec![Arc::new(slow), Arc::new(fast)]).expect("config");

    let report = verifier.verify("F1 경기").await.expect("report");
    assert_eq!(report.search_count, 1);
    assert_eq!(report.sources[0].candidate.title, "F1 경기 속보");
}

#[tokio::test]
async fn sources_truncated_to_display_cap_but_counts_are_pre_truncation() {
    let candidates: Vec<Candidate> = (0..15)
        .map(|i| {
            article(
                &format!("F1 경기 보도 {i}"),
                &format!("https://site{i}.co.kr/article"),
                &format!("site{i}.co.kr"),
            )
        })
        .collect();
    let (provider, _) = MockProvider::returning("naver", candidates);
    let verifier = verifier_with(vec![Arc::new(provider)]);

    let report = verifier.verify("F1 경기").await.expect("report");
    assert_eq!(report.sources.len(), 10);
    assert_eq!(report.search_count, 15);
    assert_eq!(report.filter_stats.filtered_count, 15);
}

#[tokio::test]
async fn credibility_tiers_assigned_per_source_domain() {
    let (provider, _) = MockProvider::returning(
        "naver",
        vec![
            article("F1 경기 분석", "https://www.yna.co.kr/1", "www.yna.co.kr"),
            article("F1 경기 정리", "https://news.naver.com/2", "news.naver.com"),
            article("F1 경기 후기", "https://unknown-site.com/3", "unknown-site.com"),
        ],
    );
    let verifier = verifier_with(vec![Arc::new(provider)]);

    let report = verifier.verify("F1 경기").await.expect("report");
    let tier_of = |domain: &str| {
        report
            .sources
            .iter()
            .find(|s| s.candidate.domain == domain)
            .map(|s| s.credibility)
            .expect("source present")
    };
    assert_eq!(tier_of("www.yna.co.kr"), factlens::CredibilityTier::High);
    assert_eq!(tier_of("news.naver.com"), factlens::CredibilityTier::Medium);
    assert_eq!(tier_of("unknown-site.com"), factlens::CredibilityTier::Low);
}
