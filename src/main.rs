//! factlens server binary.
//!
//! Reads provider credentials from the environment, builds the verifier,
//! and serves the HTTP API. Providers with missing credentials are
//! skipped with a warning rather than failing startup, so the status
//! endpoint can report what still needs configuring.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use factlens::pipeline::Verifier;
use factlens::provider::NewsProvider;
use factlens::rate_limit::RateLimiter;
use factlens::server::{run_server, AppState};
use factlens::{GoogleAdapter, GoogleConfig, NaverAdapter, NaverConfig, ScoringMode, VerifierConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("factlens=info")),
        )
        .init();

    let mut config = VerifierConfig::default();
    if let Ok(mode) = std::env::var("FACTLENS_SCORING_MODE") {
        config.scoring_mode = ScoringMode::from_name(&mode);
    }

    let mut providers: Vec<Arc<dyn NewsProvider>> = Vec::new();

    match (env_var("NAVER_CLIENT_ID"), env_var("NAVER_CLIENT_SECRET")) {
        (Some(id), Some(secret)) => {
            providers.push(Arc::new(NaverAdapter::new(NaverConfig::new(id, secret))?));
        }
        _ => warn!("NAVER_CLIENT_ID / NAVER_CLIENT_SECRET not set, skipping Naver provider"),
    }

    match (env_var("GOOGLE_API_KEY"), env_var("GOOGLE_CX")) {
        (Some(key), Some(cx)) => {
            providers.push(Arc::new(GoogleAdapter::new(GoogleConfig::new(key, cx))?));
        }
        _ => warn!("GOOGLE_API_KEY / GOOGLE_CX not set, skipping Google provider"),
    }

    if providers.is_empty() {
        warn!("no search providers configured, verify requests will return 503");
    }

    let limiter = Arc::new(RateLimiter::new(
        config.rate_limit_max,
        Duration::from_secs(config.rate_limit_window_secs),
    ));
    let verifier = Arc::new(Verifier::new(config, providers)?);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3003);

    run_server(AppState { verifier, limiter }, port).await
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
