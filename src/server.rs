//! HTTP surface: `POST /api/verify` and `GET /api/status`.
//!
//! Thin layer over [`Verifier`]: request decoding, rate limiting, and
//! mapping pipeline errors to HTTP status codes with stable JSON bodies.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::VerifyError;
use crate::pipeline::Verifier;
use crate::rate_limit::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<Verifier>,
    pub limiter: Arc<RateLimiter>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub query: String,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/verify", post(verify_handler))
        .route("/api/status", get(status_handler))
        .with_state(state)
}

/// Bind and serve until the listener fails or the task is cancelled.
pub async fn run_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "verification server listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown handler");
    }
}

async fn verify_handler(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> (StatusCode, Json<Value>) {
    if let Err(err) = state.limiter.try_acquire() {
        return error_response(err);
    }
    match state.verifier.verify(&request.query).await {
        Ok(report) => match serde_json::to_value(&report) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(_) => internal_error(),
        },
        Err(err) => error_response(err),
    }
}

async fn status_handler(State(state): State<AppState>) -> Json<Value> {
    let names = state.verifier.provider_names();
    let naver = names.contains(&"naver");
    let google = names.contains(&"google");
    Json(json!({
        "providers": {
            "naver": naver,
            "google": google,
        },
        "configured": !names.is_empty(),
        "timestamp": Utc::now(),
    }))
}

/// Map a pipeline error to its HTTP representation.
///
/// Bodies are stable contracts: clients branch on `error` plus the
/// variant-specific fields, never on prose.
fn error_response(err: VerifyError) -> (StatusCode, Json<Value>) {
    match err {
        VerifyError::EmptyQuery | VerifyError::QueryTooLong(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        ),
        VerifyError::RateLimited { retry_after } => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "rate limit exceeded",
                "retryAfter": retry_after,
            })),
        ),
        VerifyError::NoProviders => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "no search providers configured",
                "configurationNeeded": [
                    "NAVER_CLIENT_ID",
                    "NAVER_CLIENT_SECRET",
                    "GOOGLE_API_KEY",
                    "GOOGLE_CX",
                ],
            })),
        ),
        VerifyError::NoResults { stats, suggestions } => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "no relevant results found",
                "filterStats": stats,
                "suggestions": suggestions,
            })),
        ),
        VerifyError::Http(_) | VerifyError::Parse(_) | VerifyError::Config(_) => internal_error(),
    }
}

fn internal_error() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal verification error" })),
    )
}
