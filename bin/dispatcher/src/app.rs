//! The scheduler-facing HTTP surface.
//!
//! `POST /invoke` carries one trigger firing; the response body is always the
//! dispatch report. The HTTP status encodes the retry contract for external
//! schedulers: 400 means the payload is bad and re-firing cannot help, 502
//! means the failure may be transient.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use tradebeat_dispatch::{DispatchReport, Dispatcher, InvocationRequest};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/invoke", post(invoke))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn invoke(
    State(state): State<AppState>,
    Json(request): Json<InvocationRequest>,
) -> (StatusCode, Json<DispatchReport>) {
    let report = state.dispatcher.handle(request).await;

    let status = match report.error_kind {
        None => StatusCode::OK,
        Some(kind) if kind.retryable() => StatusCode::BAD_GATEWAY,
        Some(_) => StatusCode::BAD_REQUEST,
    };

    (status, Json(report))
}

async fn healthz() -> &'static str {
    "ok"
}
