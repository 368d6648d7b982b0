//! WebAPI - Webhook HTTP Surface
//!
//! ## Responsibilities
//!
//! - Inbound motion-trigger endpoints (by name / by id)
//! - Camera listing and relay smoke-test endpoints
//! - Shared-token gate and response formatting

mod routes;

pub use routes::create_router;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let controller_configured = state.config.controller_configured();
    let relay_configured = state.config.relay_configured();
    let ok = controller_configured && relay_configured;

    let response = HealthResponse {
        status: if ok { "ok" } else { "unconfigured" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_sec: state.started_at.elapsed().as_secs(),
        controller_configured,
        relay_configured,
    };

    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}
