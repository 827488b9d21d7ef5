// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /v1/notifications, GET /health, GET /metrics.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use notrio_core::{TrioRequest, TrioResult};
use notrio_orchestrator::MetricsSnapshot;

use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
    /// Current trio counters.
    pub trios: MetricsSnapshot,
}

/// POST /v1/notifications: run one trio and return its structured result.
///
/// The orchestrator never errors; the HTTP status reflects the result:
/// 200 for a completed trio, 400 for a validation rejection, 502 when a
/// stage exhausted its retry budget.
pub async fn post_notifications(
    State(state): State<GatewayState>,
    Json(request): Json<TrioRequest>,
) -> (StatusCode, Json<TrioResult>) {
    if request.recipients.is_empty() {
        let result = state.orchestrator.create_trio(request).await;
        return (StatusCode::BAD_REQUEST, Json(result));
    }

    let result = state.orchestrator.create_trio(request).await;
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(result))
}

/// GET /health (public): liveness plus trio counters.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        trios: state.orchestrator.metrics().snapshot(),
    })
}

/// GET /metrics (public): Prometheus exposition format.
pub async fn get_metrics(State(state): State<GatewayState>) -> Response {
    match &state.health.prometheus_render {
        Some(render) => render().into_response(),
        None => (StatusCode::NOT_FOUND, "metrics exporter not installed").into_response(),
    }
}
