// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use notrio_core::NotrioError;
use notrio_orchestrator::TrioOrchestrator;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;
use crate::registry::SessionRegistry;
use crate::ws;

/// Health state for the unauthenticated health/metrics endpoints.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
    /// Optional Prometheus metrics render function.
    pub prometheus_render: Option<Arc<dyn Fn() -> String + Send + Sync>>,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The trio orchestrator behind POST /v1/notifications.
    pub orchestrator: Arc<TrioOrchestrator>,
    /// Live WebSocket session registry, shared with the push gateway.
    pub registry: Arc<SessionRegistry>,
    /// Authentication configuration.
    pub auth: AuthConfig,
    /// Health state for unauthenticated endpoints.
    pub health: HealthState,
}

/// Gateway server configuration (mirrors GatewayConfig from notrio-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Start the gateway HTTP/WebSocket server.
///
/// Binds to the configured host:port and serves:
/// - GET /health, GET /metrics (public)
/// - POST /v1/notifications (bearer auth)
/// - GET /ws (auth via query params during handshake, not middleware)
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), NotrioError> {
    let auth_state = state.auth.clone();

    // Unauthenticated public routes (health + metrics for systemd and Prometheus).
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/metrics", get(handlers::get_metrics))
        .with_state(state.clone());

    // Routes requiring authentication.
    let api_routes = Router::new()
        .route("/v1/notifications", post(handlers::post_notifications))
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(state.clone());

    // WebSocket route (auth happens during handshake, not via middleware).
    let ws_routes = Router::new()
        .route("/ws", get(ws::ws_handler))
        .with_state(state);

    let app = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .merge(ws_routes)
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| NotrioError::Realtime {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| NotrioError::Realtime {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use notrio_orchestrator::{DeliverySettings, MetricsRegistry};
    use notrio_test_utils::{MockMailer, MockPusher, MockStore};

    fn test_state() -> GatewayState {
        let orchestrator = Arc::new(TrioOrchestrator::new(
            Arc::new(MockStore::new()),
            Arc::new(MockMailer::new()),
            Arc::new(MockPusher::new()),
            Arc::new(MetricsRegistry::new()),
            DeliverySettings::default(),
        ));
        GatewayState {
            orchestrator,
            registry: Arc::new(SessionRegistry::new()),
            auth: AuthConfig { bearer_token: None },
            health: HealthState {
                start_time: std::time::Instant::now(),
                prometheus_render: None,
            },
        }
    }

    #[test]
    fn gateway_state_is_clone() {
        let state = test_state();
        let _cloned = state.clone();
    }

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8090,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
