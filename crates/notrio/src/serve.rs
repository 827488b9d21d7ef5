// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring for the `notrio serve` command: construct the gateway adapters,
//! assemble the orchestrator, and run the HTTP/WebSocket server.

use std::sync::Arc;

use notrio_config::NotrioConfig;
use notrio_core::NotrioError;
use notrio_email::SmtpMailer;
use notrio_gateway::{
    AuthConfig, GatewayState, HealthState, ServerConfig, SessionRegistry, WsPushGateway,
    start_server,
};
use notrio_orchestrator::{DeliverySettings, MetricsRegistry, TrioOrchestrator};
use notrio_storage::SqliteStore;

/// Run the orchestrator service until the server exits.
pub async fn run(config: NotrioConfig) -> Result<(), NotrioError> {
    let prometheus = match notrio_prometheus::install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "continuing without Prometheus exporter");
            None
        }
    };

    let store = Arc::new(SqliteStore::new(config.storage.clone()));
    store.initialize().await?;

    let mailer = Arc::new(SmtpMailer::new(&config.smtp)?);

    let registry = Arc::new(SessionRegistry::new());
    let pusher = Arc::new(WsPushGateway::new(registry.clone()));

    let metrics = Arc::new(MetricsRegistry::new());
    let orchestrator = Arc::new(TrioOrchestrator::new(
        store,
        mailer,
        pusher,
        metrics,
        DeliverySettings::from_config(&config),
    ));

    if config.gateway.bearer_token.is_none() {
        tracing::warn!(
            "gateway.bearer_token is not set; POST /v1/notifications will reject all requests"
        );
    }

    let state = GatewayState {
        orchestrator,
        registry,
        auth: AuthConfig {
            bearer_token: config.gateway.bearer_token.clone(),
        },
        health: HealthState {
            start_time: std::time::Instant::now(),
            prometheus_render: prometheus.map(|handle| {
                Arc::new(move || handle.render()) as Arc<dyn Fn() -> String + Send + Sync>
            }),
        },
    };

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    start_server(&server_config, state).await
}
