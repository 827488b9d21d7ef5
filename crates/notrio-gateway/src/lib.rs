// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP/WebSocket gateway for the Notrio notification orchestrator.
//!
//! Serves the notification API, exposes health and Prometheus metrics, and
//! implements [`notrio_core::RealtimeGateway`] over live WebSocket sessions.

pub mod auth;
pub mod handlers;
pub mod registry;
pub mod server;
pub mod ws;

pub use auth::AuthConfig;
pub use registry::{SessionRegistry, WsPushGateway};
pub use server::{GatewayState, HealthState, ServerConfig, start_server};
