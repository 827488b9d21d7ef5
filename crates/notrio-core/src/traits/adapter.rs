// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all gateway implementations must implement.

use async_trait::async_trait;

use crate::error::NotrioError;
use crate::types::{GatewayType, HealthStatus};

/// The base trait for all Notrio gateway adapters.
///
/// Every gateway (persistence, email, realtime) must implement this trait,
/// which provides identity, lifecycle, and health check capabilities.
#[async_trait]
pub trait GatewayAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this gateway instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this gateway.
    fn version(&self) -> semver::Version;

    /// Returns the type of gateway (persistence, email, realtime).
    fn gateway_type(&self) -> GatewayType;

    /// Performs a health check and returns the gateway's current status.
    async fn health_check(&self) -> Result<HealthStatus, NotrioError>;

    /// Gracefully shuts down the gateway, releasing any held resources.
    async fn shutdown(&self) -> Result<(), NotrioError>;
}
