// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Notrio notification orchestrator.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Notrio configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NotrioConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Per-channel stage deadlines.
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Per-channel retry attempt budgets.
    #[serde(default)]
    pub retries: RetryConfig,

    /// Feature toggles.
    #[serde(default)]
    pub features: FeatureConfig,

    /// Message store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// SMTP relay settings for the email gateway.
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// HTTP/WebSocket gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Display name of the service instance.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "notrio".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Per-channel stage deadlines, in milliseconds.
///
/// Each value bounds a single attempt of the corresponding stage; a deadline
/// miss is treated identically to a stage error for retry accounting.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimeoutConfig {
    /// Deadline for one email dispatch attempt.
    #[serde(default = "default_email_timeout_ms")]
    pub email_ms: u64,

    /// Deadline for one persistence attempt.
    #[serde(default = "default_database_timeout_ms")]
    pub database_ms: u64,

    /// Deadline for one realtime push attempt.
    #[serde(default = "default_websocket_timeout_ms")]
    pub websocket_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            email_ms: default_email_timeout_ms(),
            database_ms: default_database_timeout_ms(),
            websocket_ms: default_websocket_timeout_ms(),
        }
    }
}

fn default_email_timeout_ms() -> u64 {
    5000
}

fn default_database_timeout_ms() -> u64 {
    2000
}

fn default_websocket_timeout_ms() -> u64 {
    1000
}

/// Per-channel retry attempt budgets. Each count is total attempts, not
/// retries after the first, and must be at least 1.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    /// Total attempts for the email stage.
    #[serde(default = "default_email_retries")]
    pub email: u32,

    /// Total attempts for the persistence stage.
    #[serde(default = "default_database_retries")]
    pub database: u32,

    /// Total attempts for each realtime push.
    #[serde(default = "default_websocket_retries")]
    pub websocket: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            email: default_email_retries(),
            database: default_database_retries(),
            websocket: default_websocket_retries(),
        }
    }
}

fn default_email_retries() -> u32 {
    2
}

fn default_database_retries() -> u32 {
    3
}

fn default_websocket_retries() -> u32 {
    2
}

/// Feature toggles.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureConfig {
    /// When false, the compensating delete after a terminal email failure is
    /// skipped; the failure is still reported in the trio result.
    #[serde(default = "default_enable_rollback")]
    pub enable_rollback: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            enable_rollback: default_enable_rollback(),
        }
    }
}

fn default_enable_rollback() -> bool {
    true
}

/// Message store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("notrio").join("notrio.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("notrio.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// SMTP relay configuration for the email gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SmtpConfig {
    /// SMTP relay hostname.
    #[serde(default = "default_smtp_host")]
    pub host: String,

    /// SMTP relay port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// SMTP username. `None` disables authentication.
    #[serde(default)]
    pub username: Option<String>,

    /// SMTP password.
    #[serde(default)]
    pub password: Option<String>,

    /// Envelope sender address.
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Envelope sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
            from_address: default_from_address(),
            from_name: default_from_name(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "no-reply@localhost".to_string()
}

fn default_from_name() -> String {
    "Notrio".to_string()
}

/// HTTP/WebSocket gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bearer token for the notification API. `None` disables the
    /// authenticated routes (fail-closed).
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            bearer_token: None,
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8090
}
