// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./notrio.toml` > `~/.config/notrio/notrio.toml` > `/etc/notrio/notrio.toml`
//! with environment variable overrides via `NOTRIO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::NotrioConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/notrio/notrio.toml` (system-wide)
/// 3. `~/.config/notrio/notrio.toml` (user XDG config)
/// 4. `./notrio.toml` (local directory)
/// 5. `NOTRIO_*` environment variables
pub fn load_config() -> Result<NotrioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NotrioConfig::default()))
        .merge(Toml::file("/etc/notrio/notrio.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("notrio/notrio.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("notrio.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<NotrioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NotrioConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<NotrioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(NotrioConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `NOTRIO_STORAGE_DATABASE_PATH` must map
/// to `storage.database_path`, not `storage.database.path`.
fn env_provider() -> Env {
    Env::prefixed("NOTRIO_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: NOTRIO_SMTP_FROM_ADDRESS -> "smtp_from_address"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("service_", "service.", 1)
            .replacen("timeouts_", "timeouts.", 1)
            .replacen("retries_", "retries.", 1)
            .replacen("features_", "features.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("smtp_", "smtp.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
