// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as minimum retry budgets and non-zero deadlines.

use crate::diagnostic::ConfigError;
use crate::model::NotrioConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &NotrioConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // Retry budgets are total attempt counts and must be at least 1.
    for (key, value) in [
        ("retries.email", config.retries.email),
        ("retries.database", config.retries.database),
        ("retries.websocket", config.retries.websocket),
    ] {
        if value < 1 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be at least 1, got {value}"),
            });
        }
    }

    // Stage deadlines must be positive.
    for (key, value) in [
        ("timeouts.email_ms", config.timeouts.email_ms),
        ("timeouts.database_ms", config.timeouts.database_ms),
        ("timeouts.websocket_ms", config.timeouts.websocket_ms),
    ] {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be greater than 0"),
            });
        }
    }

    // Validate database_path is not empty.
    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // Validate gateway host is not empty and parses as an IP or hostname.
    let host = config.gateway.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("gateway.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Validate SMTP settings.
    if config.smtp.port == 0 {
        errors.push(ConfigError::Validation {
            message: "smtp.port must be greater than 0".to_string(),
        });
    }
    if config.smtp.from_address.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "smtp.from_address must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = NotrioConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_retry_budget_fails_validation() {
        let mut config = NotrioConfig::default();
        config.retries.email = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("retries.email")
        )));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = NotrioConfig::default();
        config.timeouts.database_ms = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("timeouts.database_ms")
        )));
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = NotrioConfig::default();
        config.storage.database_path = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigError::Validation { message } if message.contains("database_path")
        )));
    }

    #[test]
    fn multiple_errors_are_collected() {
        let mut config = NotrioConfig::default();
        config.retries.email = 0;
        config.retries.database = 0;
        config.timeouts.websocket_ms = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = NotrioConfig::default();
        config.gateway.host = "0.0.0.0".to_string();
        config.storage.database_path = "/tmp/test.db".to_string();
        config.retries.email = 5;
        config.timeouts.email_ms = 250;
        assert!(validate_config(&config).is_ok());
    }
}
