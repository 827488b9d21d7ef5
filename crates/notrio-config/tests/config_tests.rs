// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Notrio configuration system.

use notrio_config::diagnostic::ConfigError;
use notrio_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_notrio_config() {
    let toml = r#"
[service]
name = "notrio-test"
log_level = "debug"

[timeouts]
email_ms = 3000
database_ms = 1500
websocket_ms = 500

[retries]
email = 4
database = 2
websocket = 1

[features]
enable_rollback = false

[storage]
database_path = "/tmp/notrio-test.db"
wal_mode = false

[smtp]
host = "smtp.example.com"
port = 465
username = "mailer"
password = "secret"
from_address = "no-reply@example.com"
from_name = "Example"

[gateway]
host = "0.0.0.0"
port = 9000
bearer_token = "tok-123"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.service.name, "notrio-test");
    assert_eq!(config.service.log_level, "debug");
    assert_eq!(config.timeouts.email_ms, 3000);
    assert_eq!(config.timeouts.database_ms, 1500);
    assert_eq!(config.timeouts.websocket_ms, 500);
    assert_eq!(config.retries.email, 4);
    assert_eq!(config.retries.database, 2);
    assert_eq!(config.retries.websocket, 1);
    assert!(!config.features.enable_rollback);
    assert_eq!(config.storage.database_path, "/tmp/notrio-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.smtp.host, "smtp.example.com");
    assert_eq!(config.smtp.port, 465);
    assert_eq!(config.smtp.username.as_deref(), Some("mailer"));
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.gateway.bearer_token.as_deref(), Some("tok-123"));
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.service.name, "notrio");
    assert_eq!(config.service.log_level, "info");
    assert_eq!(config.timeouts.email_ms, 5000);
    assert_eq!(config.retries.database, 3);
    assert!(config.features.enable_rollback);
    assert!(config.smtp.username.is_none());
    assert!(config.gateway.bearer_token.is_none());
}

/// Unknown field in a section produces an UnknownKey diagnostic with a suggestion.
#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[timeouts]
emal_ms = 100
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "emal_ms" && suggestion.as_deref() == Some("email_ms")
    )));
}

/// Semantic validation runs after successful deserialization.
#[test]
fn zero_retries_rejected_by_validation() {
    let toml = r#"
[retries]
database = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero retries should fail");
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::Validation { message } if message.contains("retries.database")
    )));
}

/// A type mismatch surfaces as an InvalidType diagnostic.
#[test]
fn wrong_type_produces_invalid_type_error() {
    let toml = r#"
[retries]
email = "two"
"#;

    let errors = load_and_validate_str(toml).expect_err("string retry count should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_))),
        "expected a type error, got: {errors:?}"
    );
}
