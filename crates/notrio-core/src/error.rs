// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Notrio notification orchestrator.

use thiserror::Error;

/// The primary error type used across all Notrio gateway traits and core operations.
#[derive(Debug, Error)]
pub enum NotrioError {
    /// Request validation errors (empty recipient set, malformed addresses).
    #[error("validation error: {0}")]
    Validation(String),

    /// Persistence gateway errors (database connection, query failure, missing record).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Email gateway errors (SMTP connection, rejected message, template failure).
    #[error("email error: {message}")]
    Email {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Realtime gateway errors (no live session, closed connection, send failure).
    #[error("realtime error: {message}")]
    Realtime {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A single stage attempt exceeded its deadline.
    #[error("{stage} timeout after {}ms", timeout.as_millis())]
    Timeout {
        stage: String,
        timeout: std::time::Duration,
    },

    /// A stage exhausted its retry budget. Wraps the last attempt's cause.
    #[error("{stage} failed after {attempts} attempts: {source}")]
    RetryExhausted {
        stage: String,
        attempts: u32,
        source: Box<NotrioError>,
    },

    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl NotrioError {
    /// Shorthand for an email gateway error without an underlying source.
    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a realtime gateway error without an underlying source.
    pub fn realtime(message: impl Into<String>) -> Self {
        Self::Realtime {
            message: message.into(),
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn timeout_message_names_stage_and_millis() {
        let err = NotrioError::Timeout {
            stage: "Email".to_string(),
            timeout: Duration::from_millis(100),
        };
        assert_eq!(err.to_string(), "Email timeout after 100ms");
    }

    #[test]
    fn retry_exhausted_message_embeds_attempts_and_cause() {
        let err = NotrioError::RetryExhausted {
            stage: "Email".to_string(),
            attempts: 2,
            source: Box::new(NotrioError::email("SMTP connection refused")),
        };
        let text = err.to_string();
        assert!(text.starts_with("Email failed after 2 attempts:"));
        assert!(text.contains("SMTP connection refused"));
    }

    #[test]
    fn exhausted_timeout_cause_renders_both_layers() {
        let err = NotrioError::RetryExhausted {
            stage: "Database".to_string(),
            attempts: 3,
            source: Box::new(NotrioError::Timeout {
                stage: "Database".to_string(),
                timeout: Duration::from_millis(2000),
            }),
        };
        assert_eq!(
            err.to_string(),
            "Database failed after 3 attempts: Database timeout after 2000ms"
        );
    }
}
