// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Notrio notification orchestrator.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Notrio workspace. Gateway adapters
//! (SQLite store, SMTP mailer, WebSocket push) implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::NotrioError;
pub use types::{
    EmailTarget, EmailTemplate, GatewayType, HealthStatus, MessageKind, MessagePriority,
    PushPayload, RecipientId, SystemMessage, TrioRequest, TrioResult, TrioTimings,
};

// Re-export all gateway traits at crate root.
pub use traits::{EmailGateway, GatewayAdapter, PersistenceGateway, RealtimeGateway};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notrio_error_has_all_variants() {
        // Verify all 8 error variants exist and can be constructed.
        let _validation = NotrioError::Validation("test".into());
        let _storage = NotrioError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _email = NotrioError::Email {
            message: "test".into(),
            source: None,
        };
        let _realtime = NotrioError::Realtime {
            message: "test".into(),
            source: None,
        };
        let _timeout = NotrioError::Timeout {
            stage: "Email".into(),
            timeout: std::time::Duration::from_millis(100),
        };
        let _exhausted = NotrioError::RetryExhausted {
            stage: "Email".into(),
            attempts: 2,
            source: Box::new(NotrioError::email("test")),
        };
        let _config = NotrioError::Config("test".into());
        let _internal = NotrioError::Internal("test".into());
    }

    #[test]
    fn gateway_type_has_three_variants() {
        use std::str::FromStr;

        let variants = [
            GatewayType::Persistence,
            GatewayType::Email,
            GatewayType::Realtime,
        ];
        assert_eq!(variants.len(), 3, "GatewayType must have exactly 3 variants");

        // Verify Display and FromStr round-trip for all variants.
        for variant in &variants {
            let s = variant.to_string();
            let parsed = GatewayType::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn health_status_variants() {
        let healthy = HealthStatus::Healthy;
        let degraded = HealthStatus::Degraded("slow".into());
        let unhealthy = HealthStatus::Unhealthy("down".into());

        assert_eq!(healthy, HealthStatus::Healthy);
        assert_ne!(degraded, healthy);
        assert_ne!(unhealthy, healthy);
    }

    #[test]
    fn all_gateway_trait_modules_are_exported() {
        // Verifies the gateway traits compile and are accessible through the
        // public API. If any module is missing, this test won't compile.
        fn _assert_gateway_adapter<T: GatewayAdapter>() {}
        fn _assert_persistence_gateway<T: PersistenceGateway>() {}
        fn _assert_email_gateway<T: EmailGateway>() {}
        fn _assert_realtime_gateway<T: RealtimeGateway>() {}
    }
}
