// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across gateway traits and the Notrio orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a notification recipient (a user id in the host system).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipientId(pub String);

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipientId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Category of a system message, used for client-side rendering and filtering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Welcome,
    Security,
    EventReminder,
    System,
}

/// Delivery priority of a system message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessagePriority {
    Low,
    Normal,
    High,
    Urgent,
}

/// Identifies the type of gateway behind a [`crate::traits::GatewayAdapter`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum GatewayType {
    Persistence,
    Email,
    Realtime,
}

/// Health status reported by gateway health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Gateway is fully operational.
    Healthy,
    /// Gateway is operational but experiencing issues.
    Degraded(String),
    /// Gateway is not operational.
    Unhealthy(String),
}

/// The message content of a trio: what gets persisted and pushed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMessage {
    pub title: String,
    pub content: String,
    pub kind: MessageKind,
    pub priority: MessagePriority,
}

/// Transactional email template selection with per-template data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmailTemplate {
    Welcome {
        name: String,
    },
    PasswordResetSuccess {
        name: String,
    },
    EventReminder {
        event_name: String,
        starts_at: DateTime<Utc>,
        location: Option<String>,
    },
    Generic {
        subject: String,
        body: String,
    },
}

/// The single designated email destination of a trio, present only for
/// single-recipient convenience flows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTarget {
    pub address: String,
    pub display_name: String,
    pub template: EmailTemplate,
}

/// A full notification intent: the unit of work accepted by the orchestrator.
///
/// Invariant: `recipients` must be non-empty. Requests violating this are
/// rejected before any stage runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrioRequest {
    pub message: SystemMessage,
    pub recipients: Vec<RecipientId>,
    #[serde(default)]
    pub email_target: Option<EmailTarget>,
}

/// Wall-clock measurements for one trio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrioTimings {
    /// Span from request entry to result return, in milliseconds.
    pub duration_ms: u64,
}

/// The structured outcome of one trio. Always returned, never thrown:
/// terminal stage failures are encoded in `error` with `success = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrioResult {
    pub success: bool,
    /// Stable id of the persisted message record, set once stage 1 succeeds
    /// and the record survives (no rollback).
    pub message_id: Option<String>,
    /// Recipients attempted by the realtime stage, regardless of individual
    /// push outcome.
    pub notifications_sent: usize,
    pub error: Option<String>,
    /// Whether a compensating rollback ran to completion.
    pub rollback_completed: bool,
    pub metrics: TrioTimings,
}

impl TrioResult {
    /// A failure result carrying no persisted record.
    pub fn failure(error: String, rollback_completed: bool, duration_ms: u64) -> Self {
        Self {
            success: false,
            message_id: None,
            notifications_sent: 0,
            error: Some(error),
            rollback_completed,
            metrics: TrioTimings { duration_ms },
        }
    }
}

/// The event body pushed to each recipient's live sessions in stage 3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushPayload {
    pub message_id: String,
    pub title: String,
    pub content: String,
    pub kind: MessageKind,
    pub priority: MessagePriority,
    /// ISO 8601 timestamp of trio creation.
    pub created_at: String,
}

impl PushPayload {
    /// Build the payload for a persisted message, stamped with the current time.
    pub fn for_message(message_id: &str, message: &SystemMessage) -> Self {
        Self {
            message_id: message_id.to_string(),
            title: message.title.clone(),
            content: message.content.clone(),
            kind: message.kind,
            priority: message.priority,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Contact info for a user, as supplied by the host system to the
/// convenience builders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContact {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Summary of an event, as supplied by the host system to the reminder builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub name: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn message_kind_display_and_fromstr_round_trip() {
        for kind in [
            MessageKind::Welcome,
            MessageKind::Security,
            MessageKind::EventReminder,
            MessageKind::System,
        ] {
            let s = kind.to_string();
            assert_eq!(MessageKind::from_str(&s).expect("should parse back"), kind);
        }
    }

    #[test]
    fn message_kind_serializes_snake_case() {
        let json = serde_json::to_string(&MessageKind::EventReminder).unwrap();
        assert_eq!(json, "\"event_reminder\"");
    }

    #[test]
    fn email_template_tagged_serialization() {
        let template = EmailTemplate::Generic {
            subject: "Maintenance window".to_string(),
            body: "Scheduled downtime tonight.".to_string(),
        };
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["kind"], "generic");
        assert_eq!(json["subject"], "Maintenance window");
    }

    #[test]
    fn trio_request_deserializes_without_email_target() {
        let json = r#"{
            "message": {"title": "t", "content": "c", "kind": "system", "priority": "normal"},
            "recipients": ["u1", "u2"]
        }"#;
        let request: TrioRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.recipients.len(), 2);
        assert!(request.email_target.is_none());
    }

    #[test]
    fn push_payload_carries_message_fields() {
        let message = SystemMessage {
            title: "Welcome!".to_string(),
            content: "Glad to have you.".to_string(),
            kind: MessageKind::Welcome,
            priority: MessagePriority::Normal,
        };
        let payload = PushPayload::for_message("msg-1", &message);
        assert_eq!(payload.message_id, "msg-1");
        assert_eq!(payload.title, "Welcome!");
        assert_eq!(payload.kind, MessageKind::Welcome);
        assert!(!payload.created_at.is_empty());
    }
}
