// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Convenience builders for the common single-recipient trio flows.
//!
//! Each builder populates a [`TrioRequest`] with a preset message kind,
//! priority, and email template, then delegates to
//! [`TrioOrchestrator::create_trio`]. Multi-recipient, email-less broadcasts
//! use the generic `create_trio` entry point directly.

use notrio_core::types::{EventSummary, UserContact};
use notrio_core::{
    EmailTarget, EmailTemplate, MessageKind, MessagePriority, RecipientId, SystemMessage,
    TrioRequest, TrioResult,
};

use crate::trio::TrioOrchestrator;

impl TrioOrchestrator {
    /// Welcome a newly registered user: persisted message, welcome email,
    /// realtime push to their session.
    pub async fn create_welcome_trio(
        &self,
        email: &str,
        name: &str,
        user_id: &str,
    ) -> TrioResult {
        let request = TrioRequest {
            message: SystemMessage {
                title: "Welcome!".to_string(),
                content: format!("Hi {name}, your account is ready to use."),
                kind: MessageKind::Welcome,
                priority: MessagePriority::Normal,
            },
            recipients: vec![RecipientId::from(user_id)],
            email_target: Some(EmailTarget {
                address: email.to_string(),
                display_name: name.to_string(),
                template: EmailTemplate::Welcome {
                    name: name.to_string(),
                },
            }),
        };
        self.create_trio(request).await
    }

    /// Confirm a completed password reset.
    pub async fn create_password_reset_success_trio(
        &self,
        email: &str,
        name: &str,
        user_id: &str,
    ) -> TrioResult {
        let request = TrioRequest {
            message: SystemMessage {
                title: "Password changed".to_string(),
                content: format!(
                    "Hi {name}, your password was reset successfully. \
                     If this wasn't you, contact support immediately."
                ),
                kind: MessageKind::Security,
                priority: MessagePriority::High,
            },
            recipients: vec![RecipientId::from(user_id)],
            email_target: Some(EmailTarget {
                address: email.to_string(),
                display_name: name.to_string(),
                template: EmailTemplate::PasswordResetSuccess {
                    name: name.to_string(),
                },
            }),
        };
        self.create_trio(request).await
    }

    /// Remind a registered attendee of an upcoming event.
    pub async fn create_event_reminder_trio(
        &self,
        event: &EventSummary,
        user: &UserContact,
    ) -> TrioResult {
        let when = event.starts_at.format("%Y-%m-%d %H:%M UTC");
        let content = match &event.location {
            Some(location) => {
                format!("{} starts at {when} at {location}.", event.name)
            }
            None => format!("{} starts at {when}.", event.name),
        };

        let request = TrioRequest {
            message: SystemMessage {
                title: format!("Reminder: {}", event.name),
                content,
                kind: MessageKind::EventReminder,
                priority: MessagePriority::High,
            },
            recipients: vec![RecipientId(user.id.clone())],
            email_target: Some(EmailTarget {
                address: user.email.clone(),
                display_name: user.display_name.clone(),
                template: EmailTemplate::EventReminder {
                    event_name: event.name.clone(),
                    starts_at: event.starts_at,
                    location: event.location.clone(),
                },
            }),
        };
        self.create_trio(request).await
    }
}
