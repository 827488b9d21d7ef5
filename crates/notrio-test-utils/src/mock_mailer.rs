// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock email gateway for deterministic testing.
//!
//! `MockMailer` implements `EmailGateway` with scripted failures, optional
//! per-call latency, and captured sends for assertion in tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use notrio_core::NotrioError;
use notrio_core::traits::adapter::GatewayAdapter;
use notrio_core::traits::email::EmailGateway;
use notrio_core::types::{GatewayType, HealthStatus};

/// An email captured by a successful send call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Which template method was invoked: `welcome`,
    /// `password_reset_success`, `event_reminder`, or `generic`.
    pub template: String,
    pub address: String,
    pub display_name: String,
}

/// A mock transactional mailer for testing.
pub struct MockMailer {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    send_calls: AtomicU32,
    scripted_failures: AtomicU32,
    fail_all: AtomicBool,
    send_delay: Mutex<Option<Duration>>,
}

impl MockMailer {
    /// Create a new mock mailer that accepts every send.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            send_calls: AtomicU32::new(0),
            scripted_failures: AtomicU32::new(0),
            fail_all: AtomicBool::new(false),
            send_delay: Mutex::new(None),
        }
    }

    /// Make the next `n` send calls fail before succeeding again.
    pub fn fail_next_sends(&self, n: u32) {
        self.scripted_failures.store(n, Ordering::SeqCst);
    }

    /// Make every send call fail.
    pub fn fail_all_sends(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    /// Delay every send call by `delay` before responding.
    pub async fn set_send_delay(&self, delay: Duration) {
        *self.send_delay.lock().await = Some(delay);
    }

    /// Emails captured by successful send calls.
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }

    /// Total send calls across all templates, including failed attempts.
    pub fn send_calls(&self) -> u32 {
        self.send_calls.load(Ordering::SeqCst)
    }

    async fn dispatch(
        &self,
        template: &str,
        address: &str,
        display_name: &str,
    ) -> Result<(), NotrioError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = *self.send_delay.lock().await {
            tokio::time::sleep(delay).await;
        }

        if self.fail_all.load(Ordering::SeqCst)
            || self
                .scripted_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        {
            return Err(NotrioError::email("Email service unavailable"));
        }

        self.sent.lock().await.push(SentEmail {
            template: template.to_string(),
            address: address.to_string(),
            display_name: display_name.to_string(),
        });
        Ok(())
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayAdapter for MockMailer {
    fn name(&self) -> &str {
        "mock-mailer"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn gateway_type(&self) -> GatewayType {
        GatewayType::Email
    }

    async fn health_check(&self) -> Result<HealthStatus, NotrioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NotrioError> {
        Ok(())
    }
}

#[async_trait]
impl EmailGateway for MockMailer {
    async fn send_welcome(
        &self,
        address: &str,
        display_name: &str,
        _name: &str,
    ) -> Result<(), NotrioError> {
        self.dispatch("welcome", address, display_name).await
    }

    async fn send_password_reset_success(
        &self,
        address: &str,
        display_name: &str,
        _name: &str,
    ) -> Result<(), NotrioError> {
        self.dispatch("password_reset_success", address, display_name)
            .await
    }

    async fn send_event_reminder(
        &self,
        address: &str,
        display_name: &str,
        _event_name: &str,
        _starts_at: DateTime<Utc>,
        _location: Option<&str>,
    ) -> Result<(), NotrioError> {
        self.dispatch("event_reminder", address, display_name).await
    }

    async fn send_generic(
        &self,
        address: &str,
        display_name: &str,
        _subject: &str,
        _body: &str,
    ) -> Result<(), NotrioError> {
        self.dispatch("generic", address, display_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn successful_send_is_captured() {
        let mailer = MockMailer::new();
        mailer
            .send_welcome("a@b.com", "Alice", "Alice")
            .await
            .unwrap();

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].template, "welcome");
        assert_eq!(sent[0].address, "a@b.com");
    }

    #[tokio::test]
    async fn scripted_failures_then_success() {
        let mailer = MockMailer::new();
        mailer.fail_next_sends(1);

        assert!(mailer.send_generic("a@b.com", "A", "s", "b").await.is_err());
        assert!(mailer.send_generic("a@b.com", "A", "s", "b").await.is_ok());
        assert_eq!(mailer.send_calls(), 2);
        assert_eq!(mailer.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn fail_all_rejects_every_template() {
        let mailer = MockMailer::new();
        mailer.fail_all_sends();

        assert!(mailer.send_welcome("a@b.com", "A", "A").await.is_err());
        assert!(
            mailer
                .send_password_reset_success("a@b.com", "A", "A")
                .await
                .is_err()
        );
        assert!(mailer.sent().await.is_empty());
    }
}
