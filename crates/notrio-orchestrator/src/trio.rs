// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The trio orchestrator: one durable message record, at most one
//! transactional email, and a realtime push to every recipient, coordinated
//! as a single logical operation.
//!
//! Stage ordering is strict: persistence must complete before email (the
//! rollback needs a valid id), and email must complete before fan-out (the
//! fan-out must not run against a record that may still be rolled back).
//! `create_trio` never returns an error; every terminal failure is encoded
//! in the [`TrioResult`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, error, info, trace, warn};

use notrio_config::NotrioConfig;
use notrio_core::{
    EmailGateway, EmailTarget, EmailTemplate, PersistenceGateway, PushPayload, RealtimeGateway,
    TrioRequest, TrioResult, TrioTimings,
};
use notrio_resilience::{RetryExecutor, RetryPolicy};

use crate::metrics::MetricsRegistry;
use crate::state::TrioState;

/// Retry budgets, per-attempt deadlines, and the rollback toggle, snapshotted
/// from configuration at construction time.
#[derive(Debug, Clone, Copy)]
pub struct DeliverySettings {
    pub database: RetryPolicy,
    pub email: RetryPolicy,
    pub websocket: RetryPolicy,
    pub enable_rollback: bool,
}

impl DeliverySettings {
    pub fn from_config(config: &NotrioConfig) -> Self {
        Self {
            database: RetryPolicy::new(
                config.retries.database,
                Duration::from_millis(config.timeouts.database_ms),
            ),
            email: RetryPolicy::new(
                config.retries.email,
                Duration::from_millis(config.timeouts.email_ms),
            ),
            websocket: RetryPolicy::new(
                config.retries.websocket,
                Duration::from_millis(config.timeouts.websocket_ms),
            ),
            enable_rollback: config.features.enable_rollback,
        }
    }
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self::from_config(&NotrioConfig::default())
    }
}

/// What the compensating rollback actually did.
struct RollbackOutcome {
    /// The rollback routine ran (counts toward the rollback metric).
    invoked: bool,
    /// The routine ran to completion: either the delete succeeded or there
    /// was nothing to delete.
    completed: bool,
}

/// Sequences the three stages of a trio, decides rollback, aggregates the
/// result, and updates the metrics registry.
///
/// Constructed once at process start with its gateway dependencies injected;
/// holds no global state and is cheap to share behind an `Arc`.
pub struct TrioOrchestrator {
    persistence: Arc<dyn PersistenceGateway>,
    email: Arc<dyn EmailGateway>,
    realtime: Arc<dyn RealtimeGateway>,
    metrics: Arc<MetricsRegistry>,
    settings: DeliverySettings,
}

impl TrioOrchestrator {
    pub fn new(
        persistence: Arc<dyn PersistenceGateway>,
        email: Arc<dyn EmailGateway>,
        realtime: Arc<dyn RealtimeGateway>,
        metrics: Arc<MetricsRegistry>,
        settings: DeliverySettings,
    ) -> Self {
        Self {
            persistence,
            email,
            realtime,
            metrics,
            settings,
        }
    }

    /// The metrics registry shared with this orchestrator.
    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        self.metrics.clone()
    }

    /// Run one trio to a terminal state and return the aggregated result.
    pub async fn create_trio(&self, request: TrioRequest) -> TrioResult {
        let started = Instant::now();
        self.metrics.record_request();
        let mut state = TrioState::Pending;

        if request.recipients.is_empty() {
            warn!("trio rejected: empty recipient set");
            return TrioResult::failure(
                "Trio validation failed: recipients must not be empty".to_string(),
                false,
                started.elapsed().as_millis() as u64,
            );
        }

        // Stage 1: persistence. Mandatory; no later stage runs if this fails.
        self.transition(&mut state, TrioState::PersistenceInFlight);
        let database = RetryExecutor::new("Database", self.settings.database);
        let message_id = match database
            .run(|| self.persistence.create(&request.message, &request.recipients))
            .await
        {
            Ok(id) => {
                self.transition(&mut state, TrioState::Persisted);
                debug!(
                    message_id = %id,
                    recipients = request.recipients.len(),
                    "system message persisted"
                );
                id
            }
            Err(err) => {
                self.transition(&mut state, TrioState::PersistenceFailed);
                // The failure path always runs the rollback guard, even
                // though nothing exists yet to delete.
                let rollback = self.rollback(None).await;
                return self.finish_failure(
                    format!("System message creation failed: {err}"),
                    rollback,
                    started,
                );
            }
        };

        // Stage 2: email, only when a target is present.
        if let Some(target) = &request.email_target {
            self.transition(&mut state, TrioState::EmailInFlight);
            let email = RetryExecutor::new("Email", self.settings.email);
            if let Err(err) = email.run(|| self.dispatch_email(target)).await {
                self.transition(&mut state, TrioState::EmailFailed);
                let rollback = self.rollback(Some(&message_id)).await;
                return self.finish_failure(err.to_string(), rollback, started);
            }
            self.transition(&mut state, TrioState::EmailDone);
        }

        // Stage 3: best-effort fan-out. Per-recipient failures are logged
        // and swallowed; the stage completes once every recipient has been
        // attempted.
        self.transition(&mut state, TrioState::RealtimeFanout);
        let payload = PushPayload::for_message(&message_id, &request.message);
        join_all(request.recipients.iter().map(|recipient| {
            let websocket = RetryExecutor::new("Websocket", self.settings.websocket);
            let payload = &payload;
            async move {
                if let Err(err) = websocket
                    .run(|| self.realtime.push_to_user(recipient, payload))
                    .await
                {
                    warn!(
                        recipient = %recipient,
                        error = %err,
                        "realtime push failed; trio unaffected"
                    );
                    notrio_prometheus::record_push_failure();
                }
            }
        }))
        .await;

        self.transition(&mut state, TrioState::Completed);
        let duration = started.elapsed();
        self.metrics.record_completion(true, duration, false);
        notrio_prometheus::record_trio("success");
        notrio_prometheus::record_trio_duration(duration.as_secs_f64());
        info!(
            message_id = %message_id,
            notifications = request.recipients.len(),
            duration_ms = duration.as_millis() as u64,
            "trio completed"
        );

        TrioResult {
            success: true,
            message_id: Some(message_id),
            notifications_sent: request.recipients.len(),
            error: None,
            rollback_completed: false,
            metrics: TrioTimings {
                duration_ms: duration.as_millis() as u64,
            },
        }
    }

    /// Route an email target to the matching gateway template method.
    async fn dispatch_email(&self, target: &EmailTarget) -> Result<(), notrio_core::NotrioError> {
        match &target.template {
            EmailTemplate::Welcome { name } => {
                self.email
                    .send_welcome(&target.address, &target.display_name, name)
                    .await
            }
            EmailTemplate::PasswordResetSuccess { name } => {
                self.email
                    .send_password_reset_success(&target.address, &target.display_name, name)
                    .await
            }
            EmailTemplate::EventReminder {
                event_name,
                starts_at,
                location,
            } => {
                self.email
                    .send_event_reminder(
                        &target.address,
                        &target.display_name,
                        event_name,
                        *starts_at,
                        location.as_deref(),
                    )
                    .await
            }
            EmailTemplate::Generic { subject, body } => {
                self.email
                    .send_generic(&target.address, &target.display_name, subject, body)
                    .await
            }
        }
    }

    /// Compensating delete of the stage-1 record.
    ///
    /// Called on every stage-1 and stage-2 terminal failure; with no
    /// `message_id` it is a guard that completes without touching storage.
    async fn rollback(&self, message_id: Option<&str>) -> RollbackOutcome {
        if !self.settings.enable_rollback {
            debug!("rollback disabled; leaving persisted state as-is");
            return RollbackOutcome {
                invoked: false,
                completed: false,
            };
        }

        notrio_prometheus::record_rollback();
        match message_id {
            None => {
                trace!("rollback invoked with nothing persisted yet");
                RollbackOutcome {
                    invoked: true,
                    completed: true,
                }
            }
            Some(id) => match self.persistence.delete(id).await {
                Ok(()) => {
                    info!(message_id = id, "compensating delete completed");
                    RollbackOutcome {
                        invoked: true,
                        completed: true,
                    }
                }
                Err(err) => {
                    error!(message_id = id, error = %err, "compensating delete failed");
                    RollbackOutcome {
                        invoked: true,
                        completed: false,
                    }
                }
            },
        }
    }

    fn finish_failure(
        &self,
        error: String,
        rollback: RollbackOutcome,
        started: Instant,
    ) -> TrioResult {
        let duration = started.elapsed();
        self.metrics
            .record_completion(false, duration, rollback.invoked);
        notrio_prometheus::record_trio("failure");
        notrio_prometheus::record_trio_duration(duration.as_secs_f64());
        TrioResult::failure(error, rollback.completed, duration.as_millis() as u64)
    }

    fn transition(&self, state: &mut TrioState, next: TrioState) {
        trace!(from = %state, to = %next, "trio state transition");
        *state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_map_config_values() {
        let mut config = NotrioConfig::default();
        config.retries.email = 7;
        config.timeouts.email_ms = 123;
        config.features.enable_rollback = false;

        let settings = DeliverySettings::from_config(&config);
        assert_eq!(settings.email.max_attempts, 7);
        assert_eq!(settings.email.attempt_timeout, Duration::from_millis(123));
        assert!(!settings.enable_rollback);
        // Untouched channels keep their defaults.
        assert_eq!(settings.database.max_attempts, 3);
    }
}
