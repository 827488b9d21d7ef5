// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock realtime gateway for deterministic testing.
//!
//! `MockPusher` implements `RealtimeGateway` with per-user scripted
//! failures and captured pushes for assertion in tests.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use notrio_core::NotrioError;
use notrio_core::traits::adapter::GatewayAdapter;
use notrio_core::traits::realtime::RealtimeGateway;
use notrio_core::types::{GatewayType, HealthStatus, PushPayload, RecipientId};

/// A mock realtime push transport for testing.
pub struct MockPusher {
    pushed: Arc<Mutex<Vec<(RecipientId, PushPayload)>>>,
    failing_users: Arc<Mutex<HashSet<RecipientId>>>,
    fail_all: AtomicBool,
    push_calls: AtomicU32,
}

impl MockPusher {
    /// Create a new mock pusher that delivers every push.
    pub fn new() -> Self {
        Self {
            pushed: Arc::new(Mutex::new(Vec::new())),
            failing_users: Arc::new(Mutex::new(HashSet::new())),
            fail_all: AtomicBool::new(false),
            push_calls: AtomicU32::new(0),
        }
    }

    /// Make every push to the given user fail.
    pub async fn fail_for(&self, user: impl Into<RecipientId>) {
        self.failing_users.lock().await.insert(user.into());
    }

    /// Make every push fail.
    pub fn fail_all_pushes(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    /// Pushes captured by successful calls, in delivery order.
    pub async fn pushed(&self) -> Vec<(RecipientId, PushPayload)> {
        self.pushed.lock().await.clone()
    }

    /// Recipients that received at least one push.
    pub async fn pushed_users(&self) -> HashSet<RecipientId> {
        self.pushed
            .lock()
            .await
            .iter()
            .map(|(user, _)| user.clone())
            .collect()
    }

    /// Total push calls, including failed attempts.
    pub fn push_calls(&self) -> u32 {
        self.push_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayAdapter for MockPusher {
    fn name(&self) -> &str {
        "mock-pusher"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn gateway_type(&self) -> GatewayType {
        GatewayType::Realtime
    }

    async fn health_check(&self) -> Result<HealthStatus, NotrioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NotrioError> {
        Ok(())
    }
}

#[async_trait]
impl RealtimeGateway for MockPusher {
    async fn push_to_user(
        &self,
        user: &RecipientId,
        payload: &PushPayload,
    ) -> Result<(), NotrioError> {
        self.push_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all.load(Ordering::SeqCst) || self.failing_users.lock().await.contains(user) {
            return Err(NotrioError::realtime(format!(
                "no live session for user {user}"
            )));
        }

        self.pushed
            .lock()
            .await
            .push((user.clone(), payload.clone()));
        Ok(())
    }
}
