// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock persistence gateway for deterministic testing.
//!
//! `MockStore` implements `PersistenceGateway` with scripted failures,
//! optional per-call latency, and captured create/delete calls for
//! assertion in tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use notrio_core::traits::adapter::GatewayAdapter;
use notrio_core::traits::persistence::PersistenceGateway;
use notrio_core::types::{GatewayType, HealthStatus, RecipientId, SystemMessage};
use notrio_core::NotrioError;

/// A record captured by a successful `create` call.
#[derive(Debug, Clone)]
pub struct CreatedRecord {
    pub id: String,
    pub message: SystemMessage,
    pub recipients: Vec<RecipientId>,
}

/// A mock message store for testing.
///
/// Failures are scripted: `fail_next_creates(n)` makes the next `n` create
/// calls fail, `fail_all_creates()` makes every create fail. Captured calls
/// are retrievable via `created()` and `deleted()`.
pub struct MockStore {
    created: Arc<Mutex<Vec<CreatedRecord>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    create_calls: AtomicU32,
    delete_calls: AtomicU32,
    scripted_create_failures: AtomicU32,
    fail_all_creates: AtomicBool,
    fail_all_deletes: AtomicBool,
    create_delay: Mutex<Option<Duration>>,
}

impl MockStore {
    /// Create a new mock store that succeeds on every call.
    pub fn new() -> Self {
        Self {
            created: Arc::new(Mutex::new(Vec::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
            create_calls: AtomicU32::new(0),
            delete_calls: AtomicU32::new(0),
            scripted_create_failures: AtomicU32::new(0),
            fail_all_creates: AtomicBool::new(false),
            fail_all_deletes: AtomicBool::new(false),
            create_delay: Mutex::new(None),
        }
    }

    /// Make the next `n` create calls fail before succeeding again.
    pub fn fail_next_creates(&self, n: u32) {
        self.scripted_create_failures.store(n, Ordering::SeqCst);
    }

    /// Make every create call fail.
    pub fn fail_all_creates(&self) {
        self.fail_all_creates.store(true, Ordering::SeqCst);
    }

    /// Make every delete call fail.
    pub fn fail_all_deletes(&self) {
        self.fail_all_deletes.store(true, Ordering::SeqCst);
    }

    /// Delay every create call by `delay` before responding.
    pub async fn set_create_delay(&self, delay: Duration) {
        *self.create_delay.lock().await = Some(delay);
    }

    /// Records captured by successful create calls.
    pub async fn created(&self) -> Vec<CreatedRecord> {
        self.created.lock().await.clone()
    }

    /// Ids passed to successful delete calls.
    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.lock().await.clone()
    }

    /// Total create calls, including failed attempts.
    pub fn create_calls(&self) -> u32 {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Total delete calls, including failed attempts.
    pub fn delete_calls(&self) -> u32 {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayAdapter for MockStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn gateway_type(&self) -> GatewayType {
        GatewayType::Persistence
    }

    async fn health_check(&self) -> Result<HealthStatus, NotrioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NotrioError> {
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for MockStore {
    async fn create(
        &self,
        message: &SystemMessage,
        recipients: &[RecipientId],
    ) -> Result<String, NotrioError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = *self.create_delay.lock().await {
            tokio::time::sleep(delay).await;
        }

        if self.fail_all_creates.load(Ordering::SeqCst) {
            return Err(NotrioError::Storage {
                source: "database unavailable".into(),
            });
        }
        if self
            .scripted_create_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(NotrioError::Storage {
                source: "database is locked".into(),
            });
        }

        let id = format!("mock-msg-{}", uuid::Uuid::new_v4());
        self.created.lock().await.push(CreatedRecord {
            id: id.clone(),
            message: message.clone(),
            recipients: recipients.to_vec(),
        });
        Ok(id)
    }

    async fn delete(&self, id: &str) -> Result<(), NotrioError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_all_deletes.load(Ordering::SeqCst) {
            return Err(NotrioError::Storage {
                source: "delete failed".into(),
            });
        }

        let mut created = self.created.lock().await;
        if let Some(pos) = created.iter().position(|r| r.id == id) {
            created.remove(pos);
            self.deleted.lock().await.push(id.to_string());
            Ok(())
        } else {
            Err(NotrioError::Storage {
                source: format!("no record with id {id}").into(),
            })
        }
    }
}
