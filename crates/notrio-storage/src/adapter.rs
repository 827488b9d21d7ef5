// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the PersistenceGateway trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;

use notrio_config::model::StorageConfig;
use notrio_core::types::{GatewayType, HealthStatus, RecipientId, SystemMessage};
use notrio_core::{GatewayAdapter, NotrioError, PersistenceGateway};

use crate::database::Database;
use crate::models::NotificationRow;
use crate::queries;

/// SQLite-backed persistence gateway.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query module. The database is lazily opened on the first call to
/// [`SqliteStore::initialize`].
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`] is called.
    ///
    /// [`initialize`]: SqliteStore::initialize
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database and run migrations. Idempotent.
    pub async fn initialize(&self) -> Result<(), NotrioError> {
        self.db
            .get_or_try_init(|| Database::open(&self.config))
            .await?;
        Ok(())
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, NotrioError> {
        self.db.get().ok_or_else(|| NotrioError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl GatewayAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn gateway_type(&self) -> GatewayType {
        GatewayType::Persistence
    }

    async fn health_check(&self) -> Result<HealthStatus, NotrioError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), NotrioError> {
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
        }
        Ok(())
    }
}

#[async_trait]
impl PersistenceGateway for SqliteStore {
    async fn create(
        &self,
        message: &SystemMessage,
        recipients: &[RecipientId],
    ) -> Result<String, NotrioError> {
        let db = self.db()?;
        let row = NotificationRow {
            id: uuid::Uuid::new_v4().to_string(),
            title: message.title.clone(),
            content: message.content.clone(),
            kind: message.kind.to_string(),
            priority: message.priority.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        queries::notifications::insert_notification(db, &row, recipients).await?;
        tracing::debug!(id = %row.id, recipients = recipients.len(), "notification persisted");
        Ok(row.id)
    }

    async fn delete(&self, id: &str) -> Result<(), NotrioError> {
        let db = self.db()?;
        queries::notifications::delete_notification(db, id).await?;
        tracing::debug!(id, "notification deleted");
        Ok(())
    }
}
