// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use notrio_core::NotrioError;
use notrio_config::model::StorageConfig;

use crate::migrations;

/// Handle to the notification store's SQLite database.
///
/// Migrations run synchronously before the async connection is opened, so a
/// constructed `Database` always has a current schema.
pub struct Database {
    connection: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if necessary) the database at the configured path.
    pub async fn open(config: &StorageConfig) -> Result<Self, NotrioError> {
        let path = std::path::Path::new(&config.database_path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| NotrioError::Storage {
                source: Box::new(e),
            })?;
        }

        // Migrations need a synchronous connection; run them before the
        // background writer thread takes over.
        let mut sync_conn = rusqlite::Connection::open(path).map_err(|e| NotrioError::Storage {
            source: Box::new(e),
        })?;
        migrations::run_migrations(&mut sync_conn)?;
        drop(sync_conn);

        let connection = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| NotrioError::Storage {
                source: Box::new(e),
            })?;

        let wal_mode = config.wal_mode;
        connection
            .call(move |conn| {
                if wal_mode {
                    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
                }
                conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA synchronous=NORMAL;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        tracing::debug!(path = %config.database_path, wal = config.wal_mode, "database opened");
        Ok(Self { connection })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.connection
    }
}

/// Map a tokio-rusqlite error into the storage error variant.
pub(crate) fn map_tr_err(err: tokio_rusqlite::Error) -> NotrioError {
    NotrioError::Storage {
        source: Box::new(err),
    }
}
