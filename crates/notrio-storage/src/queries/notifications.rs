// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification CRUD operations.

use rusqlite::params;

use notrio_core::NotrioError;
use notrio_core::types::RecipientId;

use crate::database::Database;
use crate::models::NotificationRow;

/// Insert a notification and its recipient rows in one transaction.
pub async fn insert_notification(
    db: &Database,
    row: &NotificationRow,
    recipients: &[RecipientId],
) -> Result<(), NotrioError> {
    let row = row.clone();
    let recipients: Vec<String> = recipients.iter().map(|r| r.0.clone()).collect();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO notifications (id, title, content, kind, priority, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    row.id,
                    row.title,
                    row.content,
                    row.kind,
                    row.priority,
                    row.created_at,
                ],
            )?;
            for recipient in &recipients {
                tx.execute(
                    "INSERT INTO notification_recipients (notification_id, recipient_id)
                     VALUES (?1, ?2)",
                    params![row.id, recipient],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete a notification by id. Recipient rows cascade.
///
/// Deleting an id with no matching row is an error: the compensating
/// rollback must notice when the record it expects is gone.
pub async fn delete_notification(db: &Database, id: &str) -> Result<(), NotrioError> {
    let id_owned = id.to_string();
    let affected = db
        .connection()
        .call(move |conn| {
            let affected = conn.execute(
                "DELETE FROM notifications WHERE id = ?1",
                params![id_owned],
            )?;
            Ok(affected)
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    if affected == 0 {
        return Err(NotrioError::Storage {
            source: format!("no notification with id {id}").into(),
        });
    }
    Ok(())
}

/// Fetch a notification row by id.
pub async fn get_notification(
    db: &Database,
    id: &str,
) -> Result<Option<NotificationRow>, NotrioError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, content, kind, priority, created_at
                 FROM notifications WHERE id = ?1",
            )?;
            let mut rows = stmt.query_map(params![id], |row| {
                Ok(NotificationRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    content: row.get(2)?,
                    kind: row.get(3)?,
                    priority: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List recipient ids targeted by a notification, in insertion order.
pub async fn recipients_for(db: &Database, id: &str) -> Result<Vec<String>, NotrioError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT recipient_id FROM notification_recipients
                 WHERE notification_id = ?1 ORDER BY rowid ASC",
            )?;
            let rows = stmt.query_map(params![id], |row| row.get(0))?;
            let mut recipients = Vec::new();
            for row in rows {
                recipients.push(row?);
            }
            Ok(recipients)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
