// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types for storage entities.

/// One row of the `notifications` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRow {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Stored as the snake_case form of [`notrio_core::MessageKind`].
    pub kind: String,
    /// Stored as the snake_case form of [`notrio_core::MessagePriority`].
    pub priority: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}
