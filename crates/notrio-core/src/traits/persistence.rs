// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence gateway trait for the durable message store.

use async_trait::async_trait;

use crate::error::NotrioError;
use crate::traits::adapter::GatewayAdapter;
use crate::types::{RecipientId, SystemMessage};

/// Gateway to the durable store of targeted system messages.
///
/// `create` is stage 1 of every trio; `delete` is only ever called as a
/// compensating rollback when a later stage fails unrecoverably. Once a trio
/// completes, further record lifecycle (read state, expiry) belongs to the
/// host system, not the orchestrator.
#[async_trait]
pub trait PersistenceGateway: GatewayAdapter {
    /// Durably record a message targeted at the given recipients.
    ///
    /// Returns the stable id of the created record.
    async fn create(
        &self,
        message: &SystemMessage,
        recipients: &[RecipientId],
    ) -> Result<String, NotrioError>;

    /// Delete a previously created record. Deleting an unknown id is an error.
    async fn delete(&self, id: &str) -> Result<(), NotrioError>;
}
