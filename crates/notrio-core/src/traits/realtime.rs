// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Realtime gateway trait for live-session push delivery.

use async_trait::async_trait;

use crate::error::NotrioError;
use crate::traits::adapter::GatewayAdapter;
use crate::types::{PushPayload, RecipientId};

/// Gateway to the realtime push transport.
///
/// Pushes fire at a specific user's live session(s). Errors (no live
/// session, dropped connection) are expected and tolerated by the
/// orchestrator; a failed push never fails the trio.
#[async_trait]
pub trait RealtimeGateway: GatewayAdapter {
    /// Push an event to every live session of the given user.
    async fn push_to_user(
        &self,
        user: &RecipientId,
        payload: &PushPayload,
    ) -> Result<(), NotrioError>;
}
