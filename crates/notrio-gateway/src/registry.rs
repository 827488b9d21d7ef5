// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live WebSocket session registry and the push gateway built on it.
//!
//! Connections register under their user id when the socket opens and
//! unregister on close. A user may hold several live sessions (multiple
//! tabs, devices); a push fans out to all of them.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use notrio_core::types::{GatewayType, HealthStatus, PushPayload, RecipientId};
use notrio_core::{GatewayAdapter, NotrioError, RealtimeGateway};

/// One live WebSocket connection's outbound channel.
#[derive(Clone)]
struct SessionSender {
    conn_id: String,
    tx: mpsc::Sender<String>,
}

/// Registry of live sessions keyed by user id.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Vec<SessionSender>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound channel under the given user.
    pub fn register(&self, user_id: &str, conn_id: String, tx: mpsc::Sender<String>) {
        debug!(user_id, conn_id = %conn_id, "websocket session registered");
        self.sessions
            .entry(user_id.to_string())
            .or_default()
            .push(SessionSender { conn_id, tx });
    }

    /// Remove a connection; drops the user entry once no sessions remain.
    pub fn unregister(&self, user_id: &str, conn_id: &str) {
        if let Some(mut senders) = self.sessions.get_mut(user_id) {
            senders.retain(|s| s.conn_id != conn_id);
            let empty = senders.is_empty();
            drop(senders);
            if empty {
                self.sessions.remove_if(user_id, |_, v| v.is_empty());
            }
        }
        debug!(user_id, conn_id, "websocket session unregistered");
    }

    /// Number of live sessions for a user.
    pub fn session_count(&self, user_id: &str) -> usize {
        self.sessions.get(user_id).map_or(0, |s| s.len())
    }

    /// Deliver a serialized frame to every live session of a user.
    ///
    /// Returns how many sessions accepted the frame, or an error when the
    /// user has no live sessions at all.
    fn deliver(&self, user_id: &str, frame: &str) -> Result<usize, NotrioError> {
        let senders = self
            .sessions
            .get(user_id)
            .ok_or_else(|| NotrioError::realtime(format!("no live session for user {user_id}")))?;

        let mut accepted = 0;
        for session in senders.iter() {
            // try_send keeps a slow consumer from stalling the fan-out; a
            // full buffer is treated like a dead session.
            match session.tx.try_send(frame.to_string()) {
                Ok(()) => accepted += 1,
                Err(e) => {
                    warn!(
                        user_id,
                        conn_id = %session.conn_id,
                        error = %e,
                        "websocket session rejected frame"
                    );
                }
            }
        }

        if accepted == 0 {
            return Err(NotrioError::realtime(format!(
                "all live sessions for user {user_id} rejected the frame"
            )));
        }
        Ok(accepted)
    }
}

/// WebSocket frame wrapper for pushed notifications.
#[derive(serde::Serialize)]
struct NotificationFrame<'a> {
    #[serde(rename = "type")]
    frame_type: &'static str,
    #[serde(flatten)]
    payload: &'a PushPayload,
}

/// Realtime gateway that pushes over the live WebSocket sessions.
pub struct WsPushGateway {
    registry: Arc<SessionRegistry>,
}

impl WsPushGateway {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl GatewayAdapter for WsPushGateway {
    fn name(&self) -> &str {
        "websocket"
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
impl RealtimeGateway for WsPushGateway {
    async fn push_to_user(
        &self,
        user: &RecipientId,
        payload: &PushPayload,
    ) -> Result<(), NotrioError> {
        let frame = serde_json::to_string(&NotificationFrame {
            frame_type: "notification",
            payload,
        })
        .map_err(|e| NotrioError::Realtime {
            message: format!("failed to serialize push payload: {e}"),
            source: Some(Box::new(e)),
        })?;

        let accepted = self.registry.deliver(&user.0, &frame)?;
        debug!(user = %user, sessions = accepted, "notification pushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notrio_core::types::{MessageKind, MessagePriority, SystemMessage};

    fn payload() -> PushPayload {
        PushPayload::for_message(
            "msg-1",
            &SystemMessage {
                title: "Maintenance".to_string(),
                content: "Tonight.".to_string(),
                kind: MessageKind::System,
                priority: MessagePriority::Normal,
            },
        )
    }

    #[tokio::test]
    async fn push_reaches_every_session_of_the_user() {
        let registry = Arc::new(SessionRegistry::new());
        let (tx1, mut rx1) = mpsc::channel(8);
        let (tx2, mut rx2) = mpsc::channel(8);
        registry.register("u1", "c1".to_string(), tx1);
        registry.register("u1", "c2".to_string(), tx2);

        let gateway = WsPushGateway::new(registry);
        gateway
            .push_to_user(&RecipientId::from("u1"), &payload())
            .await
            .unwrap();

        for rx in [&mut rx1, &mut rx2] {
            let frame = rx.recv().await.expect("frame");
            let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
            assert_eq!(value["type"], "notification");
            assert_eq!(value["message_id"], "msg-1");
            assert_eq!(value["kind"], "system");
        }
    }

    #[tokio::test]
    async fn push_to_unknown_user_is_a_realtime_error() {
        let gateway = WsPushGateway::new(Arc::new(SessionRegistry::new()));
        let err = gateway
            .push_to_user(&RecipientId::from("ghost"), &payload())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no live session"));
    }

    #[tokio::test]
    async fn one_full_buffer_does_not_block_the_other_session() {
        let registry = Arc::new(SessionRegistry::new());
        // Zero-capacity is not allowed; capacity 1 filled up behaves the same.
        let (tx_full, _rx_full) = mpsc::channel(1);
        tx_full.try_send("occupied".to_string()).unwrap();
        let (tx_ok, mut rx_ok) = mpsc::channel(8);
        registry.register("u1", "full".to_string(), tx_full);
        registry.register("u1", "ok".to_string(), tx_ok);

        let gateway = WsPushGateway::new(registry);
        gateway
            .push_to_user(&RecipientId::from("u1"), &payload())
            .await
            .unwrap();
        assert!(rx_ok.recv().await.is_some());
    }

    #[tokio::test]
    async fn unregister_removes_the_session() {
        let registry = SessionRegistry::new();
        let (tx, _rx) = mpsc::channel(8);
        registry.register("u1", "c1".to_string(), tx);
        assert_eq!(registry.session_count("u1"), 1);

        registry.unregister("u1", "c1");
        assert_eq!(registry.session_count("u1"), 0);
    }
}
