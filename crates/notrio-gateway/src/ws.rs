// SPDX-FileCopyrightText: 2026 Notrio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket handler for notification delivery.
//!
//! Clients connect with `GET /ws?user_id=<id>&token=<token>` and receive
//! server -> client frames only:
//! ```json
//! {"type": "notification", "message_id": "...", "title": "...", "content": "...",
//!  "kind": "system", "priority": "normal", "created_at": "..."}
//! ```

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::server::GatewayState;

/// Query parameters of the WebSocket handshake.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    user_id: String,
    #[serde(default)]
    token: Option<String>,
}

/// WebSocket upgrade handler.
///
/// Authenticates during the handshake (the browser WebSocket API cannot set
/// an Authorization header), then registers the connection under the user id.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<GatewayState>,
) -> Response {
    if !state.auth.token_matches(params.token.as_deref()) {
        tracing::warn!(user_id = %params.user_id, "websocket handshake rejected");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    ws.on_upgrade(move |socket| handle_socket(socket, state, params.user_id))
}

/// Handle an individual WebSocket connection.
///
/// Registers an outbound channel with the session registry and forwards
/// every frame the orchestrator pushes. The connection is receive-only from
/// the client's perspective; inbound text is ignored.
async fn handle_socket(socket: WebSocket, state: GatewayState, user_id: String) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let conn_id = uuid::Uuid::new_v4().to_string();

    let (tx, mut rx) = mpsc::channel::<String>(64);
    state.registry.register(&user_id, conn_id.clone(), tx);

    // Forward pushed frames to the socket.
    let sender_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if ws_sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // Drain the client side until it closes.
    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            Message::Close(_) => break,
            _ => {} // Notification sockets are one-way; ignore client frames.
        }
    }

    // Cleanup.
    state.registry.unregister(&user_id, &conn_id);
    sender_task.abort();
}
