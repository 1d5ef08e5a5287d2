//! Order event stream
//!
//! | Path | Method | Auth |
//! |-------------|--------|-------|
//! | /api/events | GET | staff |
//!
//! Upgrades to a WebSocket and forwards every order event as a JSON text
//! frame: `{"event": "newOrder", "payload": { ...order detail... }}`. A
//! client that falls far enough behind to overflow its buffer is
//! disconnected and expected to re-sync over the REST API.

use axum::{
    Router,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
    routing::get,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/events", get(events))
}

async fn events(
    State(state): State<ServerState>,
    user: CurrentUser,
    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    require_role(&user, &["staff", "manager"])?;
    let username = user.username;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, username)))
}

async fn handle_socket(socket: WebSocket, state: ServerState, username: String) {
    let mut rx = state.publisher.subscribe();
    let (mut sender, mut receiver) = socket.split();

    tracing::info!(target: "events", %username, "Event stream connected");

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Ok(msg) => {
                    let text = match serde_json::to_string(&msg) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!(target: "events", error = %e, "Event serialization failed");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(target: "events", %username, skipped, "Client lagged, closing");
                    break;
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                // Inbound frames are ignored; the stream is one-way
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::info!(target: "events", %username, "Event stream disconnected");
}
