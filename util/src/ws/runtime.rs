use crate::ws::WebSocketManager;
use axum::extract::ws::{Message, Utf8Bytes};
use tokio::sync::mpsc;

/// Per-connection handle given to a `WsHandler`.
pub struct WsContext {
    pub topic: String,
    pub ws: WebSocketManager,
    // frames queued for the writer task
    out_tx: mpsc::Sender<Message>,
}

impl WsContext {
    pub fn new(topic: String, ws: WebSocketManager, out_tx: mpsc::Sender<Message>) -> Self {
        Self { topic, ws, out_tx }
    }

    /// Sends a text frame to this client only. Returns `false` once the client is gone.
    pub async fn reply_text(&self, text: impl Into<Utf8Bytes>) -> bool {
        self.out_tx.send(Message::Text(text.into())).await.is_ok()
    }

    /// Sends a WS-level pong to this client.
    pub async fn reply_pong(&self, payload: bytes::Bytes) -> bool {
        self.out_tx.send(Message::Pong(payload)).await.is_ok()
    }
}
