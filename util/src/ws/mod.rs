// util/src/ws/mod.rs
pub mod axum_adapter;
pub mod handler_trait;
pub mod manager;
pub mod runtime;
pub mod serve;

pub use manager::WebSocketManager;

use chrono::Utc;
use serde::Serialize;

/// Standard event envelope sent over WebSocket topics.
#[derive(Serialize)]
pub struct EventEnvelope<'a, T> {
    #[serde(rename = "type")]
    pub r#type: &'static str,
    pub event: &'a str,
    pub topic: &'a str,
    pub payload: T,
    pub ts: String,
}

/// Serializes an `EventEnvelope` of kind `"event"`.
pub fn event_json<T: Serialize>(topic: &str, event: &str, payload: &T) -> serde_json::Result<String> {
    serde_json::to_string(&EventEnvelope {
        r#type: "event",
        event,
        topic,
        payload,
        ts: Utc::now().to_rfc3339(),
    })
}

/// Broadcast a JSON-serialized `EventEnvelope` on `topic`.
pub async fn emit<T: Serialize>(ws: &WebSocketManager, topic: &str, event: &str, payload: &T) {
    match event_json(topic, event, payload) {
        Ok(json) => ws.broadcast(topic, json).await,
        Err(e) => tracing::error!("Failed to serialize '{event}' for '{topic}': {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn emit_wraps_payload_in_envelope() {
        let ws = WebSocketManager::new();
        let mut rx = ws.subscribe("attendance:session:abc").await;

        emit(&ws, "attendance:session:abc", "attendance.marked", &serde_json::json!({"n": 1})).await;

        let raw = rx.recv().await.unwrap();
        let v: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["type"], "event");
        assert_eq!(v["event"], "attendance.marked");
        assert_eq!(v["topic"], "attendance:session:abc");
        assert_eq!(v["payload"]["n"], 1);
        assert!(v["ts"].is_string());
    }
}
