//! A thread-safe WebSocket manager for topic-based message broadcasting.
//!
//! Uses Tokio broadcast channels per topic. Attendance screens subscribe to
//! the topic of the session they display and receive scan events as they happen.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

type Topic = String;

type Sender = broadcast::Sender<String>;

type Receiver = broadcast::Receiver<String>;

/// Per-topic buffer. Slow receivers that fall further behind observe `Lagged`.
const CHANNEL_CAPACITY: usize = 100;

/// Manages broadcast channels per topic.
///
/// - Lazily creates broadcast channels per topic on first subscription
/// - Removes topics when their subscriber count drops to zero after sending
/// - Removes topics on [`WebSocketManager::release`] once nobody listens
#[derive(Clone, Default)]
pub struct WebSocketManager {
    inner: Arc<RwLock<HashMap<Topic, Sender>>>,
}

impl WebSocketManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to the given topic, creating it if necessary.
    pub async fn subscribe(&self, topic: &str) -> Receiver {
        let mut map = self.inner.write().await;
        map.entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Broadcasts a message to all subscribers of `topic`.
    ///
    /// If the topic does not exist, it's a no-op.
    /// If the topic has zero subscribers after sending, it is removed.
    pub async fn broadcast<T: Into<String>>(&self, topic: &str, msg: T) {
        let mut map = self.inner.write().await;
        if let Some(sender) = map.get(topic) {
            let _ = sender.send(msg.into());
            if sender.receiver_count() == 0 {
                tracing::info!("Removing topic '{topic}' due to no subscribers.");
                map.remove(topic);
            }
        }
    }

    /// Drops the channel for `topic` once its last receiver is gone.
    ///
    /// Called when a socket disconnects, so topics that never see another
    /// broadcast do not linger in the map.
    pub async fn release(&self, topic: &str) {
        let mut map = self.inner.write().await;
        if map.get(topic).is_some_and(|s| s.receiver_count() == 0) {
            tracing::info!("Removing topic '{topic}' after its last subscriber left.");
            map.remove(topic);
        }
    }

    /// Number of live receivers on `topic` (0 when the topic does not exist).
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        self.inner
            .read()
            .await
            .get(topic)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Whether a channel currently exists for `topic`.
    pub async fn has_topic(&self, topic: &str) -> bool {
        self.inner.read().await.contains_key(topic)
    }
}
