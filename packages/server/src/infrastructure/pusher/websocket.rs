//! WebSocket implementation of the `MessagePusher` trait.
//!
//! ## Responsibilities
//!
//! - Own the per-connection `UnboundedSender`s
//! - Deliver events (push_to, broadcast, broadcast_all)
//!
//! ## Design note
//!
//! Socket creation happens in the UI layer (`ui/handler/websocket.rs`);
//! this implementation only receives the already-created sender halves.
//! "Accepting the transport" and "delivering events" stay separate
//! concerns. Each sender is a FIFO queue, so everything enqueued for one
//! connection arrives in issue order.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket-backed message pusher
pub struct WebSocketMessagePusher {
    /// Send queues of the currently connected clients
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of registered connections (debug/metrics)
    pub async fn connection_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(connection_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to connection '{}'", connection_id);
            Ok(())
        } else {
            Err(MessagePushError::ClientNotFound(*connection_id))
        }
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) {
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // Best-effort: a connection that went away mid-delivery is
                // skipped, never an error to the caller.
                Some(sender) => {
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                    }
                }
                None => {
                    tracing::debug!(
                        "Connection '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }
    }

    async fn broadcast_all(&self, content: &str) {
        let clients = self.clients.lock().await;

        for (connection_id, sender) in clients.iter() {
            if let Err(e) = sender.send(content.to_string()) {
                tracing::warn!(
                    "Failed to push message to connection '{}': {}",
                    connection_id,
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn create_test_pusher() -> WebSocketMessagePusher {
        WebSocketMessagePusher::new()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // given:
        let pusher = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = ConnectionId::generate();
        pusher.register_client(conn, tx).await;

        // when:
        let result = pusher.push_to(&conn, "Hello").await;

        // then:
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection() {
        // given:
        let pusher = create_test_pusher();

        // when:
        let result = pusher.push_to(&ConnectionId::generate(), "Hello").await;

        // then:
        assert!(matches!(
            result.unwrap_err(),
            MessagePushError::ClientNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_all_targets() {
        // given:
        let pusher = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();
        pusher.register_client(a, tx1).await;
        pusher.register_client(b, tx2).await;

        // when:
        pusher.broadcast(vec![a, b], "Broadcast message").await;

        // then:
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_tolerates_missing_targets() {
        // given:
        let pusher = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let a = ConnectionId::generate();
        pusher.register_client(a, tx).await;

        // when: one target was never registered
        pusher
            .broadcast(vec![a, ConnectionId::generate()], "Broadcast message")
            .await;

        // then: the registered target still receives
        assert_eq!(rx.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_all_ignores_room_membership() {
        // given:
        let pusher = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(ConnectionId::generate(), tx1).await;
        pusher.register_client(ConnectionId::generate(), tx2).await;

        // when:
        pusher.broadcast_all("global").await;

        // then:
        assert_eq!(rx1.recv().await, Some("global".to_string()));
        assert_eq!(rx2.recv().await, Some("global".to_string()));
    }

    #[tokio::test]
    async fn test_unregister_stops_delivery() {
        // given:
        let pusher = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = ConnectionId::generate();
        pusher.register_client(conn, tx).await;
        pusher.unregister_client(&conn).await;

        // when:
        let result = pusher.push_to(&conn, "late").await;
        pusher.broadcast_all("late-global").await;

        // then:
        assert!(result.is_err());
        assert_eq!(pusher.connection_count().await, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_per_connection_delivery_order_is_preserved() {
        // given:
        let pusher = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = ConnectionId::generate();
        pusher.register_client(conn, tx).await;

        // when: a mix of unicast and broadcast in a known issue order
        pusher.push_to(&conn, "1").await.unwrap();
        pusher.broadcast(vec![conn], "2").await;
        pusher.broadcast_all("3").await;

        // then: arrival order matches issue order
        assert_eq!(rx.recv().await, Some("1".to_string()));
        assert_eq!(rx.recv().await, Some("2".to_string()));
        assert_eq!(rx.recv().await, Some("3".to_string()));
    }
}
