//! UseCase: event broadcast.
//!
//! The single delivery path for every event the server emits. Room
//! targets are resolved against the registry with a copy-on-read
//! snapshot, so a join or leave racing a delivery can never corrupt the
//! iteration; a connection that disconnects mid-delivery is silently
//! skipped (best-effort, at-most-once).
//!
//! This is also the collaborator interface handed to the REST layer:
//! handlers call it strictly *after* their persistence write commits.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, RoomKey};

use super::SharedRegistry;

/// Event broadcast use case
pub struct NotifyUseCase {
    registry: SharedRegistry,
    pusher: Arc<dyn MessagePusher>,
}

impl NotifyUseCase {
    pub fn new(registry: SharedRegistry, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// Deliver to every connection currently in the room
    pub async fn send_to_room(&self, room: &RoomKey, message: &str) {
        let targets = {
            let registry = self.registry.lock().await;
            registry.members(room)
        };
        self.pusher.broadcast(targets, message).await;
    }

    /// Deliver to the room, excluding one connection (typically the sender)
    pub async fn send_to_room_except(
        &self,
        room: &RoomKey,
        excluded: &ConnectionId,
        message: &str,
    ) {
        let targets: Vec<ConnectionId> = {
            let registry = self.registry.lock().await;
            registry
                .members(room)
                .into_iter()
                .filter(|conn| conn != excluded)
                .collect()
        };
        self.pusher.broadcast(targets, message).await;
    }

    /// Deliver to every connected client, regardless of room membership
    pub async fn send_to_all(&self, message: &str) {
        self.pusher.broadcast_all(message).await;
    }

    /// Unicast, used for authentication acknowledgements and errors
    pub async fn send_to_connection(
        &self,
        connection_id: &ConnectionId,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.pusher.push_to(connection_id, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomRegistry;
    use crate::infrastructure::pusher::WebSocketMessagePusher;
    use tokio::sync::{mpsc, Mutex};

    struct Fixture {
        registry: SharedRegistry,
        pusher: Arc<WebSocketMessagePusher>,
        usecase: NotifyUseCase,
    }

    fn create_fixture() -> Fixture {
        let registry: SharedRegistry = Arc::new(Mutex::new(RoomRegistry::new()));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = NotifyUseCase::new(registry.clone(), pusher.clone());
        Fixture {
            registry,
            pusher,
            usecase,
        }
    }

    async fn connect(fixture: &Fixture) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = ConnectionId::generate();
        fixture.pusher.register_client(conn, tx).await;
        (conn, rx)
    }

    #[tokio::test]
    async fn test_send_to_room_only_reaches_members() {
        // given: a and b in the room, c connected but outside
        let fixture = create_fixture();
        let (a, mut rx_a) = connect(&fixture).await;
        let (b, mut rx_b) = connect(&fixture).await;
        let (_c, mut rx_c) = connect(&fixture).await;
        let room = RoomKey::channel("c42");
        {
            let mut reg = fixture.registry.lock().await;
            reg.join(room.clone(), a);
            reg.join(room.clone(), b);
        }

        // when:
        fixture.usecase.send_to_room(&room, "hello").await;

        // then:
        assert_eq!(rx_a.try_recv().unwrap(), "hello");
        assert_eq!(rx_b.try_recv().unwrap(), "hello");
        assert!(rx_c.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_to_room_except_skips_sender() {
        // given:
        let fixture = create_fixture();
        let (a, mut rx_a) = connect(&fixture).await;
        let (b, mut rx_b) = connect(&fixture).await;
        let room = RoomKey::channel("geral");
        {
            let mut reg = fixture.registry.lock().await;
            reg.join(room.clone(), a);
            reg.join(room.clone(), b);
        }

        // when:
        fixture
            .usecase
            .send_to_room_except(&room, &a, "typing...")
            .await;

        // then:
        assert!(rx_a.try_recv().is_err());
        assert_eq!(rx_b.try_recv().unwrap(), "typing...");
    }

    #[tokio::test]
    async fn test_send_to_all_ignores_rooms() {
        // given: one member, one roomless connection
        let fixture = create_fixture();
        let (a, mut rx_a) = connect(&fixture).await;
        let (_b, mut rx_b) = connect(&fixture).await;
        fixture
            .registry
            .lock()
            .await
            .join(RoomKey::channel("geral"), a);

        // when:
        fixture.usecase.send_to_all("announcement").await;

        // then:
        assert_eq!(rx_a.try_recv().unwrap(), "announcement");
        assert_eq!(rx_b.try_recv().unwrap(), "announcement");
    }

    #[tokio::test]
    async fn test_send_to_unknown_room_is_silent() {
        // given:
        let fixture = create_fixture();
        let (_a, mut rx_a) = connect(&fixture).await;

        // when: unknown room equals empty room, never an error
        fixture
            .usecase
            .send_to_room(&RoomKey::channel("ghost"), "anyone?")
            .await;

        // then:
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_to_connection_unicast() {
        // given:
        let fixture = create_fixture();
        let (a, mut rx_a) = connect(&fixture).await;
        let (_b, mut rx_b) = connect(&fixture).await;

        // when:
        fixture
            .usecase
            .send_to_connection(&a, "just you")
            .await
            .unwrap();

        // then:
        assert_eq!(rx_a.try_recv().unwrap(), "just you");
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delivery_after_disconnect_is_swallowed() {
        // given: a member whose connection already went away
        let fixture = create_fixture();
        let (a, rx_a) = connect(&fixture).await;
        let room = RoomKey::stream("s1");
        fixture.registry.lock().await.join(room.clone(), a);
        drop(rx_a);

        // when: no panic, no error surfaced
        fixture.usecase.send_to_room(&room, "late").await;
    }
}
