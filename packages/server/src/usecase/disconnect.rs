//! UseCase: connection teardown.
//!
//! Disconnect is the only cancellation signal in the fan-out layer and
//! its cleanup must be complete and deterministic: after `execute`
//! returns, the connection is in no room, its send queue is gone, and -
//! if an identity was bound - the user is offline. The caller broadcasts
//! afterwards from the returned summary, so a connection can never
//! receive an event for its own teardown.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PresenceStatus, RoomKey, StreamId, UserId,
};

use super::{SharedPresence, SharedRegistry};

/// What a teardown changed, for the caller's follow-up broadcasts
#[derive(Debug)]
pub struct DisconnectSummary {
    /// Stream rooms the connection was removed from, with corrected counts
    pub stream_rooms: Vec<(StreamId, usize)>,
    /// User that went offline; `None` if the connection never authenticated
    pub user_offline: Option<UserId>,
}

/// Connection teardown use case
pub struct DisconnectUseCase {
    registry: SharedRegistry,
    presence: SharedPresence,
    pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    pub fn new(
        registry: SharedRegistry,
        presence: SharedPresence,
        pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            presence,
            pusher,
        }
    }

    /// Tear down a connection.
    ///
    /// # Arguments
    ///
    /// * `connection_id` - the closing connection
    /// * `bound_user` - identity bound during the session, if any
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        bound_user: Option<UserId>,
    ) -> DisconnectSummary {
        // Rooms first: the connection must not stay counted anywhere once
        // its teardown has been processed.
        let stream_rooms = {
            let mut registry = self.registry.lock().await;
            let left = registry.leave_all(&connection_id);
            left.into_iter()
                .filter_map(|room| match room {
                    RoomKey::Stream(stream_id) => {
                        let count = registry.count(&RoomKey::Stream(stream_id.clone()));
                        Some((stream_id, count))
                    }
                    RoomKey::Channel(_) => None,
                })
                .collect()
        };

        let user_offline = match bound_user {
            Some(user_id) => {
                let mut presence = self.presence.lock().await;
                presence.set_status(user_id.clone(), PresenceStatus::Offline);
                Some(user_id)
            }
            None => None,
        };

        self.pusher.unregister_client(&connection_id).await;
        tracing::info!("Connection '{}' torn down", connection_id);

        DisconnectSummary {
            stream_rooms,
            user_offline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PresenceStore, RoomRegistry};
    use crate::infrastructure::pusher::WebSocketMessagePusher;
    use tokio::sync::Mutex;

    struct Fixture {
        registry: SharedRegistry,
        presence: SharedPresence,
        usecase: DisconnectUseCase,
    }

    fn create_fixture() -> Fixture {
        let registry: SharedRegistry = Arc::new(Mutex::new(RoomRegistry::new()));
        let presence: SharedPresence = Arc::new(Mutex::new(PresenceStore::new()));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = DisconnectUseCase::new(registry.clone(), presence.clone(), pusher);
        Fixture {
            registry,
            presence,
            usecase,
        }
    }

    #[tokio::test]
    async fn test_disconnect_removes_connection_from_all_rooms() {
        // given: a connection in one channel room and one stream room
        let fixture = create_fixture();
        let conn = ConnectionId::generate();
        let other = ConnectionId::generate();
        {
            let mut reg = fixture.registry.lock().await;
            reg.join(RoomKey::channel("geral"), conn);
            reg.join(RoomKey::stream("s1"), conn);
            reg.join(RoomKey::stream("s1"), other);
        }

        // when:
        let summary = fixture
            .usecase
            .execute(conn, Some(UserId::new("u1")))
            .await;

        // then: gone from every room; stream counts corrected
        let reg = fixture.registry.lock().await;
        assert_eq!(reg.count(&RoomKey::channel("geral")), 0);
        assert_eq!(reg.count(&RoomKey::stream("s1")), 1);
        assert_eq!(summary.stream_rooms, vec![(StreamId::new("s1"), 1)]);
    }

    #[tokio::test]
    async fn test_disconnect_bound_user_goes_offline() {
        // given:
        let fixture = create_fixture();
        let user = UserId::new("u1");
        fixture
            .presence
            .lock()
            .await
            .set_status(user.clone(), PresenceStatus::Online);

        // when:
        let summary = fixture
            .usecase
            .execute(ConnectionId::generate(), Some(user.clone()))
            .await;

        // then:
        assert_eq!(summary.user_offline, Some(user.clone()));
        assert_eq!(
            fixture.presence.lock().await.get_status(&user),
            PresenceStatus::Offline
        );
    }

    #[tokio::test]
    async fn test_guest_disconnect_touches_no_presence() {
        // given: a connection that never authenticated
        let fixture = create_fixture();

        // when:
        let summary = fixture.usecase.execute(ConnectionId::generate(), None).await;

        // then: no presence entry, no presence broadcast to make
        assert_eq!(summary.user_offline, None);
        assert_eq!(fixture.presence.lock().await.tracked_users(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_without_rooms_reports_nothing() {
        // given:
        let fixture = create_fixture();

        // when:
        let summary = fixture.usecase.execute(ConnectionId::generate(), None).await;

        // then:
        assert!(summary.stream_rooms.is_empty());
    }
}
