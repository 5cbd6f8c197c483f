//! UseCase: leave a room.
//!
//! Idempotent; leaving a room the connection never joined is a no-op and
//! counts never go negative.

use crate::domain::{ConnectionId, RoomKey};

use super::SharedRegistry;

/// Room leave use case
pub struct LeaveRoomUseCase {
    registry: SharedRegistry,
}

impl LeaveRoomUseCase {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Remove the connection from the room.
    ///
    /// # Returns
    ///
    /// The room's membership count after the leave.
    pub async fn execute(&self, connection_id: ConnectionId, room: RoomKey) -> usize {
        let mut registry = self.registry.lock().await;
        registry.leave(&room, &connection_id);
        let count = registry.count(&room);
        tracing::debug!(
            "Connection '{}' left room '{}' (count {})",
            connection_id,
            room,
            count
        );
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomRegistry;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn create_test_registry() -> SharedRegistry {
        Arc::new(Mutex::new(RoomRegistry::new()))
    }

    #[tokio::test]
    async fn test_leave_decrements_count() {
        // given:
        let registry = create_test_registry();
        let usecase = LeaveRoomUseCase::new(registry.clone());
        let room = RoomKey::stream("s1");
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();
        {
            let mut reg = registry.lock().await;
            reg.join(room.clone(), a);
            reg.join(room.clone(), b);
        }

        // when:
        let count = usecase.execute(b, room.clone()).await;

        // then:
        assert_eq!(count, 1);
        assert!(registry.lock().await.contains(&room, &a));
    }

    #[tokio::test]
    async fn test_leave_unknown_room_is_noop() {
        // given:
        let registry = create_test_registry();
        let usecase = LeaveRoomUseCase::new(registry);

        // when: malformed/unknown keys are valid-but-empty rooms
        let count = usecase
            .execute(ConnectionId::generate(), RoomKey::channel("never-joined"))
            .await;

        // then:
        assert_eq!(count, 0);
    }
}
