//! UseCase: join a room.
//!
//! Idempotent membership update. Joins are accepted from connections that
//! never authenticated (guest viewing); the caller decides what identity,
//! if any, to put into the resulting broadcast.

use crate::domain::{ConnectionId, RoomKey};

use super::SharedRegistry;

/// Room join use case
pub struct JoinRoomUseCase {
    registry: SharedRegistry,
}

impl JoinRoomUseCase {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Add the connection to the room.
    ///
    /// # Returns
    ///
    /// The room's membership count after the join. Total function: any
    /// room key is valid, joining twice changes nothing.
    pub async fn execute(&self, connection_id: ConnectionId, room: RoomKey) -> usize {
        let mut registry = self.registry.lock().await;
        registry.join(room.clone(), connection_id);
        let count = registry.count(&room);
        tracing::debug!(
            "Connection '{}' joined room '{}' (count {})",
            connection_id,
            room,
            count
        );
        count
    }
}
