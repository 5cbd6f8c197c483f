//! UseCase: explicit presence change.
//!
//! REST-originated status updates ("away", back to "online", forced
//! "offline") land here. The store is an idempotent upsert; the caller
//! follows up with a global `user_status_changed` broadcast.

use crate::domain::{PresenceStatus, UserId};

use super::SharedPresence;

/// Presence update use case
pub struct UpdateStatusUseCase {
    presence: SharedPresence,
}

impl UpdateStatusUseCase {
    pub fn new(presence: SharedPresence) -> Self {
        Self { presence }
    }

    /// Set a user's status. Total function: any user id and any status
    /// combination is accepted.
    pub async fn execute(&self, user_id: UserId, status: PresenceStatus) {
        let mut presence = self.presence.lock().await;
        presence.set_status(user_id.clone(), status);
        tracing::debug!("User '{}' status set to {:?}", user_id, status);
    }

    /// Current status for a user (`offline` if unknown)
    pub async fn current(&self, user_id: &UserId) -> PresenceStatus {
        self.presence.lock().await.get_status(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PresenceStore;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn create_usecase() -> UpdateStatusUseCase {
        UpdateStatusUseCase::new(Arc::new(Mutex::new(PresenceStore::new())))
    }

    #[tokio::test]
    async fn test_execute_sets_any_status() {
        // given:
        let usecase = create_usecase();
        let user = UserId::new("u1");

        // when:
        usecase.execute(user.clone(), PresenceStatus::Away).await;

        // then:
        assert_eq!(usecase.current(&user).await, PresenceStatus::Away);
    }

    #[tokio::test]
    async fn test_unknown_user_reads_offline() {
        // given:
        let usecase = create_usecase();

        // then:
        assert_eq!(
            usecase.current(&UserId::new("ghost")).await,
            PresenceStatus::Offline
        );
    }
}
