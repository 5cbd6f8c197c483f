//! UseCase: add a user to a channel's persisted member list.
//!
//! Membership is durable and idempotent; the `user_joined_channel`
//! broadcast fires only after the write commits.

use std::sync::Arc;

use crate::domain::{Channel, ChannelId, ChatRepository, RepositoryError, UserId};

/// Channel membership use case
pub struct JoinChannelMemberUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl JoinChannelMemberUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// Add the user to the channel's member list.
    ///
    /// # Returns
    ///
    /// * `Ok(Channel)` - the updated channel, ready to broadcast
    /// * `Err(RepositoryError)` - the write failed; nothing may be broadcast
    pub async fn execute(
        &self,
        channel_id: &ChannelId,
        user_id: &UserId,
    ) -> Result<Channel, RepositoryError> {
        self.repository.add_member(channel_id, user_id).await
    }
}
