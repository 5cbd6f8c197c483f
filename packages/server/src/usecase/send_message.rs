//! UseCase: persist a chat message.
//!
//! The write must commit before any `new_message` broadcast fires; the
//! HTTP handler only notifies the channel room once this returns `Ok`.

use std::sync::Arc;

use crate::domain::{ChannelId, ChatMessage, ChatRepository, RepositoryError, UserId};

/// Message persistence use case
pub struct SendMessageUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl SendMessageUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// Persist a message into a channel.
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - the durable message, ready to broadcast
    /// * `Err(RepositoryError)` - the write failed; nothing may be broadcast
    pub async fn execute(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
        text: String,
    ) -> Result<ChatMessage, RepositoryError> {
        self.repository.add_message(channel_id, user_id, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockChatRepository;

    #[tokio::test]
    async fn test_execute_returns_persisted_message() {
        // given:
        let mut repository = MockChatRepository::new();
        repository
            .expect_add_message()
            .withf(|channel, user, text| {
                channel.as_str() == "c1" && user.as_str() == "u1" && text == "hello"
            })
            .returning(|channel, user, text| {
                Ok(ChatMessage {
                    id: "m1".to_string(),
                    channel,
                    user,
                    text,
                    created_at: 1000,
                })
            });
        let usecase = SendMessageUseCase::new(Arc::new(repository));

        // when:
        let result = usecase
            .execute(ChannelId::new("c1"), UserId::new("u1"), "hello".to_string())
            .await;

        // then:
        let message = result.unwrap();
        assert_eq!(message.id, "m1");
        assert_eq!(message.text, "hello");
    }

    #[tokio::test]
    async fn test_execute_propagates_write_failure() {
        // given: the store rejects the write
        let mut repository = MockChatRepository::new();
        repository
            .expect_add_message()
            .returning(|channel, _, _| {
                Err(RepositoryError::ChannelNotFound(
                    channel.as_str().to_string(),
                ))
            });
        let usecase = SendMessageUseCase::new(Arc::new(repository));

        // when:
        let result = usecase
            .execute(ChannelId::new("nope"), UserId::new("u1"), "hi".to_string())
            .await;

        // then: caller must not broadcast
        assert!(matches!(
            result,
            Err(RepositoryError::ChannelNotFound(_))
        ));
    }
}
