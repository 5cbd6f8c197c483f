//! UseCase: create a chat channel.

use std::sync::Arc;

use crate::domain::{Channel, ChatRepository, NewChannel, RepositoryError};

/// Channel creation use case
pub struct CreateChannelUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl CreateChannelUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// Persist a new channel; the `channel_created` broadcast fires only
    /// after this returns `Ok`.
    pub async fn execute(&self, channel: NewChannel) -> Result<Channel, RepositoryError> {
        self.repository.create_channel(channel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChannelId, ChannelKind, MockChatRepository, UserId};

    #[tokio::test]
    async fn test_execute_returns_created_channel() {
        // given:
        let mut repository = MockChatRepository::new();
        repository
            .expect_create_channel()
            .withf(|new| new.name == "geral")
            .returning(|new| {
                Ok(Channel {
                    id: ChannelId::new("c1"),
                    name: new.name,
                    description: new.description,
                    kind: new.kind,
                    members: vec![new.created_by.clone()],
                    created_by: new.created_by,
                    created_at: 1000,
                })
            });
        let usecase = CreateChannelUseCase::new(Arc::new(repository));

        // when:
        let channel = usecase
            .execute(NewChannel {
                name: "geral".to_string(),
                description: Some("general talk".to_string()),
                kind: ChannelKind::Public,
                created_by: UserId::new("u1"),
            })
            .await
            .unwrap();

        // then:
        assert_eq!(channel.id, ChannelId::new("c1"));
        assert_eq!(channel.created_by, UserId::new("u1"));
    }
}
