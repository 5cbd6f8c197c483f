//! In-memory implementation of the `ChatRepository` trait.
//!
//! HashMaps under a single mutex stand in for the document store. Good
//! enough for tests and demo deployments; a real deployment would put a
//! database-backed implementation behind the same trait.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use atrio_shared::time::Clock;

use crate::domain::{
    Channel, ChannelId, ChatRepository, ChatMessage, NewChannel, NewStream, RepositoryError,
    Stream, StreamId, StreamStatus, UserId,
};

#[derive(Default)]
struct StoreInner {
    channels: HashMap<ChannelId, Channel>,
    messages: HashMap<ChannelId, Vec<ChatMessage>>,
    streams: HashMap<StreamId, Stream>,
}

/// In-memory chat/streaming document store
pub struct InMemoryChatRepository {
    inner: Mutex<StoreInner>,
    clock: Arc<dyn Clock>,
}

impl InMemoryChatRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            clock,
        }
    }

    /// Messages stored for a channel (test/debug helper)
    pub async fn message_count(&self, channel_id: &ChannelId) -> usize {
        let inner = self.inner.lock().await;
        inner.messages.get(channel_id).map(Vec::len).unwrap_or(0)
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn create_channel(&self, channel: NewChannel) -> Result<Channel, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let id = ChannelId::new(Uuid::new_v4().to_string());
        let created = Channel {
            id: id.clone(),
            name: channel.name,
            description: channel.description,
            kind: channel.kind,
            members: vec![channel.created_by.clone()],
            created_by: channel.created_by,
            created_at: self.clock.now_millis(),
        };
        inner.channels.insert(id, created.clone());
        Ok(created)
    }

    async fn add_member(
        &self,
        channel_id: &ChannelId,
        user_id: &UserId,
    ) -> Result<Channel, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let channel = inner
            .channels
            .get_mut(channel_id)
            .ok_or_else(|| RepositoryError::ChannelNotFound(channel_id.as_str().to_string()))?;

        if !channel.members.contains(user_id) {
            channel.members.push(user_id.clone());
        }
        Ok(channel.clone())
    }

    async fn add_message(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
        text: String,
    ) -> Result<ChatMessage, RepositoryError> {
        let mut inner = self.inner.lock().await;
        if !inner.channels.contains_key(&channel_id) {
            return Err(RepositoryError::ChannelNotFound(
                channel_id.as_str().to_string(),
            ));
        }
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            channel: channel_id.clone(),
            user: user_id,
            text,
            created_at: self.clock.now_millis(),
        };
        inner
            .messages
            .entry(channel_id)
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn schedule_stream(&self, stream: NewStream) -> Result<Stream, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let id = StreamId::new(Uuid::new_v4().to_string());
        let created = Stream {
            id: id.clone(),
            title: stream.title,
            description: stream.description,
            host: stream.host,
            status: StreamStatus::Scheduled,
            viewers: Vec::new(),
            max_viewers: 0,
            scheduled_at: stream.scheduled_at,
            started_at: None,
            ended_at: None,
            duration: None,
        };
        inner.streams.insert(id, created.clone());
        Ok(created)
    }

    async fn add_viewer(
        &self,
        stream_id: &StreamId,
        user_id: &UserId,
    ) -> Result<Stream, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let stream = inner
            .streams
            .get_mut(stream_id)
            .ok_or_else(|| RepositoryError::StreamNotFound(stream_id.as_str().to_string()))?;

        if !stream.viewers.contains(user_id) {
            stream.viewers.push(user_id.clone());
        }
        stream.max_viewers = stream.max_viewers.max(stream.viewers.len());
        Ok(stream.clone())
    }

    async fn start_stream(
        &self,
        stream_id: &StreamId,
        user_id: &UserId,
    ) -> Result<Stream, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let stream = inner
            .streams
            .get_mut(stream_id)
            .ok_or_else(|| RepositoryError::StreamNotFound(stream_id.as_str().to_string()))?;

        if &stream.host != user_id {
            return Err(RepositoryError::NotHost);
        }
        if stream.status != StreamStatus::Scheduled {
            return Err(RepositoryError::InvalidState(format!(
                "cannot start a stream in status {:?}",
                stream.status
            )));
        }

        stream.status = StreamStatus::Live;
        stream.started_at = Some(self.clock.now_millis());
        Ok(stream.clone())
    }

    async fn end_stream(
        &self,
        stream_id: &StreamId,
        user_id: &UserId,
    ) -> Result<Stream, RepositoryError> {
        let mut inner = self.inner.lock().await;
        let stream = inner
            .streams
            .get_mut(stream_id)
            .ok_or_else(|| RepositoryError::StreamNotFound(stream_id.as_str().to_string()))?;

        if &stream.host != user_id {
            return Err(RepositoryError::NotHost);
        }
        if stream.status != StreamStatus::Live {
            return Err(RepositoryError::InvalidState(format!(
                "cannot end a stream in status {:?}",
                stream.status
            )));
        }

        let ended_at = self.clock.now_millis();
        stream.status = StreamStatus::Ended;
        stream.ended_at = Some(ended_at);
        stream.duration = stream.started_at.map(|started| (ended_at - started) / 1000);
        Ok(stream.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrio_shared::time::FixedClock;
    use crate::domain::ChannelKind;

    fn create_test_repository() -> InMemoryChatRepository {
        InMemoryChatRepository::new(Arc::new(FixedClock::new(1_700_000_000_000)))
    }

    fn new_channel(name: &str) -> NewChannel {
        NewChannel {
            name: name.to_string(),
            description: None,
            kind: ChannelKind::Public,
            created_by: UserId::new("u1"),
        }
    }

    #[tokio::test]
    async fn test_create_channel_assigns_id_and_timestamp() {
        // given:
        let repo = create_test_repository();

        // when:
        let channel = repo.create_channel(new_channel("geral")).await.unwrap();

        // then:
        assert!(!channel.id.as_str().is_empty());
        assert_eq!(channel.name, "geral");
        assert_eq!(channel.created_at, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn test_creator_is_member_from_the_start() {
        // given:
        let repo = create_test_repository();

        // when:
        let channel = repo.create_channel(new_channel("geral")).await.unwrap();

        // then:
        assert_eq!(channel.members, vec![UserId::new("u1")]);
    }

    #[tokio::test]
    async fn test_add_member_is_idempotent() {
        // given:
        let repo = create_test_repository();
        let channel = repo.create_channel(new_channel("geral")).await.unwrap();
        let user = UserId::new("u2");

        // when: joining twice
        repo.add_member(&channel.id, &user).await.unwrap();
        let updated = repo.add_member(&channel.id, &user).await.unwrap();

        // then: the member appears once
        assert_eq!(updated.members, vec![UserId::new("u1"), user]);
    }

    #[tokio::test]
    async fn test_add_member_to_unknown_channel_fails() {
        // given:
        let repo = create_test_repository();

        // when:
        let result = repo
            .add_member(&ChannelId::new("nope"), &UserId::new("u1"))
            .await;

        // then:
        assert_eq!(
            result.unwrap_err(),
            RepositoryError::ChannelNotFound("nope".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_viewer_tracks_high_water_mark() {
        // given:
        let repo = create_test_repository();
        let stream = repo
            .schedule_stream(NewStream {
                title: "launch".to_string(),
                description: None,
                host: UserId::new("host"),
                scheduled_at: None,
            })
            .await
            .unwrap();

        // when: two distinct viewers join, one of them twice
        repo.add_viewer(&stream.id, &UserId::new("v1")).await.unwrap();
        repo.add_viewer(&stream.id, &UserId::new("v2")).await.unwrap();
        let updated = repo.add_viewer(&stream.id, &UserId::new("v1")).await.unwrap();

        // then:
        assert_eq!(updated.viewers.len(), 2);
        assert_eq!(updated.max_viewers, 2);
    }

    #[tokio::test]
    async fn test_add_viewer_to_unknown_stream_fails() {
        // given:
        let repo = create_test_repository();

        // when:
        let result = repo
            .add_viewer(&StreamId::new("nope"), &UserId::new("v1"))
            .await;

        // then:
        assert_eq!(
            result.unwrap_err(),
            RepositoryError::StreamNotFound("nope".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_message_to_existing_channel() {
        // given:
        let repo = create_test_repository();
        let channel = repo.create_channel(new_channel("geral")).await.unwrap();

        // when:
        let message = repo
            .add_message(channel.id.clone(), UserId::new("u1"), "hi".to_string())
            .await
            .unwrap();

        // then:
        assert_eq!(message.channel, channel.id);
        assert_eq!(message.text, "hi");
        assert_eq!(repo.message_count(&channel.id).await, 1);
    }

    #[tokio::test]
    async fn test_add_message_to_unknown_channel_fails() {
        // given:
        let repo = create_test_repository();

        // when:
        let result = repo
            .add_message(ChannelId::new("nope"), UserId::new("u1"), "hi".to_string())
            .await;

        // then: the write fails, so no broadcast may follow
        assert_eq!(
            result.unwrap_err(),
            RepositoryError::ChannelNotFound("nope".to_string())
        );
    }

    #[tokio::test]
    async fn test_stream_lifecycle_happy_path() {
        // given:
        let repo = create_test_repository();
        let host = UserId::new("host");
        let stream = repo
            .schedule_stream(NewStream {
                title: "launch".to_string(),
                description: None,
                host: host.clone(),
                scheduled_at: Some(1_700_000_100_000),
            })
            .await
            .unwrap();
        assert_eq!(stream.status, StreamStatus::Scheduled);

        // when:
        let live = repo.start_stream(&stream.id, &host).await.unwrap();
        let ended = repo.end_stream(&stream.id, &host).await.unwrap();

        // then:
        assert_eq!(live.status, StreamStatus::Live);
        assert_eq!(ended.status, StreamStatus::Ended);
        assert_eq!(ended.duration, Some(0));
    }

    #[tokio::test]
    async fn test_only_host_may_control_stream() {
        // given:
        let repo = create_test_repository();
        let host = UserId::new("host");
        let stream = repo
            .schedule_stream(NewStream {
                title: "launch".to_string(),
                description: None,
                host: host.clone(),
                scheduled_at: None,
            })
            .await
            .unwrap();

        // when:
        let result = repo.start_stream(&stream.id, &UserId::new("intruder")).await;

        // then:
        assert_eq!(result.unwrap_err(), RepositoryError::NotHost);
    }

    #[tokio::test]
    async fn test_end_requires_live_stream() {
        // given:
        let repo = create_test_repository();
        let host = UserId::new("host");
        let stream = repo
            .schedule_stream(NewStream {
                title: "launch".to_string(),
                description: None,
                host: host.clone(),
                scheduled_at: None,
            })
            .await
            .unwrap();

        // when: ending a stream that never went live
        let result = repo.end_stream(&stream.id, &host).await;

        // then:
        assert!(matches!(
            result.unwrap_err(),
            RepositoryError::InvalidState(_)
        ));
    }
}
