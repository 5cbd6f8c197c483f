//! Repository trait definition.
//!
//! Interface to the document store that durably owns channels, messages
//! and streams. The realtime core writes through this seam *before*
//! broadcasting, so clients can never observe an event for data that is
//! not durable. The concrete implementation lives in the infrastructure
//! layer (dependency inversion).

use async_trait::async_trait;
use thiserror::Error;

use super::entities::{Channel, ChannelKind, ChatMessage, Stream};
use super::identity::UserId;
use super::room::{ChannelId, StreamId};

/// Persistence errors surfaced to the HTTP layer
///
/// A repository error must prevent the corresponding broadcast from
/// firing at all; "event fired, write failed" is a correctness bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("channel '{0}' not found")]
    ChannelNotFound(String),
    #[error("stream '{0}' not found")]
    StreamNotFound(String),
    #[error("only the host may control the stream")]
    NotHost,
    #[error("invalid stream state transition: {0}")]
    InvalidState(String),
}

/// New-channel input as accepted from the REST layer
#[derive(Debug, Clone)]
pub struct NewChannel {
    pub name: String,
    pub description: Option<String>,
    pub kind: ChannelKind,
    pub created_by: UserId,
}

/// New-stream input as accepted from the REST layer
#[derive(Debug, Clone)]
pub struct NewStream {
    pub title: String,
    pub description: Option<String>,
    pub host: UserId,
    pub scheduled_at: Option<i64>,
}

/// Chat/streaming document store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Persist a new channel, returning it with server-assigned id
    async fn create_channel(&self, channel: NewChannel) -> Result<Channel, RepositoryError>;

    /// Add a user to a channel's persisted member list; idempotent
    async fn add_member(
        &self,
        channel_id: &ChannelId,
        user_id: &UserId,
    ) -> Result<Channel, RepositoryError>;

    /// Persist a message into an existing channel
    async fn add_message(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
        text: String,
    ) -> Result<ChatMessage, RepositoryError>;

    /// Persist a newly scheduled stream
    async fn schedule_stream(&self, stream: NewStream) -> Result<Stream, RepositoryError>;

    /// Add a user to a stream's persisted viewer list; idempotent.
    /// Updates the viewer high-water mark as a side effect.
    async fn add_viewer(
        &self,
        stream_id: &StreamId,
        user_id: &UserId,
    ) -> Result<Stream, RepositoryError>;

    /// Transition a stream to live; host-only
    async fn start_stream(
        &self,
        stream_id: &StreamId,
        user_id: &UserId,
    ) -> Result<Stream, RepositoryError>;

    /// Transition a stream to ended, recording its duration; host-only
    async fn end_stream(
        &self,
        stream_id: &StreamId,
        user_id: &UserId,
    ) -> Result<Stream, RepositoryError>;
}
