//! UseCase: stream lifecycle transitions (schedule / start / end).
//!
//! Start and end are host-only; the repository enforces both the host
//! check and the legal state transitions (scheduled -> live -> ended).

use std::sync::Arc;

use crate::domain::{ChatRepository, NewStream, RepositoryError, Stream, StreamId, UserId};

/// Stream lifecycle use case
pub struct StreamLifecycleUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl StreamLifecycleUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// Persist a newly scheduled stream.
    pub async fn schedule(&self, stream: NewStream) -> Result<Stream, RepositoryError> {
        self.repository.schedule_stream(stream).await
    }

    /// Transition a scheduled stream to live. Host-only.
    pub async fn start(
        &self,
        stream_id: &StreamId,
        user_id: &UserId,
    ) -> Result<Stream, RepositoryError> {
        self.repository.start_stream(stream_id, user_id).await
    }

    /// Transition a live stream to ended. Host-only.
    pub async fn end(
        &self,
        stream_id: &StreamId,
        user_id: &UserId,
    ) -> Result<Stream, RepositoryError> {
        self.repository.end_stream(stream_id, user_id).await
    }
}
