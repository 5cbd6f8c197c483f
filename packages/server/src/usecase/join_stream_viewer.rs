//! UseCase: add a user to a stream's persisted viewer list.
//!
//! The viewer list and its high-water mark are durable bookkeeping,
//! separate from the live room viewer count; the `viewer_joined`
//! broadcast fires only after the write commits.

use std::sync::Arc;

use crate::domain::{ChatRepository, RepositoryError, Stream, StreamId, UserId};

/// Stream viewer bookkeeping use case
pub struct JoinStreamViewerUseCase {
    repository: Arc<dyn ChatRepository>,
}

impl JoinStreamViewerUseCase {
    pub fn new(repository: Arc<dyn ChatRepository>) -> Self {
        Self { repository }
    }

    /// Add the user to the stream's viewer list.
    ///
    /// # Returns
    ///
    /// * `Ok(Stream)` - the updated stream, ready to broadcast
    /// * `Err(RepositoryError)` - the write failed; nothing may be broadcast
    pub async fn execute(
        &self,
        stream_id: &StreamId,
        user_id: &UserId,
    ) -> Result<Stream, RepositoryError> {
        self.repository.add_viewer(stream_id, user_id).await
    }
}
