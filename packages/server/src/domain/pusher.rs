//! Message pusher trait definition.
//!
//! The fan-out layer's delivery seam: the use cases decide *who* receives
//! an event, the pusher owns the per-connection send queues and performs
//! the actual delivery. Queues are FIFO per connection, which is what
//! gives the per-connection ordering guarantee; nothing is guaranteed
//! across connections.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::registry::ConnectionId;

/// Send-queue handle for one connection
///
/// The socket handler drains the receiving end and writes frames to the
/// transport; everything behind the pusher only ever enqueues.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The connection is not (or no longer) registered
    #[error("connection '{0}' not found")]
    ClientNotFound(ConnectionId),
    /// The connection's queue is closed (client went away mid-delivery)
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// Event delivery to connected clients
///
/// `broadcast` and `broadcast_all` are best-effort: a connection that
/// disconnects mid-delivery is skipped with a log line, never an error.
/// Only `push_to` (unicast, used for authentication acks) surfaces a
/// missing connection to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a freshly accepted connection's send queue
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Drop a connection's send queue on teardown
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Unicast to a single connection
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Deliver to an explicit list of connections, best-effort
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str);

    /// Deliver to every registered connection, best-effort
    async fn broadcast_all(&self, content: &str);
}
