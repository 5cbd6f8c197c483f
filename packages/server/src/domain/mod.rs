//! Domain layer: value objects, in-memory realtime state, and the trait
//! seams the use cases depend on. No I/O happens here.

mod entities;
mod identity;
mod presence;
mod registry;
mod repository;
mod room;

pub mod pusher;
pub mod verifier;

pub use entities::{Channel, ChannelKind, ChatMessage, Stream, StreamStatus};
pub use identity::{Role, UserId, UserIdentity};
pub use presence::{PresenceStatus, PresenceStore};
pub use pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use registry::{ConnectionId, RoomRegistry};
pub use repository::{ChatRepository, NewChannel, NewStream, RepositoryError};
pub use room::{ChannelId, RoomKey, StreamId};
pub use verifier::{TokenVerifier, VerifyError};

#[cfg(test)]
pub use pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::MockChatRepository;
#[cfg(test)]
pub use verifier::MockTokenVerifier;
