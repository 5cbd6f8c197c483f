//! Use case layer: one struct per operation.
//!
//! Each use case owns `Arc` handles to exactly the state and trait seams
//! it needs, so tests can wire isolated instances. Use cases mutate the
//! shared realtime state and return what the caller needs in order to
//! broadcast; the event JSON itself is built in the UI layer from DTOs
//! and handed to `NotifyUseCase`, keeping this layer free of wire
//! concerns.

mod authenticate;
mod create_channel;
mod disconnect;
mod join_channel_member;
mod join_room;
mod join_stream_viewer;
mod leave_room;
mod notify;
mod send_message;
mod stream_lifecycle;
mod update_status;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{PresenceStore, RoomRegistry};

/// Presence store handle as injected into use cases
pub type SharedPresence = Arc<Mutex<PresenceStore>>;
/// Room registry handle as injected into use cases
pub type SharedRegistry = Arc<Mutex<RoomRegistry>>;

pub use authenticate::AuthenticateUseCase;
pub use create_channel::CreateChannelUseCase;
pub use disconnect::{DisconnectSummary, DisconnectUseCase};
pub use join_channel_member::JoinChannelMemberUseCase;
pub use join_room::JoinRoomUseCase;
pub use join_stream_viewer::JoinStreamViewerUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use notify::NotifyUseCase;
pub use send_message::SendMessageUseCase;
pub use stream_lifecycle::StreamLifecycleUseCase;
pub use update_status::UpdateStatusUseCase;
