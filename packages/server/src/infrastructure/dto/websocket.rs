//! WebSocket wire protocol DTOs.
//!
//! Text frames carry JSON tagged by `"type"`; event names are snake_case
//! and payload fields camelCase, matching what the browser client already
//! speaks. These shapes are part of the external contract and must not
//! drift.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Channel, ChannelId, ChatMessage, PresenceStatus, Stream, StreamId, UserId,
};

/// Events a client may send on the socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Bind an identity to the connection
    Authenticate { token: String },
    /// Join a channel's chat room
    JoinChannel { channel_id: ChannelId },
    /// Leave a channel's chat room
    LeaveChannel { channel_id: ChannelId },
    /// Join a stream's viewer room
    JoinStream { stream_id: StreamId },
    /// Leave a stream's viewer room
    LeaveStream { stream_id: StreamId },
    /// Ephemeral typing indicator, relayed to the channel room
    Typing {
        channel_id: ChannelId,
        is_typing: bool,
    },
}

/// Events the server pushes to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Authentication handshake acknowledgement (unicast)
    Authenticated { success: bool },
    /// Authentication denial (unicast); the connection stays usable
    AuthenticationError { error: String },
    /// Someone joined a channel room; `userId` absent for guest joins
    UserJoined {
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
    },
    /// Someone left a channel room
    UserLeft {
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
    },
    /// Typing indicator relay (room-scoped, sender excluded)
    UserTyping {
        #[serde(skip_serializing_if = "Option::is_none")]
        user_id: Option<UserId>,
        is_typing: bool,
    },
    /// A user was added to a channel's persisted member list (room-scoped)
    UserJoinedChannel {
        user_id: UserId,
        channel_id: ChannelId,
    },
    /// A user was added to a stream's persisted viewer list (room-scoped).
    /// `viewerCount` is the persisted list size, not the live room count.
    ViewerJoined {
        stream_id: StreamId,
        viewer_count: usize,
    },
    /// Live viewer count for a stream room
    ViewerCountUpdate { stream_id: StreamId, count: usize },
    /// A message was persisted into a channel (room-scoped)
    NewMessage { message: ChatMessage },
    /// A channel was created (global)
    ChannelCreated { channel: Channel },
    /// A user's presence changed (global)
    UserStatusChanged {
        user_id: UserId,
        status: PresenceStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// A user's last connection went away (global)
    UserDisconnected { user_id: UserId },
    /// Stream lifecycle notices (global)
    StreamScheduled { stream: Stream },
    StreamStarted { stream_id: StreamId, stream: Stream },
    StreamEnded { stream_id: StreamId },
}

impl ServerEvent {
    /// Serialize for the wire. These DTOs contain nothing that can fail to
    /// serialize.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("ServerEvent serialization is infallible")
    }
}
