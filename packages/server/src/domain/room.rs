//! Room keys: the broadcast-group identifiers of the fan-out layer.
//!
//! Channels and streams share one logical key space on the wire, where a
//! stream room is spelled `stream_<id>`. Internally the two are kept apart
//! as a tagged key so a channel id that happens to start with `stream_`
//! cannot collide with a stream room.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix that marks a stream room in the wire-level key space
const STREAM_KEY_PREFIX: &str = "stream_";

/// Channel identifier (Domain Model)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stream identifier (Domain Model)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(String);

impl StreamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tagged room key
///
/// A room is either a channel's chat room or a stream's viewer room. Any
/// key is valid; a key nobody ever joined simply names an empty room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoomKey {
    Channel(ChannelId),
    Stream(StreamId),
}

impl RoomKey {
    pub fn channel(id: impl Into<String>) -> Self {
        RoomKey::Channel(ChannelId::new(id))
    }

    pub fn stream(id: impl Into<String>) -> Self {
        RoomKey::Stream(StreamId::new(id))
    }

    /// Wire-level spelling of the key (`<channel_id>` or `stream_<stream_id>`)
    pub fn wire_key(&self) -> String {
        match self {
            RoomKey::Channel(id) => id.as_str().to_string(),
            RoomKey::Stream(id) => format!("{}{}", STREAM_KEY_PREFIX, id.as_str()),
        }
    }

    /// Parse the wire-level spelling back into a tagged key
    pub fn from_wire_key(key: &str) -> Self {
        match key.strip_prefix(STREAM_KEY_PREFIX) {
            Some(stream_id) => RoomKey::stream(stream_id),
            None => RoomKey::channel(key),
        }
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_key())
    }
}
