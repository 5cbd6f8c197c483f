//! Persisted entities, as seen by the realtime core.
//!
//! The document store owns these durably; the core only reads and writes
//! them through the `ChatRepository` seam so that broadcasts stay
//! consistent with persisted state. Wire serialization uses camelCase to
//! stay compatible with the browser client.

use serde::{Deserialize, Serialize};

use super::identity::UserId;
use super::room::{ChannelId, StreamId};

/// Channel visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Public,
    Private,
}

impl Default for ChannelKind {
    fn default() -> Self {
        ChannelKind::Public
    }
}

/// A persisted chat channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ChannelKind,
    pub created_by: UserId,
    /// Persisted membership; the creator is a member from the start
    #[serde(default)]
    pub members: Vec<UserId>,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
}

/// A persisted chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub channel: ChannelId,
    pub user: UserId,
    pub text: String,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
}

/// Stream lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Scheduled,
    Live,
    Ended,
    Cancelled,
}

/// A persisted live stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: StreamId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub host: UserId,
    pub status: StreamStatus,
    /// Persisted viewer list, distinct from the live connection count
    #[serde(default)]
    pub viewers: Vec<UserId>,
    /// High-water mark of the persisted viewer list
    #[serde(default)]
    pub max_viewers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<i64>,
    /// Seconds between start and end, filled in when the stream ends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_serializes_camel_case() {
        // given:
        let channel = Channel {
            id: ChannelId::new("c1"),
            name: "geral".to_string(),
            description: None,
            kind: ChannelKind::Public,
            created_by: UserId::new("u1"),
            members: vec![UserId::new("u1")],
            created_at: 1000,
        };

        // when:
        let json = serde_json::to_value(&channel).unwrap();

        // then:
        assert_eq!(json["createdBy"], "u1");
        assert_eq!(json["createdAt"], 1000);
        assert_eq!(json["type"], "public");
        assert_eq!(json["members"], serde_json::json!(["u1"]));
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_stream_status_serializes_lowercase() {
        // then:
        assert_eq!(
            serde_json::to_string(&StreamStatus::Live).unwrap(),
            "\"live\""
        );
    }
}
