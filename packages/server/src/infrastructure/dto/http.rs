//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{Channel, ChannelKind, ChatMessage, PresenceStatus, Stream};

/// `POST /api/channels` request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ChannelKind,
}

/// `POST /api/channels/{channel_id}/messages` request body
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub text: String,
}

/// `POST /api/streams` request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStreamRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unix timestamp in milliseconds
    #[serde(default)]
    pub scheduled_date: Option<i64>,
}

/// `PATCH /api/users/{user_id}/status` request body
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: PresenceStatus,
}

/// Channel creation response
#[derive(Debug, Serialize)]
pub struct ChannelResponse {
    pub channel: Channel,
}

/// Message creation response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: ChatMessage,
}

/// Stream lifecycle response
#[derive(Debug, Serialize)]
pub struct StreamResponse {
    pub stream: Stream,
}

/// One row of `GET /debug/rooms`
#[derive(Debug, Serialize, Deserialize)]
pub struct RoomCountDto {
    pub room: String,
    pub count: usize,
}
