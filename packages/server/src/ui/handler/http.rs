//! HTTP API endpoint handlers.
//!
//! Every mutating handler follows the same shape: authenticate, commit the
//! repository write, and only then broadcast the matching event. A failed
//! write maps to an HTTP error and nothing is broadcast.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{ChannelId, NewChannel, NewStream, RepositoryError, StreamId, UserId},
    infrastructure::dto::{
        http::{
            ChannelResponse, CreateChannelRequest, MessageResponse, PostMessageRequest,
            RoomCountDto, ScheduleStreamRequest, StreamResponse, UpdateStatusRequest,
        },
        websocket::ServerEvent,
    },
    ui::{auth::AuthUser, state::AppState},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint: live membership count per room (for testing purposes)
pub async fn debug_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomCountDto>> {
    let registry = state.registry.lock().await;
    let counts = registry
        .room_counts()
        .into_iter()
        .map(|(room, count)| RoomCountDto {
            room: room.wire_key(),
            count,
        })
        .collect();
    Json(counts)
}

/// Explicit presence change, broadcast to every connection
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    AuthUser(identity): AuthUser,
    Json(body): Json<UpdateStatusRequest>,
) -> StatusCode {
    let user_id = UserId::new(user_id);
    // The presence store accepts any id, so the only user a caller can
    // prove exists is their own; anything else is a 404.
    if user_id != identity.id {
        return StatusCode::NOT_FOUND;
    }
    state
        .update_status_usecase
        .execute(user_id.clone(), body.status)
        .await;

    let event = ServerEvent::UserStatusChanged {
        user_id,
        status: body.status,
        name: None,
    }
    .to_json();
    state.notify_usecase.send_to_all(&event).await;

    StatusCode::NO_CONTENT
}

/// Create a channel, then announce it to every connection
pub async fn create_channel(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Json(body): Json<CreateChannelRequest>,
) -> Result<(StatusCode, Json<ChannelResponse>), (StatusCode, Json<serde_json::Value>)> {
    let channel = state
        .create_channel_usecase
        .execute(NewChannel {
            name: body.name,
            description: body.description,
            kind: body.kind,
            created_by: identity.id,
        })
        .await
        .map_err(repository_error_response)?;

    let event = ServerEvent::ChannelCreated {
        channel: channel.clone(),
    }
    .to_json();
    state.notify_usecase.send_to_all(&event).await;

    Ok((StatusCode::CREATED, Json(ChannelResponse { channel })))
}

/// Add the caller to a channel's member list, then notify the channel room
pub async fn join_channel(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
    AuthUser(identity): AuthUser,
) -> Result<Json<ChannelResponse>, (StatusCode, Json<serde_json::Value>)> {
    let channel_id = ChannelId::new(channel_id);
    let channel = state
        .join_channel_member_usecase
        .execute(&channel_id, &identity.id)
        .await
        .map_err(repository_error_response)?;

    let event = ServerEvent::UserJoinedChannel {
        user_id: identity.id,
        channel_id: channel_id.clone(),
    }
    .to_json();
    state
        .notify_usecase
        .send_to_room(&crate::domain::RoomKey::Channel(channel_id), &event)
        .await;

    Ok(Json(ChannelResponse { channel }))
}

/// Persist a message, then deliver it to the channel room
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
    AuthUser(identity): AuthUser,
    Json(body): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, Json<serde_json::Value>)> {
    let channel_id = ChannelId::new(channel_id);
    let message = state
        .send_message_usecase
        .execute(channel_id.clone(), identity.id, body.text)
        .await
        .map_err(repository_error_response)?;

    let event = ServerEvent::NewMessage {
        message: message.clone(),
    }
    .to_json();
    state
        .notify_usecase
        .send_to_room(&crate::domain::RoomKey::Channel(channel_id), &event)
        .await;

    Ok((StatusCode::CREATED, Json(MessageResponse { message })))
}

/// Schedule a stream, then announce it to every connection
pub async fn schedule_stream(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    Json(body): Json<ScheduleStreamRequest>,
) -> Result<(StatusCode, Json<StreamResponse>), (StatusCode, Json<serde_json::Value>)> {
    let stream = state
        .stream_lifecycle_usecase
        .schedule(NewStream {
            title: body.title,
            description: body.description,
            host: identity.id,
            scheduled_at: body.scheduled_date,
        })
        .await
        .map_err(repository_error_response)?;

    let event = ServerEvent::StreamScheduled {
        stream: stream.clone(),
    }
    .to_json();
    state.notify_usecase.send_to_all(&event).await;

    Ok((StatusCode::CREATED, Json(StreamResponse { stream })))
}

/// Add the caller to a stream's viewer list, then notify the stream room.
/// The broadcast carries the persisted list size, which can differ from
/// the live `viewer_count_update` room count.
pub async fn join_stream(
    State(state): State<Arc<AppState>>,
    Path(stream_id): Path<String>,
    AuthUser(identity): AuthUser,
) -> Result<Json<StreamResponse>, (StatusCode, Json<serde_json::Value>)> {
    let stream_id = StreamId::new(stream_id);
    let stream = state
        .join_stream_viewer_usecase
        .execute(&stream_id, &identity.id)
        .await
        .map_err(repository_error_response)?;

    let event = ServerEvent::ViewerJoined {
        stream_id: stream_id.clone(),
        viewer_count: stream.viewers.len(),
    }
    .to_json();
    state
        .notify_usecase
        .send_to_room(&crate::domain::RoomKey::Stream(stream_id), &event)
        .await;

    Ok(Json(StreamResponse { stream }))
}

/// Transition a stream to live (host-only), then announce it
pub async fn start_stream(
    State(state): State<Arc<AppState>>,
    Path(stream_id): Path<String>,
    AuthUser(identity): AuthUser,
) -> Result<Json<StreamResponse>, (StatusCode, Json<serde_json::Value>)> {
    let stream_id = StreamId::new(stream_id);
    let stream = state
        .stream_lifecycle_usecase
        .start(&stream_id, &identity.id)
        .await
        .map_err(repository_error_response)?;

    let event = ServerEvent::StreamStarted {
        stream_id,
        stream: stream.clone(),
    }
    .to_json();
    state.notify_usecase.send_to_all(&event).await;

    Ok(Json(StreamResponse { stream }))
}

/// Transition a stream to ended (host-only), then announce it
pub async fn end_stream(
    State(state): State<Arc<AppState>>,
    Path(stream_id): Path<String>,
    AuthUser(identity): AuthUser,
) -> Result<Json<StreamResponse>, (StatusCode, Json<serde_json::Value>)> {
    let stream_id = StreamId::new(stream_id);
    let stream = state
        .stream_lifecycle_usecase
        .end(&stream_id, &identity.id)
        .await
        .map_err(repository_error_response)?;

    let event = ServerEvent::StreamEnded { stream_id }.to_json();
    state.notify_usecase.send_to_all(&event).await;

    Ok(Json(StreamResponse { stream }))
}

/// Map a persistence failure to the HTTP status the client expects
fn repository_error_response(e: RepositoryError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match e {
        RepositoryError::ChannelNotFound(_) | RepositoryError::StreamNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        RepositoryError::NotHost => StatusCode::FORBIDDEN,
        RepositoryError::InvalidState(_) => StatusCode::CONFLICT,
    };
    (status, Json(serde_json::json!({"error": e.to_string()})))
}
