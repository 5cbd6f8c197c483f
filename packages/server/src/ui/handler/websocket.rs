//! WebSocket connection handlers.
//!
//! One `handle_socket` call owns one connection: its id, its bound
//! identity, and its teardown. The receive loop is an explicit dispatch
//! over `ClientEvent`; malformed frames are logged and ignored, never
//! fatal to the connection.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, PresenceStatus, RoomKey, UserIdentity},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
///
/// Messages destined for this client (unicasts and room/global broadcasts)
/// arrive on the rx channel in send order; the channel is the only writer
/// to the socket, so per-connection FIFO ordering holds.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();

    // Register with the pusher before anything else, so the connection can
    // receive global broadcasts even before it authenticates.
    let (tx, rx) = mpsc::unbounded_channel();
    state.message_pusher.register_client(connection_id, tx).await;
    tracing::info!("Connection '{}' accepted", connection_id);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    // Single owner of the connection's bound identity. Rebound on repeated
    // authenticates (last identity wins).
    let mut identity: Option<UserIdentity> = None;

    loop {
        tokio::select! {
            // The socket went away under the pusher task
            _ = &mut send_task => break,
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientEvent>(&text) {
                            Ok(event) => {
                                dispatch_event(&state, connection_id, &mut identity, event)
                                    .await;
                            }
                            Err(e) => {
                                tracing::warn!(
                                    "Connection '{}' sent an unparseable frame: {}",
                                    connection_id,
                                    e
                                );
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("Connection '{}' requested close", connection_id);
                        break;
                    }
                    Some(Ok(_)) => {
                        // Ping/pong handled by the protocol layer; binary ignored
                    }
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                        break;
                    }
                    None => break,
                }
            }
        }
    }

    send_task.abort();

    // Teardown: evict from every room, then broadcast what the remaining
    // clients need to know.
    let bound_user = identity.map(|i| i.id);
    let summary = state
        .disconnect_usecase
        .execute(connection_id, bound_user)
        .await;

    for (stream_id, count) in summary.stream_rooms {
        let room = RoomKey::Stream(stream_id.clone());
        let update = ServerEvent::ViewerCountUpdate { stream_id, count }.to_json();
        state.notify_usecase.send_to_room(&room, &update).await;
    }

    if let Some(user_id) = summary.user_offline {
        tracing::info!("User '{}' went offline", user_id);
        let json = ServerEvent::UserDisconnected { user_id }.to_json();
        state.notify_usecase.send_to_all(&json).await;
    }

    tracing::debug!("Socket handler for '{}' finished", connection_id);
}

/// One arm per client event. Room events that carry a user id omit it for
/// guest (unauthenticated) connections rather than rejecting the action.
async fn dispatch_event(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    identity: &mut Option<UserIdentity>,
    event: ClientEvent,
) {
    match event {
        ClientEvent::Authenticate { token } => {
            match state.authenticate_usecase.execute(&token).await {
                Ok(new_identity) => {
                    let ack = ServerEvent::Authenticated { success: true }.to_json();
                    if let Err(e) = state
                        .notify_usecase
                        .send_to_connection(&connection_id, &ack)
                        .await
                    {
                        tracing::warn!(
                            "Failed to ack authentication for '{}': {}",
                            connection_id,
                            e
                        );
                    }

                    let status = ServerEvent::UserStatusChanged {
                        user_id: new_identity.id.clone(),
                        status: PresenceStatus::Online,
                        name: None,
                    }
                    .to_json();
                    state.notify_usecase.send_to_all(&status).await;

                    tracing::info!(
                        "Connection '{}' authenticated as user '{}'",
                        connection_id,
                        new_identity.id
                    );
                    *identity = Some(new_identity);
                }
                Err(e) => {
                    // The connection stays usable; a previously bound
                    // identity, if any, stays bound.
                    tracing::warn!(
                        "Authentication failed on connection '{}': {}",
                        connection_id,
                        e
                    );
                    let error = ServerEvent::AuthenticationError {
                        error: e.to_string(),
                    }
                    .to_json();
                    if let Err(e) = state
                        .notify_usecase
                        .send_to_connection(&connection_id, &error)
                        .await
                    {
                        tracing::warn!(
                            "Failed to send authentication error to '{}': {}",
                            connection_id,
                            e
                        );
                    }
                }
            }
        }
        ClientEvent::JoinChannel { channel_id } => {
            let room = RoomKey::Channel(channel_id);
            state.join_room_usecase.execute(connection_id, room.clone()).await;

            let joined = ServerEvent::UserJoined {
                user_id: identity.as_ref().map(|i| i.id.clone()),
            }
            .to_json();
            state
                .notify_usecase
                .send_to_room_except(&room, &connection_id, &joined)
                .await;
        }
        ClientEvent::LeaveChannel { channel_id } => {
            let room = RoomKey::Channel(channel_id);
            state.leave_room_usecase.execute(connection_id, room.clone()).await;

            // The leaver is already out of the room at this point, so the
            // broadcast naturally excludes it.
            let left = ServerEvent::UserLeft {
                user_id: identity.as_ref().map(|i| i.id.clone()),
            }
            .to_json();
            state.notify_usecase.send_to_room(&room, &left).await;
        }
        ClientEvent::JoinStream { stream_id } => {
            let room = RoomKey::Stream(stream_id.clone());
            let count = state
                .join_room_usecase
                .execute(connection_id, room.clone())
                .await;

            // Everyone in the room, the joiner included, sees the new count
            let update = ServerEvent::ViewerCountUpdate { stream_id, count }.to_json();
            state.notify_usecase.send_to_room(&room, &update).await;
        }
        ClientEvent::LeaveStream { stream_id } => {
            let room = RoomKey::Stream(stream_id.clone());
            let count = state
                .leave_room_usecase
                .execute(connection_id, room.clone())
                .await;

            let update = ServerEvent::ViewerCountUpdate { stream_id, count }.to_json();
            state.notify_usecase.send_to_room(&room, &update).await;
        }
        ClientEvent::Typing {
            channel_id,
            is_typing,
        } => {
            // Ephemeral relay; nothing is stored
            let room = RoomKey::Channel(channel_id);
            let typing = ServerEvent::UserTyping {
                user_id: identity.as_ref().map(|i| i.id.clone()),
                is_typing,
            }
            .to_json();
            state
                .notify_usecase
                .send_to_room_except(&room, &connection_id, &typing)
                .await;
        }
    }
}
