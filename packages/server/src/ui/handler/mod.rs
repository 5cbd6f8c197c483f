//! HTTP and WebSocket endpoint handlers.

mod http;
mod websocket;

pub use http::{
    create_channel, debug_rooms, end_stream, health_check, join_channel, join_stream,
    post_message, schedule_stream, start_stream, update_status,
};
pub use websocket::websocket_handler;
