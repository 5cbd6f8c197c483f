//! Realtime chat/streaming server: WebSocket fan-out, room membership,
//! presence, and token-authenticated sockets.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
