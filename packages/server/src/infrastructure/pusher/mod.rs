//! Message delivery implementations.
//!
//! Currently a single WebSocket-backed implementation of the domain's
//! `MessagePusher` trait.

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
