//! Realtime server UI layer: HTTP/WebSocket surface.

mod auth;
mod handler;
mod server;
mod signal;
pub mod state;

pub use auth::AuthUser;
pub use server::Server;
