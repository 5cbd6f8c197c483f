//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        create_channel, debug_rooms, end_stream, health_check, join_channel, join_stream,
        post_message, schedule_stream, start_stream, update_status, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Realtime chat/streaming server
///
/// Wraps the wired application state and exposes the HTTP/WebSocket
/// surface over it.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }

    /// Build the router over the shared state.
    fn router(&self) -> Router {
        Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/debug/rooms", get(debug_rooms))
            .route("/api/users/{user_id}/status", patch(update_status))
            .route("/api/channels", post(create_channel))
            .route("/api/channels/{channel_id}/join", post(join_channel))
            .route("/api/channels/{channel_id}/messages", post(post_message))
            .route("/api/streams", post(schedule_stream))
            .route("/api/streams/{stream_id}/join", post(join_stream))
            .route("/api/streams/{stream_id}/start", post(start_stream))
            .route("/api/streams/{stream_id}/end", post(end_stream))
            .layer(TraceLayer::new_for_http())
            .with_state(self.app_state.clone())
    }

    /// Run the server until a shutdown signal arrives.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Realtime server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }

    /// Serve on an already-bound listener. Integration tests bind to an
    /// ephemeral port themselves and hand the listener in.
    pub async fn serve(
        self,
        listener: tokio::net::TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = self.router();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
