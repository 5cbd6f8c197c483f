//! Realtime chat/streaming server over WebSocket.
//!
//! Fans chat, presence and stream-viewer events out to connected clients.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use atrio_server::{
    domain::{MessagePusher, PresenceStore, RoomRegistry, TokenVerifier},
    infrastructure::{
        pusher::WebSocketMessagePusher, repository::InMemoryChatRepository,
        token::JwtTokenVerifier,
    },
    ui::{Server, state::AppState},
    usecase::{
        AuthenticateUseCase, CreateChannelUseCase, DisconnectUseCase, JoinChannelMemberUseCase,
        JoinRoomUseCase, JoinStreamViewerUseCase, LeaveRoomUseCase, NotifyUseCase,
        SendMessageUseCase, StreamLifecycleUseCase, UpdateStatusUseCase,
    },
};
use atrio_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Realtime chat/streaming server with WebSocket fan-out", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// HMAC secret for signing and verifying access tokens
    #[arg(long, env = "JWT_SECRET", default_value = "dev-secret", hide_env_values = true)]
    jwt_secret: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Shared realtime state
    // 2. Trait seam implementations (pusher, verifier, repository)
    // 3. UseCases
    // 4. AppState
    // 5. Server

    // 1. Shared realtime state
    let registry = Arc::new(Mutex::new(RoomRegistry::new()));
    let presence = Arc::new(Mutex::new(PresenceStore::new()));

    // 2. Seam implementations
    let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new());
    let token_verifier: Arc<dyn TokenVerifier> =
        Arc::new(JwtTokenVerifier::new(&args.jwt_secret));
    let repository = Arc::new(InMemoryChatRepository::new(Arc::new(SystemClock)));

    // 3. UseCases
    let authenticate_usecase = Arc::new(AuthenticateUseCase::new(
        token_verifier.clone(),
        presence.clone(),
    ));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone()));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(
        registry.clone(),
        presence.clone(),
        message_pusher.clone(),
    ));
    let notify_usecase = Arc::new(NotifyUseCase::new(registry.clone(), message_pusher.clone()));
    let update_status_usecase = Arc::new(UpdateStatusUseCase::new(presence.clone()));
    let create_channel_usecase = Arc::new(CreateChannelUseCase::new(repository.clone()));
    let join_channel_member_usecase = Arc::new(JoinChannelMemberUseCase::new(repository.clone()));
    let join_stream_viewer_usecase = Arc::new(JoinStreamViewerUseCase::new(repository.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(repository.clone()));
    let stream_lifecycle_usecase = Arc::new(StreamLifecycleUseCase::new(repository));

    // 4. AppState
    let app_state = Arc::new(AppState {
        message_pusher,
        token_verifier,
        registry,
        authenticate_usecase,
        join_room_usecase,
        leave_room_usecase,
        disconnect_usecase,
        notify_usecase,
        update_status_usecase,
        create_channel_usecase,
        join_channel_member_usecase,
        join_stream_viewer_usecase,
        send_message_usecase,
        stream_lifecycle_usecase,
    });

    // 5. Create and run the server
    let server = Server::new(app_state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
