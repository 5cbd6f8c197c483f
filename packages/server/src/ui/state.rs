//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::{MessagePusher, TokenVerifier};
use crate::usecase::{
    AuthenticateUseCase, CreateChannelUseCase, DisconnectUseCase, JoinChannelMemberUseCase,
    JoinRoomUseCase, JoinStreamViewerUseCase, LeaveRoomUseCase, NotifyUseCase,
    SendMessageUseCase, SharedRegistry, StreamLifecycleUseCase, UpdateStatusUseCase,
};

/// Shared application state
pub struct AppState {
    /// MessagePusher (delivery seam; the socket handler registers and
    /// unregisters connections on it)
    pub message_pusher: Arc<dyn MessagePusher>,
    /// TokenVerifier (credential seam, shared with the REST auth extractor)
    pub token_verifier: Arc<dyn TokenVerifier>,
    /// Room registry handle, exposed for the debug endpoint
    pub registry: SharedRegistry,
    pub authenticate_usecase: Arc<AuthenticateUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    pub notify_usecase: Arc<NotifyUseCase>,
    pub update_status_usecase: Arc<UpdateStatusUseCase>,
    pub create_channel_usecase: Arc<CreateChannelUseCase>,
    pub join_channel_member_usecase: Arc<JoinChannelMemberUseCase>,
    pub join_stream_viewer_usecase: Arc<JoinStreamViewerUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub stream_lifecycle_usecase: Arc<StreamLifecycleUseCase>,
}
