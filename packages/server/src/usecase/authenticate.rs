//! UseCase: socket authentication handshake.
//!
//! Verifies the credential a connection presented and, on success, marks
//! the user online. Binding the identity to the connection is the socket
//! handler's job (it is the connection's single owner); this use case has
//! no notion of which connection asked.
//!
//! Verification failure is recoverable: the connection stays usable and
//! the client may retry with a fresh credential. A connection may also
//! re-authenticate; the presence store is an idempotent upsert, so the
//! second identity simply wins.

use std::sync::Arc;

use crate::domain::{PresenceStatus, TokenVerifier, UserIdentity, VerifyError};

use super::SharedPresence;

/// Socket authentication use case
pub struct AuthenticateUseCase {
    /// Identity verifier (opaque signed-token check)
    verifier: Arc<dyn TokenVerifier>,
    /// Presence store, updated to `online` on success
    presence: SharedPresence,
}

impl AuthenticateUseCase {
    pub fn new(verifier: Arc<dyn TokenVerifier>, presence: SharedPresence) -> Self {
        Self { verifier, presence }
    }

    /// Verify a credential and mark its user online.
    ///
    /// # Returns
    ///
    /// * `Ok(UserIdentity)` - identity to bind to the connection
    /// * `Err(VerifyError)` - denial; never retried automatically
    pub async fn execute(&self, credential: &str) -> Result<UserIdentity, VerifyError> {
        let identity = self.verifier.verify(credential)?;

        {
            let mut presence = self.presence.lock().await;
            presence.set_status(identity.id.clone(), PresenceStatus::Online);
        }

        Ok(identity)
    }
}
