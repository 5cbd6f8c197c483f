//! Token verifier trait definition.
//!
//! The domain layer defines the interface it needs for credential
//! verification; the concrete JWT implementation lives in the
//! infrastructure layer (dependency inversion, same as the repository and
//! pusher seams).

use thiserror::Error;

use super::identity::UserIdentity;

/// Credential verification errors
///
/// All failure modes collapse into one variant on purpose: callers must
/// treat any of them as "deny" and never retry automatically. The inner
/// string is only for logging and the denial event sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Signature mismatch, malformed structure, or expiration
    #[error("invalid credential: {0}")]
    InvalidCredential(String),
}

/// Identity verifier
///
/// Validates an opaque signed token and extracts the identity it carries.
/// Used by both the socket authentication handshake and the REST auth
/// extractor. Verification is self-contained (no third-party calls) and
/// has no side effects.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, credential: &str) -> Result<UserIdentity, VerifyError>;
}
