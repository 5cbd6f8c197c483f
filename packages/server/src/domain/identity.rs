//! User identity as decoded from a verified credential.
//!
//! The server never creates or mutates users; ids, emails and roles are
//! authoritative in the persistence layer. The realtime core only consumes
//! the id for presence and room-membership bookkeeping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User identifier (Domain Model)
///
/// Opaque string handed out by the persistence layer. Any format the token
/// verifier produces is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// User role as carried in the credential claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Identity bound to a connection after a successful authentication handshake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

impl UserIdentity {
    pub fn new(id: UserId, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }
}
