//! Presence: a user's coarse availability state.
//!
//! Presence is keyed by user id, independent of how many connections the
//! user holds. An absent entry is equivalent to `offline`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::identity::UserId;

/// Presence status values, serialized lowercase for wire compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Away,
    Offline,
}

/// Process-wide user-id to status mapping (Domain Model)
///
/// A plain owned struct with no interior locking; the owner wraps it in
/// `Arc<Mutex<_>>` and injects it into the use cases that mutate it, so
/// tests can run against isolated instances.
#[derive(Debug, Default)]
pub struct PresenceStore {
    statuses: HashMap<UserId, PresenceStatus>,
}

impl PresenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent upsert. Accepts any user id the verifier produces.
    ///
    /// Callers are expected to follow a status change with a broadcast;
    /// the store itself performs no I/O.
    pub fn set_status(&mut self, user_id: UserId, status: PresenceStatus) {
        self.statuses.insert(user_id, status);
    }

    /// Current status, `offline` for unknown users
    pub fn get_status(&self, user_id: &UserId) -> PresenceStatus {
        self.statuses
            .get(user_id)
            .copied()
            .unwrap_or(PresenceStatus::Offline)
    }

    /// Number of users with an explicit (non-default) entry
    pub fn tracked_users(&self) -> usize {
        self.statuses.len()
    }
}
