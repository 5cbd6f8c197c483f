//! Room registry: which connections are currently in which rooms.
//!
//! Membership is tracked per connection, not per user: a user with several
//! tabs open holds several connections, and each one counts separately for
//! viewer counts. The registry keeps a reverse index so that cleaning up a
//! disconnecting connection costs O(rooms it is in), not O(total rooms).

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::room::RoomKey;

/// Connection identifier (Domain Model)
///
/// Assigned by the server on transport accept; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Room key to connection-set mapping with a reverse index (Domain Model)
///
/// All operations are total: joining twice, leaving a room never joined,
/// or asking about an unknown room are well-defined no-ops, never errors.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    /// room -> connections currently joined
    rooms: HashMap<RoomKey, HashSet<ConnectionId>>,
    /// connection -> rooms it is joined to
    memberships: HashMap<ConnectionId, HashSet<RoomKey>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room. Idempotent.
    pub fn join(&mut self, room: RoomKey, connection: ConnectionId) {
        self.rooms.entry(room.clone()).or_default().insert(connection);
        self.memberships.entry(connection).or_default().insert(room);
    }

    /// Remove a connection from a room. Idempotent; leaving a room the
    /// connection is not in is a no-op.
    pub fn leave(&mut self, room: &RoomKey, connection: &ConnectionId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(connection);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
        if let Some(rooms) = self.memberships.get_mut(connection) {
            rooms.remove(room);
            if rooms.is_empty() {
                self.memberships.remove(connection);
            }
        }
    }

    /// Remove a connection from every room it belongs to.
    ///
    /// Returns the rooms that were left so the caller can broadcast
    /// corrected membership counts. Used on disconnect.
    pub fn leave_all(&mut self, connection: &ConnectionId) -> Vec<RoomKey> {
        let rooms: Vec<RoomKey> = self
            .memberships
            .remove(connection)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();

        for room in &rooms {
            if let Some(members) = self.rooms.get_mut(room) {
                members.remove(connection);
                if members.is_empty() {
                    self.rooms.remove(room);
                }
            }
        }

        rooms
    }

    /// Current membership size; 0 for unknown rooms
    pub fn count(&self, room: &RoomKey) -> usize {
        self.rooms.get(room).map(HashSet::len).unwrap_or(0)
    }

    /// Whether a connection is currently in a room
    pub fn contains(&self, room: &RoomKey, connection: &ConnectionId) -> bool {
        self.rooms
            .get(room)
            .map(|members| members.contains(connection))
            .unwrap_or(false)
    }

    /// Snapshot of a room's members for broadcast iteration
    ///
    /// Copy-on-read: delivering to the returned list can never observe a
    /// partially-updated set, whatever joins/leaves happen concurrently.
    pub fn members(&self, room: &RoomKey) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Snapshot of all rooms and their membership counts (debug endpoint)
    pub fn room_counts(&self) -> Vec<(RoomKey, usize)> {
        self.rooms
            .iter()
            .map(|(key, members)| (key.clone(), members.len()))
            .collect()
    }
}
