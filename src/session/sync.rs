//! Snapshot storage boundary.
//!
//! The hosting layer keeps one `GameSession` snapshot per room in some
//! shared store and pushes every new snapshot to the room's clients.
//! `SnapshotStore` is that store as the engine sees it: read the latest
//! snapshot, write a new one if nobody else wrote first, and subscribe to
//! changes. `MemoryStore` is an in-process implementation.
//!
//! Writes follow a single-writer convention: every write names the version
//! it was computed from and fails with `VersionConflict` when the room has
//! moved on. `apply_action` shows the full cycle.

use std::fmt;
use std::sync::mpsc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::game::{ActionOutcome, GameSession, SessionAction};
use crate::core::{PlayerId, RulesError};

/// Opaque room identifier. Its format is up to the hosting layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored session and the version it was written at.
///
/// Versions start at 1 for the first write; 0 means "no snapshot yet".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedSnapshot {
    pub version: u64,
    pub session: GameSession,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("room {room} is at version {actual}, write expected {expected}")]
    VersionConflict {
        room: RoomCode,
        expected: u64,
        actual: u64,
    },

    #[error("room {0} has no snapshot")]
    RoomNotFound(RoomCode),

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Receives every snapshot written to a room it subscribed to.
pub trait SnapshotObserver: Send {
    /// Return false once the observer is gone; it is then dropped.
    fn notify(&self, room: &RoomCode, snapshot: &VersionedSnapshot) -> bool;
}

impl SnapshotObserver for mpsc::Sender<(RoomCode, VersionedSnapshot)> {
    fn notify(&self, room: &RoomCode, snapshot: &VersionedSnapshot) -> bool {
        self.send((room.clone(), snapshot.clone())).is_ok()
    }
}

/// Shared storage for session snapshots, keyed by room.
pub trait SnapshotStore {
    /// Latest snapshot for the room, if any.
    fn read(&self, room: &RoomCode) -> Result<Option<VersionedSnapshot>, StoreError>;

    /// Store `session` if the room is still at `expected_version`.
    ///
    /// Returns the new version.
    fn write(
        &mut self,
        room: &RoomCode,
        expected_version: u64,
        session: &GameSession,
    ) -> Result<u64, StoreError>;

    /// Register an observer for the room's future writes.
    fn subscribe(&mut self, room: &RoomCode, observer: Box<dyn SnapshotObserver>);
}

#[derive(Default)]
struct Room {
    version: u64,
    bytes: Vec<u8>,
    observers: Vec<Box<dyn SnapshotObserver>>,
}

/// In-process store holding bincode-encoded snapshots.
#[derive(Default)]
pub struct MemoryStore {
    rooms: FxHashMap<RoomCode, Room>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms with a stored snapshot.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.values().filter(|r| r.version > 0).count()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("rooms", &self.rooms.len())
            .finish()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, room: &RoomCode) -> Result<Option<VersionedSnapshot>, StoreError> {
        match self.rooms.get(room) {
            Some(stored) if stored.version > 0 => Ok(Some(VersionedSnapshot {
                version: stored.version,
                session: GameSession::from_bytes(&stored.bytes)?,
            })),
            _ => Ok(None),
        }
    }

    fn write(
        &mut self,
        room: &RoomCode,
        expected_version: u64,
        session: &GameSession,
    ) -> Result<u64, StoreError> {
        let actual = self.rooms.get(room).map_or(0, |r| r.version);
        if actual != expected_version {
            warn!(%room, expected = expected_version, actual, "stale snapshot write");
            return Err(StoreError::VersionConflict {
                room: room.clone(),
                expected: expected_version,
                actual,
            });
        }

        let bytes = session.to_bytes()?;
        let stored = self.rooms.entry(room.clone()).or_default();
        stored.version += 1;
        stored.bytes = bytes;

        let snapshot = VersionedSnapshot {
            version: stored.version,
            session: session.clone(),
        };
        stored.observers.retain(|o| o.notify(room, &snapshot));

        debug!(
            %room,
            version = stored.version,
            bytes = stored.bytes.len(),
            observers = stored.observers.len(),
            "stored snapshot"
        );
        Ok(stored.version)
    }

    fn subscribe(&mut self, room: &RoomCode, observer: Box<dyn SnapshotObserver>) {
        self.rooms
            .entry(room.clone())
            .or_default()
            .observers
            .push(observer);
    }
}

/// Apply one action against the room's latest snapshot and write the result.
///
/// The turn check runs against whatever the store holds right now, and the
/// write only lands if nothing was written in between.
pub fn apply_action<S: SnapshotStore + ?Sized>(
    store: &mut S,
    room: &RoomCode,
    seat: PlayerId,
    action: SessionAction,
) -> Result<(u64, ActionOutcome), StoreError> {
    let VersionedSnapshot {
        version,
        mut session,
    } = store
        .read(room)?
        .ok_or_else(|| StoreError::RoomNotFound(room.clone()))?;

    let outcome = session.apply(seat, action)?;
    let new_version = store.write(room, version, &session)?;
    Ok((new_version, outcome))
}
