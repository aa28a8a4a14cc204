//! Multi-round play and the storage boundary.
//!
//! - `game`: `GameSession`, which checks turns, plays out declarations and
//!   deals rounds until someone reaches the target score
//! - `sync`: the `SnapshotStore` the hosting layer keeps sessions in

pub mod game;
pub mod sync;

pub use game::{ActionOutcome, FinalScore, GameOutcome, GameSession, SessionAction};
pub use sync::{
    apply_action, MemoryStore, RoomCode, SnapshotObserver, SnapshotStore, StoreError,
    VersionedSnapshot,
};
