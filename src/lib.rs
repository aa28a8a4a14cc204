//! # seasalt
//!
//! Rules engine for a Sea Salt & Paper style pair/collection card game.
//!
//! ## Design Principles
//!
//! 1. **Snapshots In, Snapshots Out**: Every rules operation takes the
//!    current `RoundState` by reference and returns the next one. There is
//!    no hidden global state; a rejected operation changes nothing.
//!
//! 2. **N-Player First**: Seats are `PlayerId`s and every turn rotation
//!    works off the table's player count.
//!
//! 3. **The Engine Does Not Talk to the Network**: Storing and broadcasting
//!    snapshots is the hosting layer's job, behind `SnapshotStore`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Deck, discard piles and hands are
//!   `im::Vector`s, so producing a new snapshot shares everything that did
//!   not change.
//!
//! - **Deterministic Dealing**: `GameRng` is ChaCha8 and serializes its
//!   position, so a restored session deals exactly what the original would.
//!
//! ## Modules
//!
//! - `core`: Seats, players, round state, RNG, configuration, errors
//! - `cards`: The card catalog, card instances, deck building
//! - `rules`: Pairing, scoring, the round state machine, pair effects,
//!   validation, status summaries
//! - `session`: Multi-round games and the snapshot store boundary
//!
//! ## Example
//!
//! ```
//! use seasalt::{GameSession, Participant, PlayerId, RulesConfig, SessionAction};
//!
//! let players = vec![Participant::new("p1", "Ana"), Participant::new("p2", "Ben")];
//! let mut game = GameSession::new(players, RulesConfig::default().with_seed(42)).unwrap();
//!
//! game.apply(PlayerId(0), SessionAction::DrawFromDeck { discard_pile: 0, keep: 1 }).unwrap();
//! game.apply(PlayerId(0), SessionAction::EndTurn).unwrap();
//! assert_eq!(game.round().current_player, PlayerId(1));
//! ```

pub mod cards;
pub mod core;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    DeclarationKind, ErrorKind, GameRng, GameRngState, Participant, ParticipantId, Phase, Player,
    PlayerId, RoundState, RulesConfig, RulesError, RulesResult,
};

pub use crate::cards::{build_deck, Card, CardKind, Category, Color, PairEffect};

pub use crate::rules::{
    activate_pair, calculate_hand_score, can_declare, deal_round, declare, draw_from_deck,
    find_valid_pairs, is_valid_pair, settle_round, status, take_from_discard_pile, target_score,
    validate, EffectRequest, GameStatus, HandScore, Settlement, ValidationReport,
};

pub use crate::session::{
    ActionOutcome, GameOutcome, GameSession, MemoryStore, RoomCode, SessionAction, SnapshotStore,
    StoreError,
};
