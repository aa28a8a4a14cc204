//! Core engine types: seats, players, state, RNG, configuration, errors.
//!
//! This module contains the building blocks every rules operation works on.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{
    RulesConfig, COPIES_PER_KIND, DECK_SIZE, DECLARE_THRESHOLD, DISCARD_PILE_COUNT, HAND_SIZE,
};
pub use error::{ErrorKind, RulesError, RulesResult};
pub use player::{Participant, ParticipantId, Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use state::{DeclarationKind, PendingDeclaration, Phase, RoundState};
