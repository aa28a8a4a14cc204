//! Rule violations reported by the engine.
//!
//! Every failure leaves the state untouched: operations take `&RoundState`
//! and only build a new state once all checks have passed.

use thiserror::Error;

use super::player::PlayerId;
use super::state::Phase;
use crate::cards::{CardKind, PairEffect};

/// Broad category of a rejected operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Out of turn, wrong phase, or nothing left to draw.
    IllegalAction,
    /// The chosen cards or declaration do not satisfy the rules.
    InvalidSelection,
    /// An index or count outside the valid range.
    InvalidInput,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("{player} acted out of turn; {active} is active")]
    NotYourTurn { player: PlayerId, active: PlayerId },

    #[error("action not allowed during {actual:?} phase")]
    WrongPhase { actual: Phase },

    #[error("cannot draw two cards: only {available} left in deck and discard piles")]
    NoCardsToDraw { available: usize },

    #[error("{player} has already played a pair this turn")]
    PairAlreadyActivated { player: PlayerId },

    #[error("a declaration is already pending from {declarer}")]
    DeclarationPending { declarer: PlayerId },

    #[error("the game is over")]
    GameOver,

    #[error("{first:?} and {second:?} do not form a pair")]
    InvalidPair { first: CardKind, second: CardKind },

    #[error("a card cannot pair with itself (index {index})")]
    SameCardTwice { index: usize },

    #[error("{kind:?} pairs have no effect to activate")]
    NoPairEffect { kind: CardKind },

    #[error("pair grants {granted:?}, not {requested:?}")]
    EffectMismatch {
        granted: PairEffect,
        requested: PairEffect,
    },

    #[error("hand value {hand_value} is below the declaration threshold of {threshold}")]
    BelowDeclareThreshold { hand_value: u32, threshold: u32 },

    #[error("cannot steal from yourself")]
    StealFromSelf,

    #[error("{player} is out of range for {player_count} players")]
    PlayerOutOfRange { player: PlayerId, player_count: usize },

    #[error("card index {index} is out of range for a hand of {len}")]
    CardIndexOutOfRange { index: usize, len: usize },

    #[error("discard pile {pile} does not exist")]
    PileOutOfRange { pile: usize },

    #[error("keep choice {choice} must be 0 or 1")]
    KeepChoiceOutOfRange { choice: usize },

    #[error("{count} players is outside the supported range {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("deck of {available} cards cannot deal {needed}")]
    DeckTooSmall { available: usize, needed: usize },

    #[error("participant {id} is seated twice")]
    DuplicateParticipant { id: String },
}

impl RulesError {
    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        use RulesError::*;

        match self {
            NotYourTurn { .. }
            | WrongPhase { .. }
            | NoCardsToDraw { .. }
            | PairAlreadyActivated { .. }
            | DeclarationPending { .. }
            | GameOver => ErrorKind::IllegalAction,
            InvalidPair { .. }
            | SameCardTwice { .. }
            | NoPairEffect { .. }
            | EffectMismatch { .. }
            | BelowDeclareThreshold { .. }
            | StealFromSelf => ErrorKind::InvalidSelection,
            PlayerOutOfRange { .. }
            | CardIndexOutOfRange { .. }
            | PileOutOfRange { .. }
            | KeepChoiceOutOfRange { .. }
            | PlayerCount { .. }
            | DeckTooSmall { .. }
            | DuplicateParticipant { .. } => ErrorKind::InvalidInput,
        }
    }
}

pub type RulesResult<T> = Result<T, RulesError>;
