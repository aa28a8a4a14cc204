//! Read-only summaries of a round for display.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::round::target_score;
use crate::cards::Card;
use crate::core::{PendingDeclaration, Phase, PlayerId, RoundState, DISCARD_PILE_COUNT};

/// One discard pile as seen from the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileStatus {
    pub top: Option<Card>,
    pub size: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    pub player: PlayerId,
    pub name: String,
    pub cumulative_score: u32,
    pub last_round_score: u32,
    pub hand_size: usize,
    pub is_current: bool,
}

/// Snapshot summary: whose turn it is, the scores, and what is on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub round_number: u32,
    pub current_player: PlayerId,
    pub phase: Phase,
    pub target_score: u32,
    pub players: Vec<PlayerStatus>,
    pub deck_size: usize,
    pub discard_piles: [PileStatus; DISCARD_PILE_COUNT],
    pub pending_declaration: Option<PendingDeclaration>,
}

/// Summarize a round. The target is the default for the table size.
#[must_use]
pub fn status(state: &RoundState) -> GameStatus {
    let players = state
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| PlayerStatus {
            player: PlayerId(seat as u8),
            name: p.name.clone(),
            cumulative_score: p.cumulative_score,
            last_round_score: p.last_round_score,
            hand_size: p.hand.len(),
            is_current: seat == state.current_player.index(),
        })
        .collect();

    let pile = |i: usize| PileStatus {
        top: state.discard_top(i).copied(),
        size: state.discard_piles[i].len(),
    };

    GameStatus {
        round_number: state.round_number,
        current_player: state.current_player,
        phase: state.phase,
        target_score: target_score(state.player_count()),
        players,
        deck_size: state.deck.len(),
        discard_piles: [pile(0), pile(1)],
        pending_declaration: state.pending_declaration,
    }
}

impl GameStatus {
    /// One-line description of the round, e.g.
    /// `Round 1: Ana to play (drawing), deck 54, discards [empty | Crab (2)]`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.to_string()
    }

    fn current_name(&self) -> Option<&str> {
        self.players
            .iter()
            .find(|p| p.is_current)
            .map(|p| p.name.as_str())
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.phase {
            Phase::Drawing => "drawing",
            Phase::Declaring => "last chance",
            Phase::Scoring => "scoring",
        };
        write!(f, "Round {}: ", self.round_number + 1)?;
        match self.current_name() {
            Some(name) => write!(f, "{name} to play ({phase})")?,
            None => write!(f, "{} to play ({phase})", self.current_player)?,
        }
        write!(f, ", deck {}, discards [", self.deck_size)?;
        for (i, pile) in self.discard_piles.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            match pile.top {
                Some(card) => f.write_str(&card.display_name())?,
                None => f.write_str("empty")?,
            }
        }
        f.write_str("]")
    }
}
