//! Round state: everything on the table during one round.
//!
//! ## RoundState
//!
//! - Draw deck (top = end)
//! - Two discard piles (top = end)
//! - Players in seat order, each owning a hand
//! - Active seat, round number, phase
//!
//! Uses `im` persistent vectors so that every rules operation can take
//! `&RoundState` and hand back a fresh snapshot without deep copies.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::DISCARD_PILE_COUNT;
use super::error::{RulesError, RulesResult};
use super::player::{Player, PlayerId};
use crate::cards::Card;

/// Round lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Awaiting the active player's draw or take.
    #[default]
    Drawing,
    /// A last-chance declaration is pending; remaining players finish their turns.
    Declaring,
    /// Round-end settlement has run.
    Scoring,
}

/// How a player ended the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclarationKind {
    /// Settle right away.
    Immediate,
    /// Every other player takes one more turn before settlement.
    LastChance,
}

/// A declaration waiting for the other players' final turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDeclaration {
    pub declarer: PlayerId,
    pub kind: DeclarationKind,
}

/// Complete state of one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    /// Draw pile (top = end).
    pub deck: Vector<Card>,

    /// The two discard piles (top = end).
    pub discard_piles: [Vector<Card>; DISCARD_PILE_COUNT],

    /// Players in seat order. Fixed for the round.
    pub players: Vec<Player>,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Round counter, starting at 0.
    pub round_number: u32,

    pub phase: Phase,

    /// Set while a last-chance declaration is being played out.
    #[serde(default)]
    pub pending_declaration: Option<PendingDeclaration>,

    /// The active player earned another turn from a ship pair.
    #[serde(default)]
    pub extra_turn: bool,

    /// The active player has already played a pair since the seat last
    /// changed.
    #[serde(default)]
    pub pair_activated: bool,
}

impl RoundState {
    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Iterate over all seats.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }

    /// Look up a seat, failing fast when it does not exist.
    pub fn player(&self, player: PlayerId) -> RulesResult<&Player> {
        self.players
            .get(player.index())
            .ok_or(RulesError::PlayerOutOfRange {
                player,
                player_count: self.players.len(),
            })
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> RulesResult<&mut Player> {
        let player_count = self.players.len();
        self.players
            .get_mut(player.index())
            .ok_or(RulesError::PlayerOutOfRange {
                player,
                player_count,
            })
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> RulesResult<&Player> {
        self.player(self.current_player)
    }

    /// A discard pile by index, failing fast for anything but 0 or 1.
    pub fn discard_pile(&self, pile: usize) -> RulesResult<&Vector<Card>> {
        self.discard_piles
            .get(pile)
            .ok_or(RulesError::PileOutOfRange { pile })
    }

    /// Top card of a discard pile.
    #[must_use]
    pub fn discard_top(&self, pile: usize) -> Option<&Card> {
        self.discard_piles.get(pile).and_then(|p| p.last())
    }

    /// Cards in the deck, both discard piles and every hand.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.discard_piles.iter().map(Vector::len).sum::<usize>()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Cards available to a draw: deck plus both piles.
    #[must_use]
    pub fn drawable_cards(&self) -> usize {
        self.deck.len() + self.discard_piles.iter().map(Vector::len).sum::<usize>()
    }

    /// Reject actions from anyone but the active player.
    pub fn ensure_turn(&self, player: PlayerId) -> RulesResult<()> {
        self.player(player)?;
        if player != self.current_player {
            return Err(RulesError::NotYourTurn {
                player,
                active: self.current_player,
            });
        }
        Ok(())
    }

    /// Reject turn actions once the round has been settled.
    pub fn ensure_in_play(&self) -> RulesResult<()> {
        match self.phase {
            Phase::Drawing | Phase::Declaring => Ok(()),
            actual => Err(RulesError::WrongPhase { actual }),
        }
    }
}
