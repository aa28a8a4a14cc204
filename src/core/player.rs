//! Seats, participants and per-player round data.
//!
//! ## PlayerId
//!
//! Type-safe seat index supporting 1-255 players. The seat order is the
//! turn order and the dealing order.
//!
//! ## Player
//!
//! A participant's identity plus the hand and scores the engine mutates.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Seat index supporting 1-255 players.
///
/// Seat indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use seasalt::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Opaque participant identifier supplied by the transport layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Someone sitting at the table, before any cards are dealt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId::new(id),
            name: name.into(),
        }
    }
}

/// Per-player round data.
///
/// The hand is exclusively owned by this player; only the round engine
/// mutates it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Participant identity (stable across rounds).
    pub id: ParticipantId,

    /// Display name.
    pub name: String,

    /// Cards held. Order is dealing/draw order and carries no meaning.
    pub hand: Vector<Card>,

    /// Points banked over all settled rounds.
    pub cumulative_score: u32,

    /// Points gained in the most recent settlement.
    pub last_round_score: u32,

    pub is_active: bool,
}

impl Player {
    /// A player with an empty hand and no score.
    #[must_use]
    pub fn new(participant: Participant) -> Self {
        Self {
            id: participant.id,
            name: participant.name,
            hand: Vector::new(),
            cumulative_score: 0,
            last_round_score: 0,
            is_active: true,
        }
    }

    /// Sum of card values in hand.
    #[must_use]
    pub fn hand_value(&self) -> u32 {
        self.hand.iter().map(Card::value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardKind;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(0).next(3), PlayerId::new(1));
        assert_eq!(PlayerId::new(2).next(3), PlayerId::new(0));
        assert_eq!(PlayerId::new(0).next(1), PlayerId::new(0));
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(3).collect();
        assert_eq!(players, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    }

    #[test]
    fn test_new_player_is_empty() {
        let player = Player::new(Participant::new("p-1", "Alice"));

        assert_eq!(player.id.as_str(), "p-1");
        assert_eq!(player.name, "Alice");
        assert!(player.hand.is_empty());
        assert_eq!(player.cumulative_score, 0);
        assert!(player.is_active);
    }

    #[test]
    fn test_hand_value() {
        let mut player = Player::new(Participant::new("p-1", "Alice"));
        player.hand.push_back(Card::new(CardKind::Shark, 0));
        player.hand.push_back(Card::new(CardKind::Penguin, 0));

        assert_eq!(player.hand_value(), 7);
    }

    #[test]
    fn test_participant_id_serializes_as_string() {
        let id = ParticipantId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
