//! Hand scoring and declaration resolution.
//!
//! A hand is worth its card values (`base_score`) plus the size of its
//! largest single-color group (`color_bonus`). Only the declaration
//! winner banks the base score; everyone else banks the color bonus.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Color};
use crate::core::{PlayerId, RulesError, RulesResult, DECLARE_THRESHOLD};

/// Score breakdown for one hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandScore {
    /// Sum of card values.
    pub base_score: u32,
    /// Size of the largest same-color group.
    pub color_bonus: u32,
    /// `base_score + color_bonus` for the declaration winner, else `color_bonus`.
    pub total: u32,
}

/// Outcome of comparing the declarer against everyone else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationResult {
    pub is_declarer_winner: bool,
    pub declarer_score: u32,
    /// Best total among the other players; `None` when there are none.
    pub max_other_score: Option<u32>,
}

/// Size of the largest same-color group, 0 for an empty hand.
#[must_use]
pub fn color_bonus<'a>(hand: impl IntoIterator<Item = &'a Card>) -> u32 {
    let mut counts: FxHashMap<Color, u32> = FxHashMap::default();
    for card in hand {
        *counts.entry(card.color()).or_insert(0) += 1;
    }
    counts.values().copied().max().unwrap_or(0)
}

/// Sum of card values.
#[must_use]
pub fn hand_value<'a>(hand: impl IntoIterator<Item = &'a Card>) -> u32 {
    hand.into_iter().map(Card::value).sum()
}

/// Score a hand.
///
/// ```
/// use seasalt::cards::{Card, CardKind};
/// use seasalt::rules::calculate_hand_score;
///
/// let hand = [Card::new(CardKind::Fish, 0), Card::new(CardKind::Fish, 1)];
/// let score = calculate_hand_score(&hand, true);
/// assert_eq!((score.base_score, score.color_bonus, score.total), (2, 2, 4));
/// ```
#[must_use]
pub fn calculate_hand_score<'a>(
    hand: impl IntoIterator<Item = &'a Card> + Clone,
    is_declaration_winner: bool,
) -> HandScore {
    let base_score = hand_value(hand.clone());
    let color_bonus = color_bonus(hand);
    let total = if is_declaration_winner {
        base_score + color_bonus
    } else {
        color_bonus
    };

    HandScore {
        base_score,
        color_bonus,
        total,
    }
}

/// Whether a hand is worth enough to declare. Empty hands never can.
#[must_use]
pub fn can_declare<'a>(hand: impl IntoIterator<Item = &'a Card>) -> bool {
    hand_value(hand) >= DECLARE_THRESHOLD
}

/// Declarer wins only with a total strictly above every other player's.
pub fn determine_declaration_winner(
    scores: &[HandScore],
    declarer: PlayerId,
) -> RulesResult<DeclarationResult> {
    let declarer_score = scores
        .get(declarer.index())
        .ok_or(RulesError::PlayerOutOfRange {
            player: declarer,
            player_count: scores.len(),
        })?
        .total;
    let max_other_score = scores
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != declarer.index())
        .map(|(_, s)| s.total)
        .max();

    Ok(DeclarationResult {
        is_declarer_winner: max_other_score.map_or(true, |other| declarer_score > other),
        declarer_score,
        max_other_score,
    })
}
