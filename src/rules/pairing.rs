//! Pair validity and pair enumeration.
//!
//! Two cards pair when they share a kind, or when one is a shark and the
//! other a human. Hands are small (rarely more than a dozen cards), so the
//! enumeration is a plain O(n²) scan.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardKind};
use crate::core::{RulesError, RulesResult};

/// Two hand positions with `first < second`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairIndices {
    pub first: usize,
    pub second: usize,
}

impl PairIndices {
    /// Normalize an unordered selection.
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }
}

pub type ValidPairs = SmallVec<[PairIndices; 8]>;

/// Whether two catalog kinds pair.
#[must_use]
pub fn kinds_pair(a: CardKind, b: CardKind) -> bool {
    use CardKind::{Human, Shark};

    a == b || matches!((a, b), (Shark, Human) | (Human, Shark))
}

/// Whether two cards form a valid pair. Symmetric.
#[must_use]
pub fn is_valid_pair(a: &Card, b: &Card) -> bool {
    kinds_pair(a.kind, b.kind)
}

/// Pair check over possibly-absent cards; absent never pairs.
#[must_use]
pub fn is_valid_pair_opt(a: Option<&Card>, b: Option<&Card>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => is_valid_pair(a, b),
        _ => false,
    }
}

/// All index pairs `i < j` in the hand that form a valid pair,
/// ascending by `i` then `j`.
#[must_use]
pub fn find_valid_pairs(hand: &Vector<Card>) -> ValidPairs {
    let mut pairs = ValidPairs::new();
    for (i, a) in hand.iter().enumerate() {
        for (j, b) in hand.iter().enumerate().skip(i + 1) {
            if is_valid_pair(a, b) {
                pairs.push(PairIndices { first: i, second: j });
            }
        }
    }
    pairs
}

/// Whether `{i, j}` is one of the hand's valid pairs.
#[must_use]
pub fn validate_pair_selection(hand: &Vector<Card>, i: usize, j: usize) -> bool {
    let selection = PairIndices::new(i, j);
    find_valid_pairs(hand).contains(&selection)
}

/// Resolve a selection to its two cards, or say why it is not a pair.
pub fn check_pair(hand: &Vector<Card>, i: usize, j: usize) -> RulesResult<(Card, Card)> {
    let card_at = |index: usize| {
        hand.get(index).copied().ok_or(RulesError::CardIndexOutOfRange {
            index,
            len: hand.len(),
        })
    };
    let a = card_at(i)?;
    let b = card_at(j)?;

    if i == j {
        return Err(RulesError::SameCardTwice { index: i });
    }
    if !validate_pair_selection(hand, i, j) {
        return Err(RulesError::InvalidPair {
            first: a.kind,
            second: b.kind,
        });
    }
    Ok((a, b))
}
