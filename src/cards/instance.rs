//! Card instances - one physical card in the deck.
//!
//! A `Card` is its catalog kind plus a copy number. The pair
//! `(kind, copy)` is the card's unique token: no two cards in a deck
//! share it, so a card can be tracked as it moves between deck, piles
//! and hands.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardKind, Category, Color, PairEffect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Card {
    pub kind: CardKind,
    pub copy: u8,
}

impl Card {
    #[must_use]
    pub const fn new(kind: CardKind, copy: u8) -> Self {
        Self { kind, copy }
    }

    #[must_use]
    pub fn definition(&self) -> &'static CardDefinition {
        self.kind.definition()
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.definition().value
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.definition().color
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.definition().category
    }

    #[must_use]
    pub fn pair_effect(&self) -> Option<PairEffect> {
        self.definition().pair_effect
    }

    /// Unique token such as `fish_3`.
    #[must_use]
    pub fn token(&self) -> String {
        format!("{}_{}", self.kind.identifier(), self.copy)
    }

    /// Label for display, e.g. `Penguin (3)`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.definition().name, self.value())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.kind.identifier(), self.copy)
    }
}

/// Sort a hand for display: pair-effect cards first, then alphabetically by
/// color name, then by value.
///
/// Returns a new list; the hand's own order is untouched.
#[must_use]
pub fn sort_hand<'a>(hand: impl IntoIterator<Item = &'a Card>) -> Vec<Card> {
    let mut sorted: Vec<Card> = hand.into_iter().copied().collect();
    sorted.sort_by_key(|c| (c.category(), c.color().name(), c.value(), c.copy));
    sorted
}
