//! Deck construction and shuffling.

use crate::core::{GameRng, COPIES_PER_KIND};

use super::definition::CardKind;
use super::instance::Card;

/// The full deck in catalog order: 8 copies of each kind, 64 cards.
#[must_use]
pub fn catalog_deck() -> Vec<Card> {
    CardKind::ALL
        .iter()
        .flat_map(|&kind| (0..COPIES_PER_KIND as u8).map(move |copy| Card::new(kind, copy)))
        .collect()
}

/// A freshly shuffled 64-card deck.
///
/// ```
/// use seasalt::cards::build_deck;
/// use seasalt::core::GameRng;
///
/// let deck = build_deck(&mut GameRng::new(1));
/// assert_eq!(deck.len(), 64);
/// ```
#[must_use]
pub fn build_deck(rng: &mut GameRng) -> Vec<Card> {
    shuffle(&catalog_deck(), rng)
}

/// Fisher–Yates shuffle into a new vector; the input is left as is.
///
/// For each index from the last down to 1, swap with a uniformly chosen
/// index in `0..=i`. The swap order is fixed here rather than left to
/// `SliceRandom::shuffle` so a seed deals the same deck across `rand`
/// releases.
#[must_use]
pub fn shuffle(cards: &[Card], rng: &mut GameRng) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_index(i);
        shuffled.swap(i, j);
    }
    shuffled
}
