//! Card definitions - the static catalog.
//!
//! There are eight kinds of card. Each kind has a fixed value, color,
//! category and (for pair-effect cards) the ability a pair of them triggers.
//! Instance data (which copy of the card this is) lives in `Card`.

use serde::{Deserialize, Serialize};

/// Catalog identifier for a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardKind {
    Fish,
    Crab,
    Ship,
    Shark,
    Human,
    Shell,
    Octopus,
    Penguin,
}

impl CardKind {
    /// Every kind, in catalog order.
    pub const ALL: [CardKind; 8] = [
        CardKind::Fish,
        CardKind::Crab,
        CardKind::Ship,
        CardKind::Shark,
        CardKind::Human,
        CardKind::Shell,
        CardKind::Octopus,
        CardKind::Penguin,
    ];

    /// Static catalog entry for this kind.
    #[must_use]
    pub fn definition(self) -> &'static CardDefinition {
        &CATALOG[self as usize]
    }

    /// Lowercase identifier, as used in snapshots.
    #[must_use]
    pub fn identifier(self) -> &'static str {
        self.definition().identifier
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.definition().name)
    }
}

/// Whether a card is played in pairs or collected for points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    PairEffect,
    Collection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    Blue,
    Red,
    Green,
    Orange,
    Purple,
    Yellow,
    Pink,
    Cyan,
}

impl Color {
    /// Lowercase color name, as serialized.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::Yellow => "yellow",
            Color::Pink => "pink",
            Color::Cyan => "cyan",
        }
    }
}

/// Ability triggered by playing a valid pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PairEffect {
    /// Draw two cards from the deck, keep one.
    Draw,
    /// Take the top card of either discard pile.
    TakeDiscard,
    /// Play another turn.
    ExtraTurn,
    /// Take one card from another player's hand.
    Steal,
}

/// Display text for a pair effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectDetails {
    pub name: &'static str,
    pub description: &'static str,
}

impl PairEffect {
    #[must_use]
    pub fn describe(self) -> EffectDetails {
        let (name, description) = match self {
            PairEffect::Draw => ("Draw", "Draw 2 cards and keep 1"),
            PairEffect::TakeDiscard => ("Salvage", "Take the top card of either discard pile"),
            PairEffect::ExtraTurn => ("Extra turn", "Play another turn"),
            PairEffect::Steal => ("Steal", "Take 1 card from an opponent's hand"),
        };
        EffectDetails { name, description }
    }
}

/// Static card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardDefinition {
    pub kind: CardKind,
    pub identifier: &'static str,
    pub name: &'static str,
    pub category: Category,
    pub value: u32,
    pub color: Color,
    pub pair_effect: Option<PairEffect>,
}

/// The catalog, indexed by `CardKind as usize`.
pub static CATALOG: [CardDefinition; 8] = [
    CardDefinition {
        kind: CardKind::Fish,
        identifier: "fish",
        name: "Fish",
        category: Category::PairEffect,
        value: 1,
        color: Color::Blue,
        pair_effect: Some(PairEffect::Draw),
    },
    CardDefinition {
        kind: CardKind::Crab,
        identifier: "crab",
        name: "Crab",
        category: Category::PairEffect,
        value: 2,
        color: Color::Red,
        pair_effect: Some(PairEffect::TakeDiscard),
    },
    CardDefinition {
        kind: CardKind::Ship,
        identifier: "ship",
        name: "Ship",
        category: Category::PairEffect,
        value: 3,
        color: Color::Green,
        pair_effect: Some(PairEffect::ExtraTurn),
    },
    CardDefinition {
        kind: CardKind::Shark,
        identifier: "shark",
        name: "Shark",
        category: Category::PairEffect,
        value: 4,
        color: Color::Orange,
        pair_effect: Some(PairEffect::Steal),
    },
    CardDefinition {
        kind: CardKind::Human,
        identifier: "human",
        name: "Human",
        category: Category::PairEffect,
        value: 4,
        color: Color::Purple,
        pair_effect: Some(PairEffect::Steal),
    },
    CardDefinition {
        kind: CardKind::Shell,
        identifier: "shell",
        name: "Shell",
        category: Category::Collection,
        value: 1,
        color: Color::Yellow,
        pair_effect: None,
    },
    CardDefinition {
        kind: CardKind::Octopus,
        identifier: "octopus",
        name: "Octopus",
        category: Category::Collection,
        value: 2,
        color: Color::Pink,
        pair_effect: None,
    },
    CardDefinition {
        kind: CardKind::Penguin,
        identifier: "penguin",
        name: "Penguin",
        category: Category::Collection,
        value: 3,
        color: Color::Cyan,
        pair_effect: None,
    },
];
