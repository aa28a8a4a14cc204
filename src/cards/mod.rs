//! Card system: catalog, instances, and the deck.
//!
//! ## Key Types
//!
//! - `CardKind`: The eight catalog entries
//! - `CardDefinition`: Static value, color, category and pair effect
//! - `Card`: One physical card (kind + copy number)
//! - `build_deck` / `shuffle`: 64-card deck construction

pub mod deck;
pub mod definition;
pub mod instance;

pub use deck::{build_deck, catalog_deck, shuffle};
pub use definition::{CardDefinition, CardKind, Category, Color, EffectDetails, PairEffect, CATALOG};
pub use instance::{sort_hand, Card};
