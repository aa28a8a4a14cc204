//! Structural checks over a round snapshot.
//!
//! Diagnostic only: nothing in the engine calls these on every mutation.
//! `validate_value` applies the same checks to an untyped JSON snapshot
//! as received from the transport, before it is decoded.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{Phase, RoundState, DECK_SIZE, DISCARD_PILE_COUNT};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Check the round's structural invariants.
#[must_use]
pub fn validate(state: &RoundState) -> ValidationReport {
    let mut errors = Vec::new();

    if state.players.is_empty() {
        errors.push("No players in game".to_string());
    }
    if state.current_player.index() >= state.players.len() {
        errors.push(format!(
            "Invalid current player index {}",
            state.current_player.index()
        ));
    }
    match (state.phase, state.pending_declaration) {
        (Phase::Declaring, None) => {
            errors.push("Declaring phase without a pending declaration".to_string());
        }
        (_, Some(pending)) if pending.declarer.index() >= state.players.len() => {
            errors.push(format!(
                "Pending declarer {} is not at the table",
                pending.declarer
            ));
        }
        _ => {}
    }

    ValidationReport::from_errors(errors)
}

/// Check that all 64 cards are on the table exactly once.
#[must_use]
pub fn check_conservation(state: &RoundState) -> ValidationReport {
    let mut errors = Vec::new();

    let total = state.total_cards();
    if total != DECK_SIZE {
        errors.push(format!("Expected {DECK_SIZE} cards in play, found {total}"));
    }

    let mut seen = FxHashSet::default();
    let all_cards = state
        .deck
        .iter()
        .chain(state.discard_piles.iter().flatten())
        .chain(state.players.iter().flat_map(|p| p.hand.iter()));
    for card in all_cards {
        if !seen.insert(*card) {
            errors.push(format!("Card {card} appears more than once"));
        }
    }

    ValidationReport::from_errors(errors)
}

/// Check an undecoded snapshot.
#[must_use]
pub fn validate_value(snapshot: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    let player_count = match snapshot.get("players").and_then(Value::as_array) {
        Some(players) if !players.is_empty() => Some(players.len()),
        _ => {
            errors.push("No players in game".to_string());
            None
        }
    };

    if !snapshot.get("deck").is_some_and(Value::is_array) {
        errors.push("Invalid deck".to_string());
    }

    let piles_ok = snapshot
        .get("discardPiles")
        .and_then(Value::as_array)
        .is_some_and(|piles| piles.len() == DISCARD_PILE_COUNT && piles.iter().all(Value::is_array));
    if !piles_ok {
        errors.push("Invalid discard piles".to_string());
    }

    let current = snapshot.get("currentPlayer").and_then(Value::as_u64);
    match (current, player_count) {
        (Some(index), Some(count)) if (index as usize) < count => {}
        _ => errors.push("Invalid current player index".to_string()),
    }

    ValidationReport::from_errors(errors)
}
