//! Pair-effect dispatch.
//!
//! Playing a valid pair triggers the ability printed on the pair. Each
//! ability is carried out by the same primitives the turn uses:
//!
//! - `Draw` → `draw_from_deck`
//! - `TakeDiscard` → `take_from_discard_pile`
//! - `ExtraTurn` → marks the turn so `end_turn` keeps the same player
//! - `Steal` → `steal_card`
//!
//! The paired cards stay in the player's hand.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::pairing::check_pair;
use super::round::{draw_from_deck, take_from_discard_pile};
use crate::cards::{Card, PairEffect};
use crate::core::{PlayerId, RoundState, RulesError, RulesResult};

/// The choices needed to carry out a pair effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "camelCase")]
pub enum EffectRequest {
    Draw { discard_pile: usize, keep: usize },
    TakeDiscard { pile: usize },
    ExtraTurn,
    Steal { target: PlayerId, card_index: usize },
}

impl EffectRequest {
    #[must_use]
    pub fn effect(&self) -> PairEffect {
        match self {
            EffectRequest::Draw { .. } => PairEffect::Draw,
            EffectRequest::TakeDiscard { .. } => PairEffect::TakeDiscard,
            EffectRequest::ExtraTurn => PairEffect::ExtraTurn,
            EffectRequest::Steal { .. } => PairEffect::Steal,
        }
    }
}

/// What a pair effect did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "camelCase")]
pub enum EffectOutcome {
    Drew { kept: Card, discarded: Card },
    /// `None` when the chosen pile was empty.
    Took { card: Option<Card> },
    ExtraTurn,
    Stole { from: PlayerId, card: Card },
}

/// Move one card from `target`'s hand into the active player's hand.
pub fn steal_card(state: &RoundState, target: PlayerId, card_index: usize) -> RulesResult<(RoundState, Card)> {
    state.ensure_in_play()?;
    let actor = state.current_player;
    let victim = state.player(target)?;
    if target == actor {
        return Err(RulesError::StealFromSelf);
    }
    if card_index >= victim.hand.len() {
        return Err(RulesError::CardIndexOutOfRange {
            index: card_index,
            len: victim.hand.len(),
        });
    }

    let mut next = state.clone();
    let card = next.player_mut(target)?.hand.remove(card_index);
    next.player_mut(actor)?.hand.push_back(card);

    debug!(%actor, from = %target, %card, "stole card");
    Ok((next, card))
}

/// Play the pair at hand positions `first`/`second` of the active player
/// and carry out its effect.
///
/// One pair per seat per turn. An extra turn from a ship pair does not
/// free another activation; the flag clears when the seat changes. Taking
/// from an empty pile changes nothing and does not spend the activation.
pub fn activate_pair(
    state: &RoundState,
    first: usize,
    second: usize,
    request: EffectRequest,
) -> RulesResult<(RoundState, EffectOutcome)> {
    state.ensure_in_play()?;
    if state.pair_activated {
        return Err(RulesError::PairAlreadyActivated {
            player: state.current_player,
        });
    }
    let hand = &state.active_player()?.hand;
    let (a, _) = check_pair(hand, first, second)?;

    // Shark and human both steal, so the first card decides for every pair.
    let granted = a.pair_effect().ok_or(RulesError::NoPairEffect { kind: a.kind })?;
    let requested = request.effect();
    if granted != requested {
        return Err(RulesError::EffectMismatch { granted, requested });
    }

    debug!(actor = %state.current_player, effect = ?granted, "activated pair");

    let (mut next, outcome) = match request {
        EffectRequest::Draw { discard_pile, keep } => {
            let drawn = draw_from_deck(state, discard_pile, keep)?;
            (
                drawn.state,
                EffectOutcome::Drew {
                    kept: drawn.kept,
                    discarded: drawn.discarded,
                },
            )
        }
        EffectRequest::TakeDiscard { pile } => match take_from_discard_pile(state, pile)? {
            Some(taken) => (taken.state, EffectOutcome::Took { card: Some(taken.card) }),
            None => return Ok((state.clone(), EffectOutcome::Took { card: None })),
        },
        EffectRequest::ExtraTurn => {
            let mut next = state.clone();
            next.extra_turn = true;
            (next, EffectOutcome::ExtraTurn)
        }
        EffectRequest::Steal { target, card_index } => {
            let (next, card) = steal_card(state, target, card_index)?;
            (next, EffectOutcome::Stole { from: target, card })
        }
    };
    next.pair_activated = true;
    Ok((next, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{catalog_deck, CardKind};
    use crate::core::{Participant, Player};
    use crate::rules::round::{advance_turn, deal_round, end_turn};

    fn state_with_hands(hands: &[&[CardKind]]) -> RoundState {
        let players = (0..hands.len())
            .map(|i| Player::new(Participant::new(format!("id-{i}"), format!("P{i}"))))
            .collect();
        let mut state = deal_round(players, catalog_deck()).unwrap();
        for (player, kinds) in state.players.iter_mut().zip(hands) {
            player.hand = kinds
                .iter()
                .enumerate()
                .map(|(i, &k)| Card::new(k, i as u8))
                .collect();
        }
        state
    }

    #[test]
    fn test_fish_pair_draws() {
        let state = state_with_hands(&[&[CardKind::Fish, CardKind::Fish], &[]]);
        let (next, outcome) = activate_pair(
            &state,
            0,
            1,
            EffectRequest::Draw { discard_pile: 0, keep: 0 },
        )
        .unwrap();

        assert!(matches!(outcome, EffectOutcome::Drew { .. }));
        assert_eq!(next.players[0].hand.len(), 3);
        assert_eq!(next.discard_piles[0].len(), 1);
    }

    #[test]
    fn test_crab_pair_takes_discard() {
        let mut state = state_with_hands(&[&[CardKind::Crab, CardKind::Shell, CardKind::Crab], &[]]);
        state.discard_piles[1].push_back(Card::new(CardKind::Penguin, 7));

        let (next, outcome) =
            activate_pair(&state, 2, 0, EffectRequest::TakeDiscard { pile: 1 }).unwrap();
        assert_eq!(
            outcome,
            EffectOutcome::Took { card: Some(Card::new(CardKind::Penguin, 7)) }
        );
        assert_eq!(next.players[0].hand.len(), 4);

        let (unchanged, outcome) =
            activate_pair(&state, 0, 2, EffectRequest::TakeDiscard { pile: 0 }).unwrap();
        assert_eq!(outcome, EffectOutcome::Took { card: None });
        assert_eq!(unchanged, state);
    }

    #[test]
    fn test_ship_pair_grants_extra_turn() {
        let state = state_with_hands(&[&[CardKind::Ship, CardKind::Ship], &[]]);
        let (next, outcome) = activate_pair(&state, 0, 1, EffectRequest::ExtraTurn).unwrap();

        assert_eq!(outcome, EffectOutcome::ExtraTurn);
        assert!(next.extra_turn);
        assert_eq!(end_turn(&next).current_player, PlayerId(0));
    }

    #[test]
    fn test_one_pair_per_turn() {
        let state = state_with_hands(&[&[CardKind::Ship, CardKind::Ship], &[CardKind::Ship, CardKind::Ship]]);
        let (played, _) = activate_pair(&state, 0, 1, EffectRequest::ExtraTurn).unwrap();
        assert!(played.pair_activated);

        let again = activate_pair(&played, 0, 1, EffectRequest::ExtraTurn).unwrap_err();
        assert_eq!(again, RulesError::PairAlreadyActivated { player: PlayerId(0) });
        assert_eq!(again.kind(), crate::core::ErrorKind::IllegalAction);

        // The extra turn keeps the seat, so the pair stays spent.
        let extra = end_turn(&played);
        assert_eq!(extra.current_player, PlayerId(0));
        assert!(activate_pair(&extra, 0, 1, EffectRequest::ExtraTurn).is_err());

        let passed = end_turn(&extra);
        assert_eq!(passed.current_player, PlayerId(1));
        assert!(!passed.pair_activated);
        assert!(activate_pair(&passed, 0, 1, EffectRequest::ExtraTurn).is_ok());
        assert!(!advance_turn(&played).pair_activated);
    }

    #[test]
    fn test_shark_human_pair_steals() {
        let state = state_with_hands(&[
            &[CardKind::Human, CardKind::Shark],
            &[CardKind::Octopus, CardKind::Penguin],
        ]);

        let (next, outcome) = activate_pair(
            &state,
            0,
            1,
            EffectRequest::Steal { target: PlayerId(1), card_index: 1 },
        )
        .unwrap();

        assert_eq!(
            outcome,
            EffectOutcome::Stole { from: PlayerId(1), card: Card::new(CardKind::Penguin, 1) }
        );
        assert_eq!(next.players[0].hand.len(), 3);
        assert_eq!(next.players[1].hand.len(), 1);
        assert_eq!(next.total_cards(), state.total_cards());
    }

    #[test]
    fn test_rejections() {
        let state = state_with_hands(&[
            &[CardKind::Fish, CardKind::Crab, CardKind::Penguin, CardKind::Penguin, CardKind::Shark, CardKind::Shark],
            &[],
        ]);

        assert!(matches!(
            activate_pair(&state, 0, 1, EffectRequest::ExtraTurn),
            Err(RulesError::InvalidPair { .. })
        ));
        assert_eq!(
            activate_pair(&state, 2, 3, EffectRequest::ExtraTurn).unwrap_err(),
            RulesError::NoPairEffect { kind: CardKind::Penguin }
        );
        assert_eq!(
            activate_pair(&state, 4, 5, EffectRequest::ExtraTurn).unwrap_err(),
            RulesError::EffectMismatch {
                granted: PairEffect::Steal,
                requested: PairEffect::ExtraTurn,
            }
        );
        assert_eq!(
            activate_pair(&state, 4, 5, EffectRequest::Steal { target: PlayerId(0), card_index: 0 })
                .unwrap_err(),
            RulesError::StealFromSelf
        );
        assert_eq!(
            activate_pair(&state, 4, 5, EffectRequest::Steal { target: PlayerId(1), card_index: 0 })
                .unwrap_err(),
            RulesError::CardIndexOutOfRange { index: 0, len: 0 }
        );
        assert!(matches!(
            activate_pair(&state, 4, 5, EffectRequest::Steal { target: PlayerId(3), card_index: 0 }),
            Err(RulesError::PlayerOutOfRange { .. })
        ));
    }

    #[test]
    fn test_request_serialization() {
        let request = EffectRequest::Draw { discard_pile: 1, keep: 0 };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"effect":"draw","discard_pile":1,"keep":0}"#);

        let back: EffectRequest = serde_json::from_str(r#"{"effect":"extraTurn"}"#).unwrap();
        assert_eq!(back, EffectRequest::ExtraTurn);
    }
}
