//! Round state machine scenarios driven through the public API.

use im::Vector;
use seasalt::cards::{catalog_deck, Card, CardKind};
use seasalt::core::{DeclarationKind, Participant, Phase, Player, PlayerId, RoundState, RulesError};
use seasalt::rules::{
    advance_turn, check_conservation, deal_round, declare, draw_from_deck, settle_round,
    take_from_discard_pile, validate,
};

fn players(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(Participant::new(format!("p{i}"), format!("Player {i}"))))
        .collect()
}

fn hand(kinds: &[CardKind], first_copy: u8) -> Vector<Card> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, &k)| Card::new(k, first_copy + i as u8))
        .collect()
}

/// Dealing two players from a known deck order.
#[test]
fn test_two_player_deal_from_known_deck() {
    let deck = catalog_deck();
    let state = deal_round(players(2), deck.clone()).unwrap();

    assert_eq!(state.players[0].hand.len(), 5);
    assert_eq!(state.players[1].hand.len(), 5);
    assert_eq!(state.deck.len(), 54);
    assert!(state.discard_piles.iter().all(Vector::is_empty));
    assert_eq!(state.current_player, PlayerId(0));
    assert_eq!(state.phase, Phase::Drawing);
    assert_eq!(state.round_number, 0);

    // One card at a time from the top: seat 0 gets the last card, seat 1 the one below it.
    assert_eq!(state.players[0].hand[0], deck[63]);
    assert_eq!(state.players[1].hand[0], deck[62]);
    assert_eq!(state.players[0].hand[1], deck[61]);

    assert!(validate(&state).is_valid);
    assert!(check_conservation(&state).is_valid);
}

/// Deck with one card, piles of three and two: all six fold into the deck before the draw.
#[test]
fn test_reshuffle_scenario() {
    let mut state = deal_round(players(2), catalog_deck()).unwrap();
    let mut pool: Vec<Card> = state.deck.iter().copied().collect();
    state.deck = pool.drain(..1).collect();
    state.discard_piles[0] = pool.drain(..3).collect();
    state.discard_piles[1] = pool.drain(..2).collect();
    // Park the rest in a hand so the table still holds 64 cards.
    state.players[1].hand.extend(pool);

    let drawn = draw_from_deck(&state, 0, 0).unwrap();
    assert!(drawn.reshuffled);
    assert_eq!(drawn.state.deck.len(), 4);
    assert_eq!(drawn.state.discard_piles[0].len(), 1);
    assert!(drawn.state.discard_piles[1].is_empty());
    assert!(check_conservation(&drawn.state).is_valid);
}

/// Nothing anywhere to draw is an illegal action, not a partial result.
#[test]
fn test_draw_with_nothing_left() {
    let mut state = deal_round(players(2), catalog_deck()).unwrap();
    state.deck = Vector::new();

    let err = draw_from_deck(&state, 0, 0).unwrap_err();
    assert_eq!(err, RulesError::NoCardsToDraw { available: 0 });
}

/// Taking from an empty pile is a normal no-op.
#[test]
fn test_take_from_empty_pile() {
    let state = deal_round(players(2), catalog_deck()).unwrap();
    assert!(take_from_discard_pile(&state, 1).unwrap().is_none());
    assert!(take_from_discard_pile(&state, 2).is_err());
}

/// Three seats rotate back to the first.
#[test]
fn test_turn_rotation_three_players() {
    let mut state = deal_round(players(3), catalog_deck()).unwrap();
    state.current_player = PlayerId(2);
    assert_eq!(advance_turn(&state).current_player, PlayerId(0));
}

/// Declarer at base 10 and bonus 3 beats an opponent scoring only bonus 2.
#[test]
fn test_settlement_table_declarer_wins() {
    let mut state = deal_round(players(2), catalog_deck()).unwrap();
    // Penguin 3 x3 = 9 cyan, plus Fish 1 = 10 base, bonus 3.
    state.players[0].hand = hand(
        &[CardKind::Penguin, CardKind::Penguin, CardKind::Penguin, CardKind::Fish],
        0,
    );
    // Octopus 2 x2 = 4 pink, bonus 2.
    state.players[1].hand = hand(&[CardKind::Octopus, CardKind::Octopus], 0);

    let settled = declare(&state, PlayerId(0), DeclarationKind::Immediate).unwrap();
    let lines = &settled.settlement.players;
    assert!(settled.settlement.result.is_declarer_winner);
    assert_eq!(lines[0].points, 13);
    assert_eq!(lines[1].points, 2);
    assert_eq!(settled.state.players[0].cumulative_score, 13);
    assert_eq!(settled.state.players[1].last_round_score, 2);
    assert_eq!(settled.state.phase, Phase::Scoring);
}

/// Settled rounds reject further turn actions.
#[test]
fn test_settled_round_is_closed() {
    let mut state = deal_round(players(2), catalog_deck()).unwrap();
    state.players[0].hand = hand(&[CardKind::Shark, CardKind::Human], 0);
    let settled: RoundState = settle_round(&state, PlayerId(0)).unwrap().state;

    assert_eq!(
        draw_from_deck(&settled, 0, 0).unwrap_err(),
        RulesError::WrongPhase { actual: Phase::Scoring }
    );
}
