//! Multi-round session play.

use seasalt::cards::PairEffect;
use seasalt::core::{DeclarationKind, ErrorKind, Participant, Phase, PlayerId, RulesConfig};
use seasalt::rules::{check_conservation, find_valid_pairs, validate, EffectRequest};
use seasalt::session::{ActionOutcome, GameSession, SessionAction};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn table(n: usize, seed: u64) -> GameSession {
    let participants = (0..n)
        .map(|i| Participant::new(format!("user-{i}"), format!("Seat {i}")))
        .collect();
    GameSession::new(participants, RulesConfig::default().with_seed(seed)).unwrap()
}

/// One turn for whoever is active: draw, play a fish or crab pair if the
/// hand has one, then declare when the hand allows it or end the turn.
fn play_turn(session: &mut GameSession) -> ActionOutcome {
    let seat = session.round().current_player;

    if session.round().drawable_cards() >= 2 {
        session
            .apply(seat, SessionAction::DrawFromDeck { discard_pile: 0, keep: 0 })
            .unwrap();
    }

    let round = session.round();
    let hand = &round.active_player().unwrap().hand;
    if let Some(pair) = find_valid_pairs(hand).first().copied() {
        let request = match hand[pair.first].pair_effect() {
            Some(PairEffect::Draw) if round.drawable_cards() >= 2 => {
                Some(EffectRequest::Draw { discard_pile: 1, keep: 1 })
            }
            Some(PairEffect::TakeDiscard) => Some(EffectRequest::TakeDiscard { pile: 0 }),
            _ => None,
        };
        if let Some(request) = request {
            session
                .apply(
                    seat,
                    SessionAction::ActivatePair { first: pair.first, second: pair.second, request },
                )
                .unwrap();
        }
    }

    let round = session.round();
    let can_declare = round.pending_declaration.is_none()
        && round.active_player().unwrap().hand_value() >= 7;
    if can_declare {
        session
            .apply(seat, SessionAction::Declare { kind: DeclarationKind::LastChance })
            .unwrap()
    } else {
        session.apply(seat, SessionAction::EndTurn).unwrap()
    }
}

/// Greedy play reaches a winner, keeping every snapshot valid along the way.
#[test]
fn test_game_plays_to_completion() {
    init_tracing();
    for seed in [1, 2, 3] {
        let mut session = table(3, seed);
        let mut settlements = 0;

        for _ in 0..2_000 {
            if session.is_over() {
                break;
            }
            if let ActionOutcome::RoundSettled(_) = play_turn(&mut session) {
                settlements += 1;
            }
            if !session.is_over() {
                assert!(validate(session.round()).is_valid);
                assert!(check_conservation(session.round()).is_valid);
            }
        }

        let outcome = session.outcome().expect("game should finish");
        assert!(settlements >= 1);
        assert_eq!(outcome.rounds_played, settlements);
        assert!(outcome.final_scores[outcome.winner.index()].score >= session.target_score());
    }
}

/// Scores carry over between rounds.
#[test]
fn test_scores_carry_over() {
    let mut session = table(2, 8);

    loop {
        if let ActionOutcome::RoundSettled(settlement) = play_turn(&mut session) {
            if settlement.game_winner.is_none() {
                let round = session.round();
                assert_eq!(round.round_number, 1);
                assert_eq!(round.phase, Phase::Drawing);
                for (line, player) in settlement.players.iter().zip(&round.players) {
                    assert_eq!(line.cumulative_score, player.cumulative_score);
                    assert_eq!(line.points, player.last_round_score);
                }
            }
            break;
        }
    }
}

/// A restored snapshot continues exactly like the original.
#[test]
fn test_snapshot_restores_identically() {
    let mut original = table(4, 31);
    for _ in 0..6 {
        play_turn(&mut original);
    }

    let mut from_json = GameSession::from_json(&original.to_json().unwrap()).unwrap();
    let mut from_bytes = GameSession::from_bytes(&original.to_bytes().unwrap()).unwrap();

    for _ in 0..40 {
        if original.is_over() {
            break;
        }
        let a = play_turn(&mut original);
        assert_eq!(play_turn(&mut from_json), a);
        assert_eq!(play_turn(&mut from_bytes), a);
    }
    assert_eq!(from_json, original);
    assert_eq!(from_bytes, original);
}

/// Rejections are categorized and leave the session alone.
#[test]
fn test_rejections_are_categorized() {
    let mut session = table(2, 4);
    let before = session.clone();

    let out_of_turn = session.apply(PlayerId(1), SessionAction::EndTurn).unwrap_err();
    assert_eq!(out_of_turn.kind(), ErrorKind::IllegalAction);

    let bad_pile = session
        .apply(PlayerId(0), SessionAction::DrawFromDeck { discard_pile: 3, keep: 0 })
        .unwrap_err();
    assert_eq!(bad_pile.kind(), ErrorKind::InvalidInput);

    let bad_pair = session
        .apply(
            PlayerId(0),
            SessionAction::ActivatePair { first: 0, second: 0, request: EffectRequest::ExtraTurn },
        )
        .unwrap_err();
    assert_eq!(bad_pair.kind(), ErrorKind::InvalidSelection);

    assert_eq!(session, before);
}
