//! The round state machine.
//!
//! Every operation takes the current `RoundState` by reference and returns
//! a new snapshot plus whatever the operation produced. A rejected
//! operation returns an error and the caller's snapshot is untouched.
//!
//! Operations act for `state.current_player`. Checking that the caller is
//! that player is done at the boundary (`RoundState::ensure_turn`), against
//! the latest authoritative snapshot, before any of these are called.
//!
//! ## Lifecycle
//!
//! ```text
//! deal_round ──► Drawing ──draw/take/pairs──► end_turn ──► Drawing (next seat)
//!                   │
//!                   ├── declare(Immediate) ─────────────────────► Scoring
//!                   └── open_last_chance ──► Declaring ──(others' turns)──► settle_round ──► Scoring
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::scoring::{
    calculate_hand_score, can_declare, determine_declaration_winner, hand_value,
    DeclarationResult, HandScore,
};
use crate::cards::Card;
use crate::core::{
    DeclarationKind, PendingDeclaration, Phase, Player, PlayerId, RoundState, RulesError,
    RulesResult, DECLARE_THRESHOLD, HAND_SIZE,
};

/// Cumulative score that ends the game for a table of `player_count`.
///
/// ```
/// use seasalt::rules::target_score;
///
/// assert_eq!(target_score(2), 40);
/// assert_eq!(target_score(3), 35);
/// assert_eq!(target_score(4), 30);
/// assert_eq!(target_score(5), 40);
/// ```
#[must_use]
pub fn target_score(player_count: usize) -> u32 {
    match player_count {
        2 => 40,
        3 => 35,
        4 => 30,
        _ => 40,
    }
}

/// First seat, in seat order, whose cumulative score reached `target`.
#[must_use]
pub fn game_winner(players: &[Player], target: u32) -> Option<PlayerId> {
    players
        .iter()
        .position(|p| p.cumulative_score >= target)
        .map(|i| PlayerId(i as u8))
}

/// Result of drawing two and keeping one.
#[derive(Clone, Debug)]
pub struct Drawn {
    pub state: RoundState,
    pub kept: Card,
    pub discarded: Card,
    /// The discard piles were folded back into the deck first.
    pub reshuffled: bool,
}

/// Result of taking the top of a discard pile.
#[derive(Clone, Debug)]
pub struct Taken {
    pub state: RoundState,
    pub card: Card,
}

/// One player's line in a settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSettlement {
    pub player: PlayerId,
    /// Hand scored as a non-winner (`total == color_bonus`).
    pub score: HandScore,
    /// Points added to the cumulative score.
    pub points: u32,
    pub cumulative_score: u32,
}

/// Everything decided when a round is settled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub declarer: PlayerId,
    pub result: DeclarationResult,
    pub players: Vec<PlayerSettlement>,
    pub target_score: u32,
    /// First seat at or over target, if any.
    pub game_winner: Option<PlayerId>,
}

/// Result of settling a round.
#[derive(Clone, Debug)]
pub struct Settled {
    pub state: RoundState,
    pub settlement: Settlement,
}

/// Deal a new round.
///
/// Hands are cleared and five cards go to each player one at a time in
/// seat order, taken from the top (end) of `deck`. What remains is the
/// draw deck. Cumulative scores are carried on the players as given.
pub fn deal_round(players: Vec<Player>, deck: Vec<Card>) -> RulesResult<RoundState> {
    if players.is_empty() || players.len() > u8::MAX as usize {
        return Err(RulesError::PlayerCount {
            count: players.len(),
            min: 1,
            max: u8::MAX as usize,
        });
    }
    let needed = players.len() * HAND_SIZE;
    if deck.len() < needed {
        return Err(RulesError::DeckTooSmall {
            available: deck.len(),
            needed,
        });
    }

    let mut deck: Vector<Card> = deck.into_iter().collect();
    let mut players: Vec<Player> = players
        .into_iter()
        .map(|mut p| {
            p.hand = Vector::new();
            p.is_active = true;
            p
        })
        .collect();

    for _ in 0..HAND_SIZE {
        for player in &mut players {
            if let Some(card) = deck.pop_back() {
                player.hand.push_back(card);
            }
        }
    }

    debug!(
        players = players.len(),
        deck = deck.len(),
        "dealt round"
    );

    Ok(RoundState {
        deck,
        discard_piles: [Vector::new(), Vector::new()],
        players,
        current_player: PlayerId(0),
        round_number: 0,
        phase: Phase::Drawing,
        pending_declaration: None,
        extra_turn: false,
        pair_activated: false,
    })
}

/// Draw two cards from the deck; keep one, discard the other.
///
/// With fewer than two cards in the deck, both discard piles are first
/// folded under the remaining deck cards (pile 0, then pile 1, then what
/// was left of the deck on top) and emptied.
pub fn draw_from_deck(state: &RoundState, discard_pile: usize, keep: usize) -> RulesResult<Drawn> {
    state.ensure_in_play()?;
    state.discard_pile(discard_pile)?;
    if keep > 1 {
        return Err(RulesError::KeepChoiceOutOfRange { choice: keep });
    }
    let available = state.drawable_cards();
    if available < 2 {
        return Err(RulesError::NoCardsToDraw { available });
    }

    let mut next = state.clone();
    let reshuffled = next.deck.len() < 2;
    if reshuffled {
        let [first, second] = std::mem::take(&mut next.discard_piles);
        let mut deck = first;
        deck.append(second);
        deck.append(std::mem::take(&mut next.deck));
        next.deck = deck;
        debug!(deck = next.deck.len(), "folded discard piles into deck");
    }

    let (Some(top), Some(second)) = (next.deck.pop_back(), next.deck.pop_back()) else {
        return Err(RulesError::NoCardsToDraw { available });
    };
    let drawn = [top, second];
    let kept = drawn[keep];
    let discarded = drawn[1 - keep];

    let actor = next.current_player;
    next.player_mut(actor)?.hand.push_back(kept);
    next.discard_piles[discard_pile].push_back(discarded);

    debug!(%actor, %kept, %discarded, discard_pile, "drew from deck");

    Ok(Drawn {
        state: next,
        kept,
        discarded,
        reshuffled,
    })
}

/// Take the top card of a discard pile into the active player's hand.
///
/// An empty pile is a normal outcome and yields `Ok(None)`.
pub fn take_from_discard_pile(state: &RoundState, pile: usize) -> RulesResult<Option<Taken>> {
    state.ensure_in_play()?;
    if state.discard_pile(pile)?.is_empty() {
        return Ok(None);
    }

    let mut next = state.clone();
    let Some(card) = next.discard_piles[pile].pop_back() else {
        return Ok(None);
    };
    let actor = next.current_player;
    next.player_mut(actor)?.hand.push_back(card);

    debug!(%actor, %card, pile, "took from discard pile");

    Ok(Some(Taken { state: next, card }))
}

/// Pass the turn to the next seat.
///
/// The phase returns to `Drawing`, or stays `Declaring` while a
/// last-chance declaration is being played out.
#[must_use]
pub fn advance_turn(state: &RoundState) -> RoundState {
    let mut next = state.clone();
    next.current_player = state.current_player.next(state.player_count());
    next.phase = if next.pending_declaration.is_some() {
        Phase::Declaring
    } else {
        Phase::Drawing
    };
    next.extra_turn = false;
    next.pair_activated = false;
    next
}

/// Finish the active player's turn, honouring an extra turn earned this turn.
#[must_use]
pub fn end_turn(state: &RoundState) -> RoundState {
    if state.extra_turn {
        let mut next = state.clone();
        next.extra_turn = false;
        debug!(actor = %state.current_player, "extra turn");
        return next;
    }
    advance_turn(state)
}

fn ensure_can_declare(state: &RoundState, declarer: PlayerId) -> RulesResult<()> {
    let player = state.player(declarer)?;
    if !can_declare(&player.hand) {
        return Err(RulesError::BelowDeclareThreshold {
            hand_value: hand_value(&player.hand),
            threshold: DECLARE_THRESHOLD,
        });
    }
    Ok(())
}

/// Declare the end of the round and settle it with the hands as they are.
///
/// Settlement is the same for both kinds. Giving the other players their
/// last-chance turns first is done with `open_last_chance`.
pub fn declare(state: &RoundState, declarer: PlayerId, kind: DeclarationKind) -> RulesResult<Settled> {
    if let Some(pending) = state.pending_declaration {
        return Err(RulesError::DeclarationPending {
            declarer: pending.declarer,
        });
    }
    state.ensure_in_play()?;
    ensure_can_declare(state, declarer)?;
    debug!(%declarer, ?kind, "declared");
    settle_round(state, declarer)
}

/// Start a last-chance declaration.
///
/// Records the declaration, moves to `Declaring` and passes the turn. Each
/// other player then takes one more turn; once `last_chance_complete`
/// reports true the caller settles the round.
pub fn open_last_chance(state: &RoundState, declarer: PlayerId) -> RulesResult<RoundState> {
    if let Some(pending) = state.pending_declaration {
        return Err(RulesError::DeclarationPending {
            declarer: pending.declarer,
        });
    }
    state.ensure_in_play()?;
    ensure_can_declare(state, declarer)?;

    let mut next = state.clone();
    next.pending_declaration = Some(PendingDeclaration {
        declarer,
        kind: DeclarationKind::LastChance,
    });
    next.current_player = declarer;
    next.extra_turn = false;

    debug!(%declarer, "opened last chance");
    Ok(advance_turn(&next))
}

/// Whether every other player has had their last-chance turn.
#[must_use]
pub fn last_chance_complete(state: &RoundState) -> bool {
    state
        .pending_declaration
        .is_some_and(|pending| pending.declarer == state.current_player)
}

/// Score every hand and bank the points.
///
/// | player   | declarer wins           | declarer loses          |
/// |----------|-------------------------|-------------------------|
/// | declarer | base + color bonus      | color bonus only        |
/// | other    | color bonus only        | base + color bonus      |
///
/// The winner comparison uses each hand's non-winner total (its color
/// bonus).
pub fn settle_round(state: &RoundState, declarer: PlayerId) -> RulesResult<Settled> {
    state.player(declarer)?;

    let scores: Vec<HandScore> = state
        .players
        .iter()
        .map(|p| calculate_hand_score(&p.hand, false))
        .collect();
    let result = determine_declaration_winner(&scores, declarer)?;

    let mut next = state.clone();
    let mut lines = Vec::with_capacity(scores.len());
    for ((seat, player), score) in next.players.iter_mut().enumerate().zip(&scores) {
        let seat = PlayerId(seat as u8);
        let banks_base = (seat == declarer) == result.is_declarer_winner;
        let points = if banks_base {
            score.base_score + score.color_bonus
        } else {
            score.color_bonus
        };

        player.cumulative_score += points;
        player.last_round_score = points;
        lines.push(PlayerSettlement {
            player: seat,
            score: *score,
            points,
            cumulative_score: player.cumulative_score,
        });
    }

    let target = target_score(next.player_count());
    let winner = game_winner(&next.players, target);

    next.phase = Phase::Scoring;
    next.pending_declaration = None;
    next.extra_turn = false;
    next.pair_activated = false;

    info!(
        %declarer,
        declarer_won = result.is_declarer_winner,
        round = next.round_number,
        game_winner = ?winner,
        "settled round"
    );

    Ok(Settled {
        state: next,
        settlement: Settlement {
            declarer,
            result,
            players: lines,
            target_score: target,
            game_winner: winner,
        },
    })
}
