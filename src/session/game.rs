//! Multi-round game session.
//!
//! `GameSession` owns the authoritative round snapshot for one table. It
//! re-checks whose turn it is before every action, plays out last-chance
//! declarations, settles rounds, and deals the next round until someone
//! reaches the target score.
//!
//! The whole session serializes, RNG position included, so a snapshot
//! taken between actions deals the same next round when restored.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cards::{build_deck, Card};
use crate::core::{
    DeclarationKind, GameRng, GameRngState, Participant, ParticipantId, Player, PlayerId,
    RoundState, RulesConfig, RulesError, RulesResult,
};
use crate::rules::{
    activate_pair, deal_round, declare, draw_from_deck, end_turn, game_winner,
    last_chance_complete, open_last_chance, settle_round, status, take_from_discard_pile,
    target_score, EffectOutcome, EffectRequest, GameStatus, Settled, Settlement,
};

/// An action submitted by the player in a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionAction {
    DrawFromDeck { discard_pile: usize, keep: usize },
    TakeFromDiscard { pile: usize },
    ActivatePair {
        first: usize,
        second: usize,
        request: EffectRequest,
    },
    EndTurn,
    Declare { kind: DeclarationKind },
}

/// What an applied action did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionOutcome {
    Drew {
        kept: Card,
        discarded: Card,
        reshuffled: bool,
    },
    /// `card` is `None` when the pile was empty.
    Took { card: Option<Card> },
    PairActivated(EffectOutcome),
    TurnPassed { next: PlayerId },
    LastChanceOpened { declarer: PlayerId, next: PlayerId },
    /// The round was settled. A new round has been dealt unless
    /// `settlement.game_winner` is set.
    RoundSettled(Settlement),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalScore {
    pub player: PlayerId,
    pub participant: ParticipantId,
    pub name: String,
    pub score: u32,
}

/// How the game ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOutcome {
    pub winner: PlayerId,
    pub participant: ParticipantId,
    pub name: String,
    pub final_scores: Vec<FinalScore>,
    pub rounds_played: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    config: RulesConfig,
    rng: GameRngState,
    round: RoundState,
    target_score: u32,
    outcome: Option<GameOutcome>,
    last_settlement: Option<Settlement>,
}

impl GameSession {
    /// Seat the participants in the given order and deal the first round.
    pub fn new(participants: Vec<Participant>, config: RulesConfig) -> RulesResult<Self> {
        config.check_player_count(participants.len())?;
        for (i, p) in participants.iter().enumerate() {
            if participants[..i].iter().any(|q| q.id == p.id) {
                return Err(RulesError::DuplicateParticipant {
                    id: p.id.as_str().to_string(),
                });
            }
        }

        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let players: Vec<Player> = participants.into_iter().map(Player::new).collect();
        let deck = build_deck(&mut rng);
        let round = deal_round(players, deck)?;
        let target = config
            .target_score_override
            .unwrap_or_else(|| target_score(round.player_count()));

        info!(
            players = round.player_count(),
            target_score = target,
            seed = rng.seed(),
            "started game"
        );

        Ok(Self {
            config,
            rng: rng.state(),
            round,
            target_score: target,
            outcome: None,
            last_settlement: None,
        })
    }

    /// Continue from a round snapshot kept elsewhere.
    ///
    /// `rng` deals the rounds that follow.
    pub fn resume(config: RulesConfig, round: RoundState, rng: GameRngState) -> RulesResult<Self> {
        config.check_player_count(round.player_count())?;
        round.player(round.current_player)?;
        let target = config
            .target_score_override
            .unwrap_or_else(|| target_score(round.player_count()));

        Ok(Self {
            config,
            rng,
            round,
            target_score: target,
            outcome: None,
            last_settlement: None,
        })
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    #[must_use]
    pub fn rng_state(&self) -> &GameRngState {
        &self.rng
    }

    #[must_use]
    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Settlement of the most recently finished round.
    #[must_use]
    pub fn last_settlement(&self) -> Option<&Settlement> {
        self.last_settlement.as_ref()
    }

    /// Display summary of the current round against this session's target.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        let mut summary = status(&self.round);
        summary.target_score = self.target_score;
        summary
    }

    /// Apply one action for `seat`.
    ///
    /// Rejected actions leave the session exactly as it was.
    pub fn apply(&mut self, seat: PlayerId, action: SessionAction) -> RulesResult<ActionOutcome> {
        self.try_apply(seat, action).inspect_err(|err| {
            warn!(%seat, ?action, kind = ?err.kind(), %err, "rejected action");
        })
    }

    fn try_apply(&mut self, seat: PlayerId, action: SessionAction) -> RulesResult<ActionOutcome> {
        if self.outcome.is_some() {
            return Err(RulesError::GameOver);
        }
        self.round.ensure_turn(seat)?;

        match action {
            SessionAction::DrawFromDeck { discard_pile, keep } => {
                let drawn = draw_from_deck(&self.round, discard_pile, keep)?;
                self.round = drawn.state;
                Ok(ActionOutcome::Drew {
                    kept: drawn.kept,
                    discarded: drawn.discarded,
                    reshuffled: drawn.reshuffled,
                })
            }
            SessionAction::TakeFromDiscard { pile } => {
                let card = take_from_discard_pile(&self.round, pile)?.map(|taken| {
                    self.round = taken.state;
                    taken.card
                });
                Ok(ActionOutcome::Took { card })
            }
            SessionAction::ActivatePair {
                first,
                second,
                request,
            } => {
                let (next, outcome) = activate_pair(&self.round, first, second, request)?;
                self.round = next;
                Ok(ActionOutcome::PairActivated(outcome))
            }
            SessionAction::EndTurn => self.finish_turn(),
            SessionAction::Declare { kind } => self.handle_declaration(seat, kind),
        }
    }

    fn finish_turn(&mut self) -> RulesResult<ActionOutcome> {
        self.round.ensure_in_play()?;
        let next = end_turn(&self.round);

        match next.pending_declaration {
            Some(pending) if last_chance_complete(&next) => {
                let settled = settle_round(&next, pending.declarer)?;
                return self.finish_round(settled);
            }
            _ => {}
        }

        debug!(next = %next.current_player, "turn passed");
        self.round = next;
        Ok(ActionOutcome::TurnPassed {
            next: self.round.current_player,
        })
    }

    fn handle_declaration(&mut self, seat: PlayerId, kind: DeclarationKind) -> RulesResult<ActionOutcome> {
        if kind == DeclarationKind::Immediate || !self.config.last_chance_enabled {
            let settled = declare(&self.round, seat, kind)?;
            return self.finish_round(settled);
        }

        let next = open_last_chance(&self.round, seat)?;
        if last_chance_complete(&next) {
            // Nobody else at the table.
            let settled = settle_round(&next, seat)?;
            return self.finish_round(settled);
        }

        let following = next.current_player;
        self.round = next;
        Ok(ActionOutcome::LastChanceOpened {
            declarer: seat,
            next: following,
        })
    }

    /// Bank a settlement: end the game or deal the next round.
    fn finish_round(&mut self, settled: Settled) -> RulesResult<ActionOutcome> {
        let Settled {
            state,
            mut settlement,
        } = settled;
        settlement.target_score = self.target_score;
        settlement.game_winner = game_winner(&state.players, self.target_score);

        match settlement.game_winner {
            Some(winner) => {
                let outcome = game_outcome(&state, winner)?;
                info!(
                    %winner,
                    participant = outcome.participant.as_str(),
                    rounds = outcome.rounds_played,
                    "game over"
                );
                self.outcome = Some(outcome);
                self.round = state;
            }
            None => {
                let mut rng = GameRng::from_state(&self.rng);
                let deck = build_deck(&mut rng);
                let mut next = deal_round(state.players, deck)?;
                next.round_number = state.round_number + 1;

                debug!(round = next.round_number, "dealt next round");
                self.rng = rng.state();
                self.round = next;
            }
        }

        self.last_settlement = Some(settlement.clone());
        Ok(ActionOutcome::RoundSettled(settlement))
    }

    /// Encode the session as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a session from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Encode the session as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a session from compact binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

fn game_outcome(state: &RoundState, winner: PlayerId) -> RulesResult<GameOutcome> {
    let champion = state.player(winner)?;
    let final_scores = state
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| FinalScore {
            player: PlayerId(seat as u8),
            participant: p.id.clone(),
            name: p.name.clone(),
            score: p.cumulative_score,
        })
        .collect();

    Ok(GameOutcome {
        winner,
        participant: champion.id.clone(),
        name: champion.name.clone(),
        final_scores,
        rounds_played: state.round_number + 1,
    })
}
