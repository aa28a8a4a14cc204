//! Game rules over a `RoundState`.
//!
//! - `pairing`: which two cards form a pair
//! - `scoring`: hand scores and declaration resolution
//! - `round`: deal, draw, take, turn order, declaration and settlement
//! - `effects`: carrying out the ability of a played pair
//! - `validator`: structural checks over a snapshot
//! - `status`: read-only summaries for display
//!
//! Nothing here holds state between calls: each operation takes the
//! snapshot it works on and returns the next one.

pub mod effects;
pub mod pairing;
pub mod round;
pub mod scoring;
pub mod status;
pub mod validator;

pub use effects::{activate_pair, steal_card, EffectOutcome, EffectRequest};
pub use pairing::{
    check_pair, find_valid_pairs, is_valid_pair, is_valid_pair_opt, kinds_pair,
    validate_pair_selection, PairIndices, ValidPairs,
};
pub use round::{
    advance_turn, deal_round, declare, draw_from_deck, end_turn, game_winner,
    last_chance_complete, open_last_chance, settle_round, take_from_discard_pile, target_score,
    Drawn, PlayerSettlement, Settled, Settlement, Taken,
};
pub use scoring::{
    calculate_hand_score, can_declare, color_bonus, determine_declaration_winner, hand_value,
    DeclarationResult, HandScore,
};
pub use status::{status, GameStatus, PileStatus, PlayerStatus};
pub use validator::{check_conservation, validate, validate_value, ValidationReport};
