//! Rules constants and session configuration.
//!
//! The round rules themselves are fixed (hand size, deck make-up,
//! declaration threshold). `RulesConfig` covers the knobs the hosting
//! layer chooses when it opens a table.

use serde::{Deserialize, Serialize};

use super::error::{RulesError, RulesResult};

/// Cards dealt to each player at the start of a round.
pub const HAND_SIZE: usize = 5;

/// Copies of each catalog entry in a fresh deck.
pub const COPIES_PER_KIND: usize = 8;

/// Total cards in play for the lifetime of a round.
pub const DECK_SIZE: usize = COPIES_PER_KIND * 8;

/// Minimum hand value required to declare.
pub const DECLARE_THRESHOLD: u32 = 7;

/// Number of discard piles on the table.
pub const DISCARD_PILE_COUNT: usize = 2;

/// Configuration for a game session.
///
/// ```
/// use seasalt::core::RulesConfig;
///
/// let config = RulesConfig::default()
///     .with_seed(7)
///     .with_target_score(20);
///
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.target_score_override, Some(20));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Fewest players allowed at the table.
    pub min_players: usize,

    /// Most players allowed at the table.
    pub max_players: usize,

    /// Replaces the player-count target table when set.
    pub target_score_override: Option<u32>,

    /// When false, last-chance declarations settle immediately.
    pub last_chance_enabled: bool,

    /// Seed for dealing. `None` draws one from the operating system.
    pub seed: Option<u64>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 8,
            target_score_override: None,
            last_chance_enabled: true,
            seed: None,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score_override = Some(target);
        self
    }

    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    #[must_use]
    pub fn without_last_chance(mut self) -> Self {
        self.last_chance_enabled = false;
        self
    }

    /// Reject player counts outside the configured range.
    ///
    /// The upper bound is also capped by how many full hands the deck can
    /// deal while leaving two cards to draw.
    pub fn check_player_count(&self, count: usize) -> RulesResult<()> {
        let deck_cap = (DECK_SIZE - 2) / HAND_SIZE;
        let max = self.max_players.min(deck_cap);
        let min = self.min_players.max(1);

        if count < min || count > max {
            return Err(RulesError::PlayerCount { count, min, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(config.min_players, 2);
        assert_eq!(config.max_players, 8);
        assert!(config.last_chance_enabled);
        assert_eq!(config.seed, None);
        assert_eq!(DECK_SIZE, 64);
    }

    #[test]
    fn test_player_count_bounds() {
        let config = RulesConfig::default();
        assert!(config.check_player_count(1).is_err());
        assert!(config.check_player_count(2).is_ok());
        assert!(config.check_player_count(8).is_ok());
        assert_eq!(
            config.check_player_count(9),
            Err(RulesError::PlayerCount { count: 9, min: 2, max: 8 })
        );
    }

    #[test]
    fn test_deck_caps_player_count() {
        let config = RulesConfig::default().with_player_range(2, 50);
        assert!(config.check_player_count(12).is_ok());
        assert!(config.check_player_count(13).is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: RulesConfig =
            serde_json::from_str(r#"{"seed": 3, "last_chance_enabled": false}"#).unwrap();
        assert_eq!(config.seed, Some(3));
        assert!(!config.last_chance_enabled);
        assert_eq!(config.max_players, 8);
    }
}
