//! Game configuration options.

use std::time::Duration;

use crate::card::{DECK_SIZE, FEATURE_COUNT, FEATURE_SIZE, TABLE_SIZE};
use crate::error::ConfigError;

/// Largest number of players a table can track tokens for.
pub const MAX_PLAYERS: usize = 64;

/// Configuration options for a game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use std::time::Duration;
/// use setrs::GameOptions;
///
/// let options = GameOptions::default()
///     .with_computer_players(3)
///     .with_round_duration(Duration::from_secs(30))
///     .with_penalty_freeze(Duration::from_secs(5));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of players whose input comes from [`Game::key_pressed`](crate::Game::key_pressed).
    pub human_players: usize,
    /// Number of players driven by a random input generator.
    pub computer_players: usize,
    /// Number of slots on the table.
    pub table_size: usize,
    /// Number of cards in the deck.
    pub deck_size: usize,
    /// Number of cards in a set, and values per feature.
    pub feature_size: usize,
    /// Number of features per card.
    pub feature_count: usize,
    /// Time before the table is collected and redealt.
    pub round_duration: Duration,
    /// Remaining time below which the countdown is shown as a warning.
    pub warning_threshold: Duration,
    /// Freeze after a correct claim.
    pub point_freeze: Duration,
    /// Freeze after a wrong claim.
    pub penalty_freeze: Duration,
    /// Capacity of each player's input queue.
    pub input_capacity: usize,
    /// Whether to highlight the sets on the table after every deal.
    pub hints: bool,
    /// Dealer wait while the countdown is above the warning threshold.
    pub idle_tick: Duration,
    /// Dealer wait while the countdown is in the warning zone.
    pub warning_tick: Duration,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            human_players: 0,
            computer_players: 2,
            table_size: TABLE_SIZE,
            deck_size: DECK_SIZE,
            feature_size: FEATURE_SIZE,
            feature_count: FEATURE_COUNT,
            round_duration: Duration::from_secs(60),
            warning_threshold: Duration::from_secs(5),
            point_freeze: Duration::from_secs(1),
            penalty_freeze: Duration::from_secs(3),
            input_capacity: FEATURE_SIZE,
            hints: false,
            idle_tick: Duration::from_secs(1),
            warning_tick: Duration::from_millis(10),
        }
    }
}

impl GameOptions {
    /// Returns the total number of players.
    #[must_use]
    pub const fn players(&self) -> usize {
        self.human_players + self.computer_players
    }

    /// Returns whether the player with the given id is human.
    ///
    /// Human players take the lowest ids.
    #[must_use]
    pub const fn is_human(&self, player: usize) -> bool {
        player < self.human_players
    }

    /// Checks that the options describe a playable game.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let players = self.players();
        if players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                count: players,
                max: MAX_PLAYERS,
            });
        }
        if self.feature_size < 2 {
            return Err(ConfigError::FeatureSizeTooSmall(self.feature_size));
        }
        if self.table_size < self.feature_size {
            return Err(ConfigError::TableTooSmall {
                table_size: self.table_size,
                feature_size: self.feature_size,
            });
        }

        let max = u32::try_from(self.feature_count)
            .ok()
            .and_then(|count| self.feature_size.checked_pow(count))
            .unwrap_or(usize::MAX)
            .min(usize::from(u16::MAX));
        if self.deck_size > max {
            return Err(ConfigError::DeckTooLarge {
                deck_size: self.deck_size,
                max,
            });
        }
        if self.round_duration.is_zero() {
            return Err(ConfigError::ZeroRoundDuration);
        }
        if self.input_capacity == 0 {
            return Err(ConfigError::ZeroInputCapacity);
        }
        if self.idle_tick.is_zero() || self.warning_tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }

        Ok(())
    }

    /// Sets the number of human players.
    #[must_use]
    pub const fn with_human_players(mut self, count: usize) -> Self {
        self.human_players = count;
        self
    }

    /// Sets the number of computer players.
    ///
    /// # Example
    ///
    /// ```
    /// use setrs::GameOptions;
    ///
    /// let options = GameOptions::default().with_computer_players(4);
    /// assert_eq!(options.computer_players, 4);
    /// ```
    #[must_use]
    pub const fn with_computer_players(mut self, count: usize) -> Self {
        self.computer_players = count;
        self
    }

    /// Sets the number of table slots.
    #[must_use]
    pub const fn with_table_size(mut self, slots: usize) -> Self {
        self.table_size = slots;
        self
    }

    /// Sets the number of cards in the deck.
    #[must_use]
    pub const fn with_deck_size(mut self, cards: usize) -> Self {
        self.deck_size = cards;
        self
    }

    /// Sets the number of cards per set.
    #[must_use]
    pub const fn with_feature_size(mut self, size: usize) -> Self {
        self.feature_size = size;
        self
    }

    /// Sets the number of features per card.
    #[must_use]
    pub const fn with_feature_count(mut self, count: usize) -> Self {
        self.feature_count = count;
        self
    }

    /// Sets the round duration.
    #[must_use]
    pub const fn with_round_duration(mut self, duration: Duration) -> Self {
        self.round_duration = duration;
        self
    }

    /// Sets the countdown warning threshold.
    #[must_use]
    pub const fn with_warning_threshold(mut self, threshold: Duration) -> Self {
        self.warning_threshold = threshold;
        self
    }

    /// Sets the freeze applied after a point.
    #[must_use]
    pub const fn with_point_freeze(mut self, duration: Duration) -> Self {
        self.point_freeze = duration;
        self
    }

    /// Sets the freeze applied after a penalty.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use setrs::GameOptions;
    ///
    /// let options = GameOptions::default().with_penalty_freeze(Duration::ZERO);
    /// assert!(options.penalty_freeze.is_zero());
    /// ```
    #[must_use]
    pub const fn with_penalty_freeze(mut self, duration: Duration) -> Self {
        self.penalty_freeze = duration;
        self
    }

    /// Sets the capacity of each player's input queue.
    #[must_use]
    pub const fn with_input_capacity(mut self, capacity: usize) -> Self {
        self.input_capacity = capacity;
        self
    }

    /// Sets whether sets on the table are highlighted after every deal.
    #[must_use]
    pub const fn with_hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }

    /// Sets the dealer's wait intervals outside and inside the warning zone.
    #[must_use]
    pub const fn with_ticks(mut self, idle: Duration, warning: Duration) -> Self {
        self.idle_tick = idle;
        self.warning_tick = warning;
        self
    }
}
