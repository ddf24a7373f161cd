//! Error types for game operations.

use thiserror::Error;

/// Errors found while validating [`GameOptions`](crate::GameOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No human or computer players were configured.
    #[error("the game needs at least one player")]
    NoPlayers,
    /// More players than the table can track tokens for.
    #[error("too many players: {count} (at most {max})")]
    TooManyPlayers {
        /// Configured player count.
        count: usize,
        /// Largest supported player count.
        max: usize,
    },
    /// A set must contain at least two cards.
    #[error("feature size must be at least 2, got {0}")]
    FeatureSizeTooSmall(usize),
    /// The table cannot hold a single set.
    #[error("table of {table_size} slots cannot hold a set of {feature_size} cards")]
    TableTooSmall {
        /// Configured slot count.
        table_size: usize,
        /// Configured set size.
        feature_size: usize,
    },
    /// The deck has more cards than distinct feature combinations exist.
    #[error("deck of {deck_size} cards exceeds the {max} distinct cards available")]
    DeckTooLarge {
        /// Configured deck size.
        deck_size: usize,
        /// Number of distinct cards for the configured features.
        max: usize,
    },
    /// Rounds must last some time.
    #[error("round duration is zero")]
    ZeroRoundDuration,
    /// Input queues need room for at least one intent.
    #[error("input capacity is zero")]
    ZeroInputCapacity,
    /// The dealer would spin without waiting between countdown updates.
    #[error("dealer tick is zero")]
    ZeroTick,
}

/// Errors returned by [`Table`](crate::Table) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// Slot index is outside the table.
    #[error("slot {0} is out of range")]
    SlotOutOfRange(usize),
    /// Player id is outside the table's player range.
    #[error("player {0} is out of range")]
    PlayerOutOfRange(usize),
    /// The slot already holds a card.
    #[error("slot {0} is occupied")]
    SlotOccupied(usize),
    /// The slot holds no card.
    #[error("slot {0} is empty")]
    SlotEmpty(usize),
    /// The card already lies in another slot.
    #[error("card is already on the table in slot {0}")]
    CardOnTable(usize),
    /// The player already has a token on the slot.
    #[error("player already has a token on slot {0}")]
    TokenExists(usize),
    /// The player has placed every token it owns.
    #[error("player has no tokens left")]
    TokensExhausted,
}

/// Errors that can occur while running a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// The options were rejected.
    #[error("invalid options: {0}")]
    Config(#[from] ConfigError),
    /// An actor thread could not be spawned.
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// The dealer thread panicked before reporting the winners.
    #[error("dealer thread panicked")]
    DealerPanicked,
}
