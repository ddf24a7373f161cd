//! Sinks for everything a display would show.

use std::time::Duration;

use log::{debug, info};

use crate::card::Card;
use crate::table::PlayerId;

/// Receives score, freeze, countdown, and table updates.
///
/// Called from the dealer and player threads; implementations must not block
/// for long.
pub trait Reporter: Send + Sync {
    /// A player's score changed.
    fn set_score(&self, player: PlayerId, score: u32);

    /// A player's freeze countdown changed; zero means the player can act again.
    fn set_freeze(&self, player: PlayerId, remaining: Duration);

    /// The round countdown changed.
    fn set_countdown(&self, remaining: Duration, warning: bool);

    /// The game ended with these winners.
    fn announce_winners(&self, winners: &[PlayerId]);

    /// The sets currently on the table, as slot groups.
    fn highlight_hints(&self, _sets: &[Vec<usize>]) {}

    /// A card was dealt into a slot.
    fn card_placed(&self, _card: Card, _slot: usize) {}

    /// A slot was emptied.
    fn card_removed(&self, _slot: usize) {}

    /// A player placed a token.
    fn token_placed(&self, _player: PlayerId, _slot: usize) {}

    /// A player's token was taken off a slot.
    fn token_removed(&self, _player: PlayerId, _slot: usize) {}
}

/// Discards every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn set_score(&self, _player: PlayerId, _score: u32) {}

    fn set_freeze(&self, _player: PlayerId, _remaining: Duration) {}

    fn set_countdown(&self, _remaining: Duration, _warning: bool) {}

    fn announce_winners(&self, _winners: &[PlayerId]) {}
}

/// Writes every update to the `log` facade.
///
/// Scores and results go out at `info`, the chattier updates at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn set_score(&self, player: PlayerId, score: u32) {
        info!("player {player} scored, now {score}");
    }

    fn set_freeze(&self, player: PlayerId, remaining: Duration) {
        debug!("player {player} frozen for {}ms", remaining.as_millis());
    }

    fn set_countdown(&self, remaining: Duration, warning: bool) {
        if warning {
            debug!("{}ms left in round", remaining.as_millis());
        } else {
            debug!("{}s left in round", remaining.as_secs());
        }
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        info!("winners: {winners:?}");
    }

    fn highlight_hints(&self, sets: &[Vec<usize>]) {
        for set in sets {
            info!("hint: slots {set:?}");
        }
    }

    fn card_placed(&self, card: Card, slot: usize) {
        debug!("card {} placed in slot {slot}", card.id());
    }

    fn card_removed(&self, slot: usize) {
        debug!("slot {slot} cleared");
    }

    fn token_placed(&self, player: PlayerId, slot: usize) {
        debug!("player {player} placed a token on slot {slot}");
    }

    fn token_removed(&self, player: PlayerId, slot: usize) {
        debug!("player {player} token removed from slot {slot}");
    }
}
