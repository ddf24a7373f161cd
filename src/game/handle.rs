//! Running a game on its own threads.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::GameError;
use crate::result::GameReport;
use crate::table::PlayerId;

use super::Game;

/// A game running on a dealer thread and one thread per player.
pub struct GameHandle {
    game: Arc<Game>,
    dealer: JoinHandle<GameReport>,
}

impl Game {
    /// Starts the dealer thread, which in turn starts every player.
    ///
    /// # Errors
    ///
    /// Returns an error if the dealer thread cannot be spawned.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use setrs::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default(), 7).unwrap();
    /// let handle = Arc::new(game).start().unwrap();
    /// handle.terminate();
    /// let report = handle.join().unwrap();
    /// println!("winners: {:?}", report.winners);
    /// ```
    pub fn start(self: Arc<Self>) -> Result<GameHandle, GameError> {
        let game = Arc::clone(&self);
        let dealer = thread::Builder::new()
            .name("dealer".into())
            .spawn(move || game.run_dealer())?;

        Ok(GameHandle { game: self, dealer })
    }
}

impl GameHandle {
    /// Returns the running game.
    #[must_use]
    pub const fn game(&self) -> &Arc<Game> {
        &self.game
    }

    /// Forwards a key press to a player. See [`Game::key_pressed`].
    pub fn key_pressed(&self, player: PlayerId, slot: usize) -> bool {
        self.game.key_pressed(player, slot)
    }

    /// Requests termination. The dealer still announces the winners.
    pub fn terminate(&self) {
        self.game.terminate();
    }

    /// Returns whether the dealer has finished.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.dealer.is_finished()
    }

    /// Waits for the game to end and returns the final standings.
    ///
    /// # Errors
    ///
    /// Returns an error if the dealer thread panicked.
    pub fn join(self) -> Result<GameReport, GameError> {
        self.dealer.join().map_err(|_| GameError::DealerPanicked)
    }
}
