//! Game engine: the dealer, the players, and the state they share.
//!
//! Locks are always taken in this order: claim queue, pause gate, deck, rng,
//! table slots (ascending), card index. No path holds two of them in any
//! other order.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::sync::{Condvar, Mutex, RwLock};

use crate::card::{Card, full_deck};
use crate::error::ConfigError;
use crate::options::GameOptions;
use crate::oracle::{FeatureOracle, Oracle};
use crate::reporter::{LogReporter, Reporter};
use crate::table::{PlayerId, Table};

mod dealer;
mod handle;
mod player;
pub mod state;

pub use handle::GameHandle;
use player::Player;
use state::Claim;
pub use state::{DealerPhase, Judgement, Verdict};

/// A game of Set shared between one dealer and any number of players.
///
/// Every method takes `&self`; the game is meant to live in an [`Arc`] and be
/// driven by the threads [`Game::start`] spawns. The same methods can be
/// called directly to step through a game without threads.
pub struct Game {
    /// Game options.
    pub options: GameOptions,
    /// The shared table.
    pub table: Table,
    /// Cards not on the table. Only the dealer draws from it.
    pub deck: Mutex<Vec<Card>>,
    oracle: Box<dyn Oracle>,
    reporter: Arc<dyn Reporter>,
    players: Vec<Player>,
    /// Players waiting for a verdict, in arrival order.
    claims: Mutex<VecDeque<Claim>>,
    /// Signalled when a claim arrives or the game terminates.
    claim_signal: Condvar,
    /// True while the dealer rebuilds the table.
    paused: RwLock<bool>,
    terminated: AtomicBool,
    phase: Mutex<DealerPhase>,
    /// When the current round ends.
    deadline: Mutex<Instant>,
    rng: Mutex<ChaCha8Rng>,
    seed: u64,
}

impl Game {
    /// Creates a new game with the given seed.
    ///
    /// The deck starts full and shuffled; the table starts empty. Sets are
    /// judged by a [`FeatureOracle`] and updates go to a [`LogReporter`]
    /// unless replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail validation.
    ///
    /// # Example
    ///
    /// ```
    /// use setrs::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default(), 42).unwrap();
    /// assert_eq!(game.cards_remaining(), 81);
    /// ```
    pub fn new(options: GameOptions, seed: u64) -> Result<Self, ConfigError> {
        options.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut deck = full_deck(options.deck_size);
        deck.shuffle(&mut rng);

        let players = (0..options.players())
            .map(|id| Player::new(id, options.is_human(id), options.input_capacity))
            .collect();

        Ok(Self {
            table: Table::new(
                options.table_size,
                options.deck_size,
                options.players(),
                options.feature_size,
            ),
            deck: Mutex::new(deck),
            oracle: Box::new(FeatureOracle::new(
                options.feature_size,
                options.feature_count,
            )),
            reporter: Arc::new(LogReporter),
            players,
            claims: Mutex::new(VecDeque::new()),
            claim_signal: Condvar::new(),
            paused: RwLock::new(false),
            terminated: AtomicBool::new(false),
            phase: Mutex::new(DealerPhase::Dealing),
            deadline: Mutex::new(Instant::now() + options.round_duration),
            rng: Mutex::new(rng),
            seed,
            options,
        })
    }

    /// Replaces the set rule.
    #[must_use]
    pub fn with_oracle(mut self, oracle: impl Oracle + 'static) -> Self {
        self.oracle = Box::new(oracle);
        self
    }

    /// Replaces the update sink.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Returns the number of players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns the number of cards left in the deck.
    pub fn cards_remaining(&self) -> usize {
        self.deck.lock().len()
    }

    /// Returns a player's score.
    pub fn score(&self, player: PlayerId) -> Option<u32> {
        self.players.get(player).map(Player::score)
    }

    /// Returns every player's score, indexed by player id.
    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(Player::score).collect()
    }

    /// Returns whether a player is serving a point or penalty freeze.
    pub fn is_frozen(&self, player: PlayerId) -> bool {
        self.players.get(player).is_some_and(Player::is_frozen)
    }

    /// Returns whether player input is paused while the dealer rebuilds the table.
    pub fn is_paused(&self) -> bool {
        *self.paused.read()
    }

    /// Returns whether termination was requested.
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    /// Returns the dealer's current phase.
    pub fn phase(&self) -> DealerPhase {
        *self.phase.lock()
    }

    /// Returns the time left before the table is collected.
    pub fn remaining(&self) -> Duration {
        self.deadline
            .lock()
            .saturating_duration_since(Instant::now())
    }

    /// Returns the players waiting for a verdict, in the order they will be judged.
    pub fn pending_claims(&self) -> Vec<PlayerId> {
        self.claims.lock().iter().map(|claim| claim.player).collect()
    }

    /// Requests termination.
    ///
    /// Every player is stopped, highest id first, and every blocked wait is
    /// woken. Queued claims are dropped, which releases their players.
    pub fn terminate(&self) {
        self.terminated.store(true, Ordering::SeqCst);
        for player in self.players.iter().rev() {
            player.terminate();
        }

        let mut claims = self.claims.lock();
        claims.clear();
        self.claim_signal.notify_all();
    }

    fn set_phase(&self, phase: DealerPhase) {
        *self.phase.lock() = phase;
    }

    fn pause(&self) {
        *self.paused.write() = true;
    }

    fn resume(&self) {
        *self.paused.write() = false;
    }
}
