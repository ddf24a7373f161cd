use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded, select};
use log::{debug, error, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::TableError;
use crate::sync::Mutex;
use crate::table::{PlayerId, Toggle};

use super::state::Claim;
use super::{Game, Verdict};

/// Length of one freeze countdown tick.
const FREEZE_TICK: Duration = Duration::from_secs(1);

/// How long the input generator backs off after an intent was dropped.
const GENERATOR_IDLE: Duration = Duration::from_millis(10);

/// Per-player state shared between the player's actor, its input producers,
/// and the dealer.
pub(super) struct Player {
    id: PlayerId,
    human: bool,
    score: AtomicU32,
    frozen: AtomicBool,
    stopped: AtomicBool,
    input_tx: Sender<usize>,
    input_rx: Receiver<usize>,
    /// Never sent on. Dropping the sender wakes every wait selecting on the receiver.
    shutdown_tx: Mutex<Option<Sender<()>>>,
    shutdown_rx: Receiver<()>,
}

impl Player {
    pub(super) fn new(id: PlayerId, human: bool, input_capacity: usize) -> Self {
        let (input_tx, input_rx) = bounded(input_capacity);
        let (shutdown_tx, shutdown_rx) = bounded(0);
        Self {
            id,
            human,
            score: AtomicU32::new(0),
            frozen: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            input_tx,
            input_rx,
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
            shutdown_rx,
        }
    }

    pub(super) fn score(&self) -> u32 {
        self.score.load(Ordering::SeqCst)
    }

    pub(super) fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::SeqCst)
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub(super) fn terminate(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.shutdown_tx.lock().take();
    }

    /// Queues a slot selection, blocking while the queue is full.
    ///
    /// Returns `false` if the player stopped before there was room.
    fn push_intent(&self, slot: usize) -> bool {
        if self.is_stopped() {
            return false;
        }
        select! {
            send(self.input_tx, slot) -> sent => sent.is_ok(),
            recv(self.shutdown_rx) -> _ => false,
        }
    }

    /// Sleeps for `duration` unless the player is stopped first.
    ///
    /// Returns `false` if the sleep was cut short.
    fn sleep(&self, duration: Duration) -> bool {
        matches!(
            self.shutdown_rx.recv_timeout(duration),
            Err(RecvTimeoutError::Timeout)
        )
    }
}

impl Game {
    /// Forwards a key press to a player's input queue.
    ///
    /// The press is dropped if the player is frozen or stopped, the table is
    /// paused, or the slot is empty. Otherwise this blocks while the queue is
    /// full. Returns whether the press was queued.
    pub fn key_pressed(&self, player: PlayerId, slot: usize) -> bool {
        let Some(actor) = self.players.get(player) else {
            return false;
        };
        if actor.is_frozen()
            || actor.is_stopped()
            || self.is_paused()
            || self.table.card_at(slot).is_none()
        {
            return false;
        }

        actor.push_intent(slot)
    }

    /// Applies a player's selection of a slot to the table.
    ///
    /// Ignored while the table is paused. Otherwise the player's token on the
    /// slot is toggled, as long as the slot holds a card and the player has a
    /// token left to place.
    ///
    /// # Errors
    ///
    /// Returns an error if the player or slot is out of range.
    pub fn select_slot(&self, player: PlayerId, slot: usize) -> Result<Toggle, TableError> {
        let paused = self.paused.read();
        if *paused {
            return Ok(Toggle::Ignored);
        }
        let toggle = self.table.toggle_token(player, slot)?;
        drop(paused);

        match toggle {
            Toggle::Placed(_) => self.reporter.token_placed(player, slot),
            Toggle::Removed(_) => self.reporter.token_removed(player, slot),
            Toggle::Ignored => {}
        }
        Ok(toggle)
    }

    /// Queues a player's claim that its tokens mark a set.
    ///
    /// Returns the channel the verdict will arrive on, or `None` if the table
    /// is paused or the game is terminating. A dropped channel means the same
    /// as [`Verdict::Withdrawn`].
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the player already has a claim queued.
    pub fn submit_claim(&self, player: PlayerId) -> Option<Receiver<Verdict>> {
        let mut claims = self.claims.lock();
        if player >= self.players.len() || self.is_paused() || self.is_terminated() {
            return None;
        }
        debug_assert!(
            claims.iter().all(|claim| claim.player != player),
            "player {player} queued twice"
        );

        let (verdict_tx, verdict_rx) = bounded(1);
        claims.push_back(Claim::new(player, verdict_tx));
        self.claim_signal.notify_all();
        debug!("player {player} claims a set");
        Some(verdict_rx)
    }

    /// Awards a point, then freezes the player for the point freeze.
    pub fn award_point(&self, player: PlayerId) {
        let Some(actor) = self.players.get(player) else {
            return;
        };
        let score = actor.score.fetch_add(1, Ordering::SeqCst) + 1;
        self.reporter.set_score(player, score);
        self.freeze(actor, self.options.point_freeze);
    }

    /// Freezes the player for the penalty freeze.
    pub fn apply_penalty(&self, player: PlayerId) {
        if let Some(actor) = self.players.get(player) {
            self.freeze(actor, self.options.penalty_freeze);
        }
    }

    /// Counts a freeze down in one-second ticks. Cut short by termination.
    fn freeze(&self, actor: &Player, duration: Duration) {
        actor.frozen.store(true, Ordering::SeqCst);

        let mut remaining = duration;
        while !remaining.is_zero() {
            self.reporter.set_freeze(actor.id, remaining);
            let tick = remaining.min(FREEZE_TICK);
            if !actor.sleep(tick) {
                break;
            }
            remaining -= tick;
        }

        self.reporter.set_freeze(actor.id, Duration::ZERO);
        actor.frozen.store(false, Ordering::SeqCst);
    }

    pub(super) fn spawn_player(self: &Arc<Self>, id: PlayerId) -> std::io::Result<JoinHandle<()>> {
        let game = Arc::clone(self);
        thread::Builder::new()
            .name(format!("player-{id}"))
            .spawn(move || game.run_player(id))
    }

    fn run_player(self: &Arc<Self>, id: PlayerId) {
        info!("thread player-{id} starting");
        let actor = &self.players[id];

        let generator = if actor.human {
            None
        } else {
            let game = Arc::clone(self);
            thread::Builder::new()
                .name(format!("computer-{id}"))
                .spawn(move || game.run_generator(id))
                .inspect_err(|err| error!("failed to start input generator {id}: {err}"))
                .ok()
        };

        while !actor.is_stopped() {
            select! {
                recv(actor.input_rx) -> intent => match intent {
                    Ok(slot) => self.handle_intent(id, slot),
                    Err(_) => break,
                },
                recv(actor.shutdown_rx) -> _ => break,
            }
        }

        if let Some(generator) = generator {
            if generator.join().is_err() {
                error!("input generator {id} panicked");
            }
        }
        info!("thread player-{id} terminated");
    }

    fn handle_intent(&self, player: PlayerId, slot: usize) {
        match self.select_slot(player, slot) {
            Ok(Toggle::Placed(count)) if count == self.options.feature_size => {
                self.await_verdict(player);
            }
            Ok(_) => {}
            Err(err) => warn!("player {player} selected slot {slot}: {err}"),
        }
    }

    /// Claims a set and blocks until the dealer answers or the game stops.
    fn await_verdict(&self, player: PlayerId) {
        let Some(verdicts) = self.submit_claim(player) else {
            debug!("table paused, claim of player {player} not queued");
            return;
        };
        let actor = &self.players[player];

        select! {
            recv(verdicts) -> verdict => match verdict.unwrap_or(Verdict::Withdrawn) {
                Verdict::Valid => self.award_point(player),
                Verdict::Invalid => self.apply_penalty(player),
                Verdict::Withdrawn => debug!("player {player} released without a verdict"),
            },
            recv(actor.shutdown_rx) -> _ => {}
        }
    }

    /// Presses random slots as fast as the input queue takes them.
    fn run_generator(&self, id: PlayerId) {
        info!("thread computer-{id} starting");
        let actor = &self.players[id];
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(id as u64 + 1));

        while !actor.is_stopped() {
            let slot = rng.random_range(0..self.table.size());
            if !self.key_pressed(id, slot) && !actor.sleep(GENERATOR_IDLE) {
                break;
            }
        }
        info!("thread computer-{id} terminated");
    }
}
