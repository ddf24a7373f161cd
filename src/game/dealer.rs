use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use rand::seq::SliceRandom;

use crate::card::Card;
use crate::result::GameReport;

use super::{DealerPhase, Game, Judgement, Verdict};

impl Game {
    /// Runs the dealer until the game ends or is terminated.
    ///
    /// Starts every player actor, cycles through rounds while a set can still
    /// be formed, then announces the winners and stops the players in reverse
    /// id order.
    pub(super) fn run_dealer(self: &Arc<Self>) -> GameReport {
        info!("thread dealer starting");

        let mut actors = Vec::with_capacity(self.players.len());
        for id in 0..self.players.len() {
            match self.spawn_player(id) {
                Ok(handle) => actors.push(handle),
                Err(err) => {
                    error!("failed to start player {id}: {err}");
                    self.terminate();
                    break;
                }
            }
        }

        while !self.should_finish() {
            self.deal();
            self.run_round();
            self.collect_table();
        }

        self.set_phase(DealerPhase::Ended);
        let report = self.announce_winners();
        self.terminate();
        for handle in actors.into_iter().rev() {
            if handle.join().is_err() {
                error!("player thread panicked");
            }
        }

        info!("thread dealer terminated");
        report
    }

    fn should_finish(&self) -> bool {
        self.is_terminated() || !self.any_set_left()
    }

    /// Returns whether a set can still be formed from the deck and the table together.
    pub fn any_set_left(&self) -> bool {
        let mut cards = self.deck.lock().clone();
        cards.extend(self.table.cards());
        self.oracle.has_set(&cards)
    }

    /// Fills every empty slot from the deck and restarts the countdown.
    ///
    /// Player input is paused while cards go down. Returns the number of cards dealt.
    pub fn deal(&self) -> usize {
        self.set_phase(DealerPhase::Dealing);
        self.pause();
        let dealt = self.fill_table();
        self.update_countdown(true);
        self.resume();

        if self.options.hints {
            self.show_hints();
        }
        debug!("dealt {dealt} cards, {} left in deck", self.cards_remaining());
        dealt
    }

    /// Deals into empty slots in random order, reshuffling the deck first.
    fn fill_table(&self) -> usize {
        let mut slots = self.table.empty_slots();
        if slots.is_empty() {
            return 0;
        }

        let mut deck = self.deck.lock();
        let mut rng = self.rng.lock();
        slots.shuffle(&mut *rng);
        deck.shuffle(&mut *rng);
        drop(rng);

        let mut dealt = 0;
        for slot in slots {
            let Some(card) = deck.pop() else {
                break;
            };
            match self.table.place_card(card, slot) {
                Ok(()) => {
                    dealt += 1;
                    self.reporter.card_placed(card, slot);
                }
                Err(err) => {
                    warn!("could not deal card {} into slot {slot}: {err}", card.id());
                    deck.push(card);
                }
            }
        }
        dealt
    }

    /// Returns every card on the table to the deck.
    ///
    /// Claims still waiting are released without a verdict. Returns the number
    /// of cards collected.
    pub fn collect_table(&self) -> usize {
        self.set_phase(DealerPhase::Reshuffling);
        self.pause();
        self.release_claims();

        let mut slots: Vec<usize> = (0..self.table.size()).collect();
        slots.shuffle(&mut *self.rng.lock());

        let mut deck = self.deck.lock();
        let mut collected = 0;
        for slot in slots {
            let Ok(removed) = self.table.remove_card(slot) else {
                continue;
            };
            for &holder in &removed.holders {
                self.reporter.token_removed(holder, slot);
            }
            self.reporter.card_removed(slot);
            deck.push(removed.card);
            collected += 1;
        }
        drop(deck);

        self.resume();
        debug!("collected {collected} cards from the table");
        collected
    }

    fn release_claims(&self) {
        let mut claims = self.claims.lock();
        for claim in claims.drain(..) {
            debug!("round over, releasing player {}", claim.player);
            claim.deliver(Verdict::Withdrawn);
        }
    }

    /// Counts down until the deadline, judging claims as they arrive.
    fn run_round(&self) {
        self.set_phase(DealerPhase::Running);
        while !self.is_terminated() && !self.remaining().is_zero() {
            self.wait_for_claim();
            self.update_countdown(false);

            let Some(judgement) = self.judge_next() else {
                continue;
            };
            if judgement.verdict == Verdict::Valid && !self.any_set_left() {
                info!("no sets left, ending round early");
                break;
            }
        }
    }

    /// Sleeps one tick, or less if a claim arrives or the game terminates.
    fn wait_for_claim(&self) {
        let remaining = self.remaining();
        if remaining.is_zero() {
            return;
        }

        let tick = if remaining > self.options.warning_threshold {
            self.options.idle_tick
        } else {
            self.options.warning_tick
        };

        let claims = self.claims.lock();
        let _claims =
            self.claim_signal
                .wait_timeout_while(claims, tick.min(remaining), |claims| {
                    claims.is_empty() && !self.is_terminated()
                });
    }

    /// Reports the time left in the round, restarting the round first if `reset`.
    ///
    /// Returns the time left.
    pub fn update_countdown(&self, reset: bool) -> Duration {
        let now = Instant::now();
        let mut deadline = self.deadline.lock();
        if reset {
            *deadline = now + self.options.round_duration;
        }
        let remaining = deadline.saturating_duration_since(now);
        drop(deadline);

        let warning = !reset && remaining <= self.options.warning_threshold;
        self.reporter.set_countdown(remaining, warning);
        remaining
    }

    /// Judges the oldest pending claim.
    ///
    /// A valid claim takes the claimed cards off the table along with every
    /// token on them, releases any other queued player that held one of those
    /// tokens, deals replacements, and restarts the countdown. A claim whose
    /// tokens no longer cover a full set of cards is withdrawn.
    ///
    /// Returns `None` if no claim is pending.
    pub fn judge_next(&self) -> Option<Judgement> {
        let claim = self.claims.lock().pop_front()?;
        let player = claim.player;
        let slots = self.table.tokens_of(player);
        let cards: Vec<Card> = slots
            .iter()
            .filter_map(|&slot| self.table.card_at(slot))
            .collect();

        let verdict = if slots.len() != self.options.feature_size || cards.len() != slots.len() {
            debug!("claim of player {player} went stale");
            Verdict::Withdrawn
        } else if self.oracle.is_set(&cards) {
            info!("player {player} found a set on slots {slots:?}");
            Verdict::Valid
        } else {
            debug!("player {player} claimed a non-set on slots {slots:?}");
            Verdict::Invalid
        };
        claim.deliver(verdict);

        if verdict == Verdict::Valid {
            self.pause();
            self.remove_cards(&slots);
            self.fill_table();
            self.update_countdown(true);
            self.resume();
        }

        Some(Judgement {
            player,
            verdict,
            slots,
        })
    }

    /// Takes cards off the table, purging their tokens.
    ///
    /// The claim queue stays locked throughout, so no queued player can be
    /// judged against a card that is gone.
    fn remove_cards(&self, slots: &[usize]) {
        let mut claims = self.claims.lock();
        for &slot in slots {
            let removed = match self.table.remove_card(slot) {
                Ok(removed) => removed,
                Err(err) => {
                    warn!("could not remove matched card: {err}");
                    continue;
                }
            };
            self.reporter.card_removed(slot);

            for holder in removed.holders {
                self.reporter.token_removed(holder, slot);
                if let Some(index) = claims.iter().position(|claim| claim.player == holder) {
                    if let Some(claim) = claims.remove(index) {
                        debug!("player {holder} lost a claimed card, releasing");
                        claim.deliver(Verdict::Withdrawn);
                    }
                }
            }
        }
    }

    fn show_hints(&self) {
        let cards = self.table.cards();
        let sets: Vec<Vec<usize>> = self
            .oracle
            .find_sets(&cards, usize::MAX)
            .iter()
            .map(|set| {
                set.iter()
                    .filter_map(|&card| self.table.slot_of(card))
                    .collect()
            })
            .collect();
        self.reporter.highlight_hints(&sets);
    }

    /// Reports every player holding the highest score.
    pub fn announce_winners(&self) -> GameReport {
        let report = GameReport::from_scores(self.scores());
        info!(
            "game over, scores {:?}, winners {:?}",
            report.scores, report.winners
        );
        self.reporter.announce_winners(&report.winners);
        report
    }
}
