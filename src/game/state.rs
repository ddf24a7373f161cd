//! Dealer phases and claim verdicts.

use crossbeam_channel::Sender;

use crate::table::PlayerId;

/// Dealer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerPhase {
    /// Filling empty slots from the deck; player input is paused.
    Dealing,
    /// Counting down and judging claims.
    Running,
    /// Collecting every card back into the deck; player input is paused.
    Reshuffling,
    /// Winners announced, actors stopped.
    Ended,
}

/// The dealer's answer to a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The claimed cards form a set; the player scores.
    Valid,
    /// The claimed cards do not form a set; the player is penalized.
    Invalid,
    /// The claim was dropped without judgment, because one of the claimed
    /// cards left the table or the round ended.
    Withdrawn,
}

/// A judged claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    /// The claiming player.
    pub player: PlayerId,
    /// The verdict delivered to the player.
    pub verdict: Verdict,
    /// The slots the player had tokens on when judged.
    pub slots: Vec<usize>,
}

/// A queued claim: the player and the one-shot channel its verdict goes to.
pub(crate) struct Claim {
    pub(crate) player: PlayerId,
    verdict: Sender<Verdict>,
}

impl Claim {
    pub(crate) const fn new(player: PlayerId, verdict: Sender<Verdict>) -> Self {
        Self { player, verdict }
    }

    /// Hands the verdict over. A player that stopped waiting is ignored.
    pub(crate) fn deliver(self, verdict: Verdict) {
        let _ = self.verdict.try_send(verdict);
    }
}
