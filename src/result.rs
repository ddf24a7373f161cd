//! End-of-game results.

use crate::table::PlayerId;

/// Final standings of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    /// Score of every player, indexed by player id.
    pub scores: Vec<u32>,
    /// Every player whose score equals the highest score, in ascending order.
    pub winners: Vec<PlayerId>,
}

impl GameReport {
    /// Builds the report for the given scores.
    #[must_use]
    pub fn from_scores(scores: Vec<u32>) -> Self {
        let winners = winners(&scores);
        Self { scores, winners }
    }
}

/// Returns every player whose score equals the maximum score.
///
/// Ties are kept; an empty score list has no winners.
///
/// ```
/// assert_eq!(setrs::winners(&[3, 5, 5]), vec![1, 2]);
/// ```
#[must_use]
pub fn winners(scores: &[u32]) -> Vec<PlayerId> {
    let Some(&max) = scores.iter().max() else {
        return Vec::new();
    };

    scores
        .iter()
        .enumerate()
        .filter(|&(_, &score)| score == max)
        .map(|(player, _)| player)
        .collect()
}
