//! Set validation.

use crate::card::Card;

/// Decides which card groups form a set.
pub trait Oracle: Send + Sync {
    /// Returns whether `cards` form a set.
    fn is_set(&self, cards: &[Card]) -> bool;

    /// Returns up to `limit` sets found among `cards`.
    fn find_sets(&self, cards: &[Card], limit: usize) -> Vec<Vec<Card>>;

    /// Returns the number of sets among `cards`.
    fn count_sets(&self, cards: &[Card]) -> usize {
        self.find_sets(cards, usize::MAX).len()
    }

    /// Returns whether at least one set exists among `cards`.
    fn has_set(&self, cards: &[Card]) -> bool {
        !self.find_sets(cards, 1).is_empty()
    }
}

/// The standard rule: for every feature, the cards are all alike or all different.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureOracle {
    feature_size: usize,
    feature_count: usize,
}

impl FeatureOracle {
    /// Creates an oracle for sets of `feature_size` cards with `feature_count` features.
    #[must_use]
    pub const fn new(feature_size: usize, feature_count: usize) -> Self {
        Self {
            feature_size,
            feature_count,
        }
    }

    fn feature_matches(&self, cards: &[Card], feature: usize) -> bool {
        let value = |card: &Card| card.feature(feature, self.feature_size);
        let first = value(&cards[0]);
        if cards.iter().all(|card| value(card) == first) {
            return true;
        }

        cards
            .iter()
            .enumerate()
            .all(|(i, a)| cards[i + 1..].iter().all(|b| value(a) != value(b)))
    }
}

impl Oracle for FeatureOracle {
    fn is_set(&self, cards: &[Card]) -> bool {
        if cards.len() != self.feature_size || self.feature_size == 0 {
            return false;
        }

        let distinct = cards
            .iter()
            .enumerate()
            .all(|(i, a)| !cards[i + 1..].contains(a));

        distinct && (0..self.feature_count).all(|feature| self.feature_matches(cards, feature))
    }

    fn find_sets(&self, cards: &[Card], limit: usize) -> Vec<Vec<Card>> {
        let k = self.feature_size;
        let n = cards.len();
        let mut found = Vec::new();
        if k == 0 || n < k || limit == 0 {
            return found;
        }

        // Lexicographic walk over index combinations.
        let mut indices: Vec<usize> = (0..k).collect();
        let mut group = Vec::with_capacity(k);
        loop {
            group.clear();
            group.extend(indices.iter().map(|&i| cards[i]));
            if self.is_set(&group) {
                found.push(group.clone());
                if found.len() >= limit {
                    break;
                }
            }

            let Some(i) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
                break;
            };
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
        }

        found
    }
}
