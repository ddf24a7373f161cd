//! Card identifiers and deck utilities.

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 81;

/// Number of slots on a standard table.
pub const TABLE_SIZE: usize = 12;

/// Number of cards that make up a set, which is also the number of values each
/// feature can take.
pub const FEATURE_SIZE: usize = 3;

/// Number of features every card carries (color, number, shape, shading).
pub const FEATURE_COUNT: usize = 4;

/// A card, identified by its position in the full deck.
///
/// The id encodes the card's features: reading it in base `feature_size`, digit
/// `i` is the value of feature `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(u16);

impl Card {
    /// Creates a card from its id.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the card id.
    #[must_use]
    pub const fn id(self) -> u16 {
        self.0
    }

    /// Returns the value of feature `index`, in `0..feature_size`.
    #[must_use]
    pub fn feature(self, index: usize, feature_size: usize) -> usize {
        let mut id = usize::from(self.0);
        for _ in 0..index {
            id /= feature_size;
        }
        id % feature_size
    }
}

/// Returns every card of a deck of the given size, in id order.
#[must_use]
pub fn full_deck(deck_size: usize) -> Vec<Card> {
    (0..deck_size).map(|id| Card::new(id as u16)).collect()
}
