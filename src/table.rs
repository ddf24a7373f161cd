//! The shared grid of slots, cards, and player tokens.
//!
//! Every slot sits behind its own lock. The card index (card to slot) is a
//! separate lock that is only ever taken while a slot lock is already held, so
//! the lock order is always: slots in ascending index, then the card index.
//! Per-player token counts are atomics that only change under the lock of the
//! slot the token lives on.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::card::Card;
use crate::error::TableError;
use crate::options::MAX_PLAYERS;
use crate::sync::Mutex;

/// A player id, in `0..players`.
pub type PlayerId = usize;

#[derive(Debug, Default)]
struct Slot {
    card: Option<Card>,
    /// Bit `p` is set when player `p` has a token here.
    tokens: u64,
}

/// A card taken off the table, with the players whose tokens went with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedCard {
    /// The card that occupied the slot.
    pub card: Card,
    /// Players that had a token on the slot, in ascending order.
    pub holders: Vec<PlayerId>,
}

/// Outcome of a player selecting a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// A token was placed; holds the player's new token count.
    Placed(usize),
    /// The player's token was taken back; holds the new token count.
    Removed(usize),
    /// The slot is empty, or the player has no tokens left.
    Ignored,
}

/// The table: which card lies in which slot and which tokens sit on it.
pub struct Table {
    slots: Vec<Mutex<Slot>>,
    /// `card id -> slot`.
    card_slots: Mutex<Vec<Option<usize>>>,
    token_counts: Vec<AtomicUsize>,
    capacity: usize,
}

impl Table {
    /// Creates an empty table.
    ///
    /// `capacity` is the number of tokens each player owns.
    ///
    /// # Panics
    ///
    /// Panics if `players` exceeds [`MAX_PLAYERS`].
    #[must_use]
    pub fn new(slots: usize, deck_size: usize, players: usize, capacity: usize) -> Self {
        assert!(
            players <= MAX_PLAYERS,
            "a table tracks at most {MAX_PLAYERS} players"
        );

        Self {
            slots: (0..slots).map(|_| Mutex::new(Slot::default())).collect(),
            card_slots: Mutex::new(vec![None; deck_size]),
            token_counts: (0..players).map(|_| AtomicUsize::new(0)).collect(),
            capacity,
        }
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of tokens each player owns.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    fn slot(&self, slot: usize) -> Result<&Mutex<Slot>, TableError> {
        self.slots.get(slot).ok_or(TableError::SlotOutOfRange(slot))
    }

    fn count(&self, player: PlayerId) -> Result<&AtomicUsize, TableError> {
        self.token_counts
            .get(player)
            .ok_or(TableError::PlayerOutOfRange(player))
    }

    /// Places a card in an empty slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is out of range or occupied, or if the card
    /// is already on the table.
    pub fn place_card(&self, card: Card, slot: usize) -> Result<(), TableError> {
        let mut state = self.slot(slot)?.lock();
        if state.card.is_some() {
            return Err(TableError::SlotOccupied(slot));
        }

        let mut card_slots = self.card_slots.lock();
        let index = usize::from(card.id());
        if index >= card_slots.len() {
            card_slots.resize(index + 1, None);
        }
        if let Some(current) = card_slots[index] {
            return Err(TableError::CardOnTable(current));
        }

        debug_assert_eq!(state.tokens, 0, "tokens left on an empty slot");
        card_slots[index] = Some(slot);
        state.card = Some(card);
        Ok(())
    }

    /// Removes the card in a slot together with every token on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is out of range or empty.
    pub fn remove_card(&self, slot: usize) -> Result<RemovedCard, TableError> {
        let mut state = self.slot(slot)?.lock();
        let card = state.card.take().ok_or(TableError::SlotEmpty(slot))?;

        let holders: Vec<PlayerId> = (0..self.token_counts.len())
            .filter(|&player| state.tokens & (1 << player) != 0)
            .collect();
        for &player in &holders {
            self.token_counts[player].fetch_sub(1, Ordering::SeqCst);
        }
        state.tokens = 0;

        let mut card_slots = self.card_slots.lock();
        debug_assert_eq!(card_slots[usize::from(card.id())], Some(slot));
        card_slots[usize::from(card.id())] = None;

        Ok(RemovedCard { card, holders })
    }

    /// Places a player's token on an occupied slot.
    ///
    /// Returns the player's new token count.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot or player is out of range, the slot is
    /// empty, the player already has a token there, or the player has no tokens
    /// left.
    pub fn place_token(&self, player: PlayerId, slot: usize) -> Result<usize, TableError> {
        let count = self.count(player)?;
        let mut state = self.slot(slot)?.lock();
        if state.card.is_none() {
            return Err(TableError::SlotEmpty(slot));
        }
        if state.tokens & (1 << player) != 0 {
            return Err(TableError::TokenExists(slot));
        }
        if count.load(Ordering::SeqCst) >= self.capacity {
            return Err(TableError::TokensExhausted);
        }

        state.tokens |= 1 << player;
        let placed = count.fetch_add(1, Ordering::SeqCst) + 1;
        debug_assert!(placed <= self.capacity, "player {player} over capacity");
        Ok(placed)
    }

    /// Takes a player's token off a slot.
    ///
    /// Returns `false` if the player had no token there.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot or player is out of range.
    pub fn remove_token(&self, player: PlayerId, slot: usize) -> Result<bool, TableError> {
        let count = self.count(player)?;
        let mut state = self.slot(slot)?.lock();
        if state.tokens & (1 << player) == 0 {
            return Ok(false);
        }

        state.tokens &= !(1 << player);
        count.fetch_sub(1, Ordering::SeqCst);
        Ok(true)
    }

    /// Applies a player's selection of a slot as one atomic step.
    ///
    /// Takes the player's token back if there is one, places a token if the
    /// slot holds a card and the player has tokens left, and does nothing
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot or player is out of range.
    pub fn toggle_token(&self, player: PlayerId, slot: usize) -> Result<Toggle, TableError> {
        let count = self.count(player)?;
        let mut state = self.slot(slot)?.lock();
        if state.card.is_none() {
            return Ok(Toggle::Ignored);
        }

        if state.tokens & (1 << player) != 0 {
            state.tokens &= !(1 << player);
            return Ok(Toggle::Removed(count.fetch_sub(1, Ordering::SeqCst) - 1));
        }
        if count.load(Ordering::SeqCst) >= self.capacity {
            return Ok(Toggle::Ignored);
        }

        state.tokens |= 1 << player;
        let placed = count.fetch_add(1, Ordering::SeqCst) + 1;
        debug_assert!(placed <= self.capacity, "player {player} over capacity");
        Ok(Toggle::Placed(placed))
    }

    /// Returns the card in a slot.
    #[must_use]
    pub fn card_at(&self, slot: usize) -> Option<Card> {
        self.slots.get(slot).and_then(|state| state.lock().card)
    }

    /// Returns the slot holding a card.
    #[must_use]
    pub fn slot_of(&self, card: Card) -> Option<usize> {
        self.card_slots
            .lock()
            .get(usize::from(card.id()))
            .copied()
            .flatten()
    }

    /// Returns whether a player has a token on a slot.
    #[must_use]
    pub fn has_token(&self, player: PlayerId, slot: usize) -> bool {
        player < self.token_counts.len()
            && self
                .slots
                .get(slot)
                .is_some_and(|state| state.lock().tokens & (1 << player) != 0)
    }

    /// Returns the slots a player has tokens on, in ascending order.
    #[must_use]
    pub fn tokens_of(&self, player: PlayerId) -> Vec<usize> {
        if player >= self.token_counts.len() {
            return Vec::new();
        }

        self.slots
            .iter()
            .enumerate()
            .filter(|(_, state)| state.lock().tokens & (1 << player) != 0)
            .map(|(slot, _)| slot)
            .collect()
    }

    /// Returns the number of tokens a player has placed.
    #[must_use]
    pub fn token_count(&self, player: PlayerId) -> usize {
        self.token_counts
            .get(player)
            .map_or(0, |count| count.load(Ordering::SeqCst))
    }

    /// Returns the number of slots holding a card.
    #[must_use]
    pub fn occupied_slot_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|state| state.lock().card.is_some())
            .count()
    }

    /// Returns the cards on the table, in slot order.
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.slots
            .iter()
            .filter_map(|state| state.lock().card)
            .collect()
    }

    /// Returns the indices of empty slots.
    #[must_use]
    pub fn empty_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, state)| state.lock().card.is_none())
            .map(|(slot, _)| slot)
            .collect()
    }
}
