//! Table integration tests.

use proptest::prelude::*;
use setrs::{Card, Table, TableError, Toggle};

fn table() -> Table {
    Table::new(12, 81, 4, 3)
}

#[test]
fn cards_and_slots_stay_paired() {
    let table = table();
    table.place_card(Card::new(7), 3).unwrap();

    assert_eq!(table.card_at(3), Some(Card::new(7)));
    assert_eq!(table.slot_of(Card::new(7)), Some(3));
    assert_eq!(
        table.place_card(Card::new(8), 3),
        Err(TableError::SlotOccupied(3))
    );
    assert_eq!(
        table.place_card(Card::new(7), 4),
        Err(TableError::CardOnTable(3))
    );
    assert_eq!(
        table.place_card(Card::new(9), 12),
        Err(TableError::SlotOutOfRange(12))
    );
    assert_eq!(table.occupied_slot_count(), 1);
}

#[test]
fn removing_a_card_purges_its_tokens() {
    let table = table();
    table.place_card(Card::new(1), 0).unwrap();
    table.place_card(Card::new(2), 1).unwrap();
    table.place_token(0, 0).unwrap();
    table.place_token(2, 0).unwrap();
    table.place_token(2, 1).unwrap();

    let removed = table.remove_card(0).unwrap();

    assert_eq!(removed.card, Card::new(1));
    assert_eq!(removed.holders, vec![0, 2]);
    assert_eq!(table.token_count(0), 0);
    assert_eq!(table.token_count(2), 1);
    assert_eq!(table.tokens_of(2), vec![1]);
    assert_eq!(table.slot_of(Card::new(1)), None);
    assert_eq!(table.remove_card(0), Err(TableError::SlotEmpty(0)));

    // The card can go down again elsewhere.
    table.place_card(Card::new(1), 5).unwrap();
    assert_eq!(table.slot_of(Card::new(1)), Some(5));
}

#[test]
fn tokens_need_a_card_and_a_free_token() {
    let table = table();
    assert_eq!(table.place_token(0, 0), Err(TableError::SlotEmpty(0)));

    for slot in 0..4 {
        table.place_card(Card::new(slot as u16), slot).unwrap();
    }
    assert_eq!(table.place_token(0, 0), Ok(1));
    assert_eq!(table.place_token(0, 0), Err(TableError::TokenExists(0)));
    assert_eq!(table.place_token(0, 1), Ok(2));
    assert_eq!(table.place_token(0, 2), Ok(3));
    assert_eq!(table.place_token(0, 3), Err(TableError::TokensExhausted));
    assert_eq!(table.place_token(4, 3), Err(TableError::PlayerOutOfRange(4)));

    assert_eq!(table.remove_token(0, 1), Ok(true));
    assert_eq!(table.remove_token(0, 1), Ok(false));
    assert_eq!(table.toggle_token(0, 3), Ok(Toggle::Placed(3)));
    assert!(table.has_token(0, 3));
}

#[derive(Debug, Clone)]
enum Op {
    Place { card: u16, slot: usize },
    Remove { slot: usize },
    Toggle { player: usize, slot: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u16..20, 0usize..6).prop_map(|(card, slot)| Op::Place { card, slot }),
        (0usize..6).prop_map(|slot| Op::Remove { slot }),
        (0usize..4, 0usize..6).prop_map(|(player, slot)| Op::Toggle { player, slot }),
        (0usize..4, 0usize..6).prop_map(|(player, slot)| Op::Toggle { player, slot }),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_under_any_operation_order(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let table = Table::new(6, 20, 4, 3);

        for op in ops {
            match op {
                Op::Place { card, slot } => { let _ = table.place_card(Card::new(card), slot); }
                Op::Remove { slot } => { let _ = table.remove_card(slot); }
                Op::Toggle { player, slot } => { let _ = table.toggle_token(player, slot); }
            }

            for slot in 0..6 {
                if let Some(card) = table.card_at(slot) {
                    prop_assert_eq!(table.slot_of(card), Some(slot));
                }
            }
            for player in 0..4 {
                let tokens = table.tokens_of(player);
                prop_assert!(tokens.len() <= 3);
                prop_assert_eq!(tokens.len(), table.token_count(player));
                for slot in tokens {
                    prop_assert!(table.card_at(slot).is_some(), "token on empty slot {}", slot);
                }
            }
        }
    }
}
