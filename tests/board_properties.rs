//! Property-based tests for the board model and snapshot persistence
//!
//! Random command sequences are replayed against a model backed by an
//! in-memory store; after every command the board must still satisfy its
//! invariants and the persisted snapshot must match the in-memory state.

use corkboard_core::{
    storage::MemoryStore, Board, BoardConfig, BoardModel, Card, CardId, Column, ColumnId,
    KeyValueStore, PersistentStore,
};
use proptest::prelude::*;

const COLUMNS: [&str; 4] = ["todo", "inprogress", "done", "missing"];

#[derive(Debug, Clone)]
enum Command {
    Add { column: usize, text: String },
    Move { card: usize, column: usize },
    Delete { card: usize, column: usize },
    DeleteUnknown,
    MoveUnknown { column: usize },
}

fn card_text() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::string::string_regex(r"[a-zA-Z0-9][a-zA-Z0-9 ,.!?]{0,30}")
            .expect("Valid regex for card text"),
        1 => prop::string::string_regex(r"[ \t\n]{0,4}").expect("Valid regex for blank text"),
    ]
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (0..COLUMNS.len(), card_text()).prop_map(|(column, text)| Command::Add { column, text }),
        3 => (any::<usize>(), 0..COLUMNS.len()).prop_map(|(card, column)| Command::Move { card, column }),
        2 => (any::<usize>(), 0..COLUMNS.len()).prop_map(|(card, column)| Command::Delete { card, column }),
        1 => Just(Command::DeleteUnknown),
        1 => (0..COLUMNS.len()).prop_map(|column| Command::MoveUnknown { column }),
    ]
}

/// Generate a valid board with unique card ids
fn board() -> impl Strategy<Value = Board> {
    prop::collection::vec(prop::collection::vec(card_text_non_blank(), 0..6), 1..5).prop_map(
        |columns| {
            let mut next_id = 0u64;
            let columns = columns
                .into_iter()
                .enumerate()
                .map(|(idx, texts)| Column {
                    id: ColumnId::new(format!("col-{idx}")),
                    title: format!("Column {idx}"),
                    cards: texts
                        .into_iter()
                        .map(|text| {
                            next_id += 1;
                            Card::new(CardId::new(next_id * 7), text)
                        })
                        .collect(),
                })
                .collect();
            Board { columns }
        },
    )
}

fn card_text_non_blank() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[^\s][^\n]{0,24}").expect("Valid regex for card text")
}

fn pick_card(board: &Board, n: usize) -> Option<CardId> {
    let count = board.card_count();
    if count == 0 {
        return None;
    }
    board.cards().nth(n % count).map(|c| c.id.clone())
}

fn new_model() -> BoardModel<MemoryStore> {
    BoardModel::open(
        PersistentStore::with_default_key(MemoryStore::new()),
        &BoardConfig::default(),
    )
}

proptest! {
    /// Property: every valid board survives a save/load round trip unchanged
    #[test]
    fn prop_snapshot_round_trip(board in board()) {
        let mut store = PersistentStore::with_default_key(MemoryStore::new());
        store.save(&board).unwrap();
        prop_assert_eq!(store.load(), Some(board));
    }

    /// Property: command sequences keep ids unique, persist exactly once per
    /// successful mutation, and never write for no-ops
    #[test]
    fn prop_commands_preserve_invariants(commands in prop::collection::vec(command(), 0..60)) {
        let mut model = new_model();

        for command in commands {
            let before = model.state().clone();
            let writes_before = model.store().medium().write_count();

            let mutated = match command {
                Command::Add { column, text } => {
                    let column = ColumnId::from(COLUMNS[column]);
                    match model.add_card(&column, &text) {
                        Some(card) => {
                            prop_assert_eq!(card.text.as_str(), text.trim());
                            let cards = &model.state().column(&column).unwrap().cards;
                            prop_assert_eq!(cards.last(), Some(&card));
                            prop_assert!(!before.contains_card(&card.id));
                            true
                        }
                        None => {
                            prop_assert!(text.trim().is_empty() || before.column(&column).is_none());
                            false
                        }
                    }
                }
                Command::Move { card, column } => {
                    let target = ColumnId::from(COLUMNS[column]);
                    match pick_card(&before, card) {
                        Some(card_id) => {
                            let moved = model.move_card(&card_id, &target);
                            prop_assert_eq!(moved, before.column(&target).is_some());
                            if moved {
                                let occurrences = model.state().cards().filter(|c| c.id == card_id).count();
                                prop_assert_eq!(occurrences, 1);
                                let cards = &model.state().column(&target).unwrap().cards;
                                prop_assert_eq!(&cards.last().unwrap().id, &card_id);
                            }
                            moved
                        }
                        None => false,
                    }
                }
                Command::Delete { card, column } => {
                    let column = ColumnId::from(COLUMNS[column]);
                    match pick_card(&before, card) {
                        Some(card_id) => {
                            let owned_here = before
                                .column(&column)
                                .map(|col| col.position_of(&card_id).is_some())
                                .unwrap_or(false);
                            let removed = model.delete_card(&card_id, &column);
                            prop_assert_eq!(removed.is_some(), owned_here);
                            if owned_here {
                                prop_assert!(!model.state().contains_card(&card_id));
                            }
                            owned_here
                        }
                        None => false,
                    }
                }
                Command::DeleteUnknown => {
                    let unknown = CardId::from("no-such-card");
                    model.delete_card(&unknown, &ColumnId::from("todo")).is_some()
                }
                Command::MoveUnknown { column } => {
                    let unknown = CardId::from("no-such-card");
                    model.move_card(&unknown, &ColumnId::from(COLUMNS[column]))
                }
            };

            let writes_after = model.store().medium().write_count();
            if mutated {
                prop_assert_eq!(writes_after, writes_before + 1);
                let loaded = model.store().load();
                prop_assert_eq!(loaded.as_ref(), Some(model.state()));
            } else {
                prop_assert_eq!(writes_after, writes_before);
                prop_assert_eq!(model.state(), &before);
            }

            prop_assert!(model.state().validate().is_ok());
            prop_assert_eq!(model.state().columns.len(), 3);
        }
    }

    /// Property: arbitrary bytes in the snapshot slot never break startup
    #[test]
    fn prop_garbage_snapshot_falls_back_to_seed(raw in ".{0,200}") {
        let mut medium = MemoryStore::new();
        medium.set("corkboard-state", &raw).unwrap();

        let store = PersistentStore::with_default_key(medium);
        if store.load().is_none() {
            let model = BoardModel::open(store, &BoardConfig::default());
            prop_assert_eq!(model.state(), &Board::default());
        }
    }
}

#[test]
fn test_seed_after_corrupt_snapshot_has_fixed_columns() {
    let mut medium = MemoryStore::new();
    medium.set("corkboard-state", "{\"columns\": [").unwrap();

    let model = BoardModel::open(
        PersistentStore::with_default_key(medium),
        &BoardConfig::default(),
    );
    let board = model.state();
    let ids: Vec<&str> = board.columns.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["todo", "inprogress", "done"]);
    assert_eq!(board.columns[0].cards.len(), 1);
    assert_eq!(board.columns[0].cards[0].id.as_str(), "1");
}

#[test]
fn test_many_adds_produce_unique_ids() {
    let mut model = new_model();
    let todo = ColumnId::from("todo");

    let ids: Vec<CardId> = (0..500)
        .map(|i| model.add_card(&todo, &format!("card {i}")).unwrap().id)
        .collect();

    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());
    assert!(!ids.contains(&CardId::from("1")));
}
