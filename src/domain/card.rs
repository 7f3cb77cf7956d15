use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::board::Board;

/// Unique identifier for a card (e.g., "1", "2", "1700000000000")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Creates a new CardId from a counter
    pub fn new(counter: u64) -> Self {
        Self(counter.to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id, if it has one
    fn counter(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single unit of work on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub id: CardId,
    pub text: String,
}

impl Card {
    pub fn new(id: CardId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Trims card text, returning `None` when nothing is left
pub fn normalize_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Hands out card ids that are not yet used on a board.
///
/// Counts upward from the largest numeric id seen on the board, skipping any
/// candidate that already exists (ids written by other tools need not be
/// numeric or dense).
#[derive(Debug, Clone)]
pub struct CardIdGenerator {
    next_card_number: u64,
}

impl CardIdGenerator {
    pub fn new() -> Self {
        Self {
            next_card_number: 1,
        }
    }

    /// Creates a generator that starts above every numeric id on the board
    pub fn seeded_from(board: &Board) -> Self {
        let highest = board
            .cards()
            .filter_map(|card| card.id.counter())
            .max()
            .unwrap_or(0);
        Self {
            next_card_number: highest.saturating_add(1),
        }
    }

    /// Generates the next id not present on the board
    pub fn next_id(&mut self, board: &Board) -> CardId {
        loop {
            let id = CardId::new(self.next_card_number);
            self.next_card_number = self.next_card_number.wrapping_add(1);
            if !board.contains_card(&id) {
                return id;
            }
        }
    }
}

impl Default for CardIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
