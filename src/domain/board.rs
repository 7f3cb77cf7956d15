use crate::domain::card::{Card, CardId};
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// Identifier of a board column (e.g., "todo", "inprogress", "done")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A kanban column and the cards it owns, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(id: ColumnId, title: String) -> Self {
        Self {
            id,
            title,
            cards: Vec::new(),
        }
    }

    /// Position of a card within this column
    pub fn position_of(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == id)
    }
}

/// Configuration for a column of the seed board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: ColumnId,
    pub title: String,
}

impl ColumnConfig {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: ColumnId::from(id),
            title: title.to_string(),
        }
    }
}

/// Board configuration used when no snapshot can be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub columns: Vec<ColumnConfig>,
    /// Text of the card placed in the first column of a fresh board
    pub welcome_card: Option<String>,
}

impl BoardConfig {
    /// Id of the welcome card on a fresh board
    pub const WELCOME_CARD_ID: &'static str = "1";

    /// Rejects configurations that would break the board invariants
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(KanbanError::InvalidConfig(
                "board needs at least one column".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if column.id.as_str().trim().is_empty() {
                return Err(KanbanError::InvalidConfig(
                    "column id must not be blank".to_string(),
                ));
            }
            if !seen.insert(&column.id) {
                return Err(KanbanError::InvalidConfig(format!(
                    "duplicate column id '{}'",
                    column.id
                )));
            }
        }

        if let Some(text) = &self.welcome_card {
            if text.trim().is_empty() {
                return Err(KanbanError::InvalidConfig(
                    "welcome card text must not be blank".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                ColumnConfig::new("todo", "TODO"),
                ColumnConfig::new("inprogress", "IN PROGRESS"),
                ColumnConfig::new("done", "DONE"),
            ],
            welcome_card: Some("Welcome to your board!".to_string()),
        }
    }
}

/// Kanban board state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// Builds the seed board described by the configuration
    pub fn new(config: &BoardConfig) -> Self {
        let mut columns: Vec<Column> = config
            .columns
            .iter()
            .map(|col| Column::new(col.id.clone(), col.title.clone()))
            .collect();

        if let (Some(text), Some(first)) = (&config.welcome_card, columns.first_mut()) {
            first.cards.push(Card::new(
                CardId::from(BoardConfig::WELCOME_CARD_ID),
                text.trim(),
            ));
        }

        Self { columns }
    }

    /// Gets a column by id
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    pub fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| &col.id == id)
    }

    /// Finds a card, returning (column index, card index)
    pub fn locate_card(&self, id: &CardId) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .find_map(|(col_idx, col)| col.position_of(id).map(|card_idx| (col_idx, card_idx)))
    }

    /// Finds a card together with the column that owns it
    pub fn find_card(&self, id: &CardId) -> Option<(&Column, &Card)> {
        self.locate_card(id).map(|(col_idx, card_idx)| {
            let column = &self.columns[col_idx];
            (column, &column.cards[card_idx])
        })
    }

    pub fn contains_card(&self, id: &CardId) -> bool {
        self.locate_card(id).is_some()
    }

    /// Iterates over every card, column by column
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.columns.iter().flat_map(|col| col.cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|col| col.cards.len()).sum()
    }

    /// Checks that the board has exactly the configured columns, in order
    pub fn check_layout(&self, config: &BoardConfig) -> Result<()> {
        let expected: Vec<&str> = config.columns.iter().map(|col| col.id.as_str()).collect();
        let found: Vec<&str> = self.columns.iter().map(|col| col.id.as_str()).collect();
        if expected == found {
            return Ok(());
        }

        Err(KanbanError::MalformedSnapshot(format!(
            "expected columns [{}], found [{}]",
            expected.join(", "),
            found.join(", ")
        )))
    }

    /// Checks the invariants a deserialized board must hold
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(KanbanError::MalformedSnapshot(
                "board has no columns".to_string(),
            ));
        }

        let mut column_ids = HashSet::new();
        let mut card_ids = HashSet::new();

        for column in &self.columns {
            if column.id.as_str().trim().is_empty() {
                return Err(KanbanError::MalformedSnapshot(
                    "column id must not be blank".to_string(),
                ));
            }
            if !column_ids.insert(&column.id) {
                return Err(KanbanError::MalformedSnapshot(format!(
                    "duplicate column id '{}'",
                    column.id
                )));
            }

            for card in &column.cards {
                if card.id.as_str().trim().is_empty() {
                    return Err(KanbanError::MalformedSnapshot(format!(
                        "blank card id in column '{}'",
                        column.id
                    )));
                }
                if !card_ids.insert(&card.id) {
                    return Err(KanbanError::MalformedSnapshot(format!(
                        "card id '{}' appears more than once",
                        card.id
                    )));
                }
                if card.text.trim().is_empty() {
                    return Err(KanbanError::MalformedSnapshot(format!(
                        "card '{}' has no text",
                        card.id
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}
