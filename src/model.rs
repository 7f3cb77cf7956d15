//! The board model: owns the in-memory board and keeps the persisted snapshot
//! in step with it.
//!
//! Every successful mutation is followed by exactly one save. Calls with
//! stale or invalid references (unknown column, unknown card, blank text) are
//! no-ops: they change nothing, write nothing and report no error.

use crate::{
    domain::{normalize_text, Board, BoardConfig, Card, CardId, CardIdGenerator, ColumnId},
    error::Result,
    storage::{KeyValueStore, PersistentStore},
};

/// Whether the in-memory board matches the last persisted snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Durability {
    Persisted,
    /// The last save failed; the in-memory board is newer than the snapshot
    Degraded { reason: String },
}

impl Durability {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

pub struct BoardModel<S> {
    board: Board,
    store: PersistentStore<S>,
    card_ids: CardIdGenerator,
    durability: Durability,
}

impl<S: KeyValueStore> BoardModel<S> {
    /// Restores the board from the store, or seeds it from `config` when no
    /// usable snapshot exists. The seed is not written until the first mutation.
    pub fn open(store: PersistentStore<S>, config: &BoardConfig) -> Self {
        let default_config;
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}; using the default columns", e);
                default_config = BoardConfig::default();
                &default_config
            }
        };

        let board = match store.load() {
            Some(board) => match board.check_layout(config) {
                Ok(()) => board,
                Err(e) => {
                    log::warn!("Ignoring saved board: {}", e);
                    Board::new(config)
                }
            },
            None => {
                log::info!("Starting from seed board");
                Board::new(config)
            }
        };

        Self {
            card_ids: CardIdGenerator::seeded_from(&board),
            board,
            store,
            durability: Durability::Persisted,
        }
    }

    /// Read-only view of the board for rendering
    pub fn state(&self) -> &Board {
        &self.board
    }

    pub fn durability(&self) -> &Durability {
        &self.durability
    }

    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    pub fn into_store(self) -> PersistentStore<S> {
        self.store
    }

    /// Appends a new card with the trimmed text to the end of a column
    pub fn add_card(&mut self, column_id: &ColumnId, text: &str) -> Option<Card> {
        let text = normalize_text(text)?;
        if self.board.column(column_id).is_none() {
            return None;
        }

        let card = Card::new(self.card_ids.next_id(&self.board), text);
        self.board.column_mut(column_id)?.cards.push(card.clone());
        log::debug!("Added card {} to column {}", card.id, column_id);

        self.persist_quietly();
        Some(card)
    }

    /// Removes a card from the given column, returning it if it was there
    pub fn delete_card(&mut self, card_id: &CardId, column_id: &ColumnId) -> Option<Card> {
        let column = self.board.column_mut(column_id)?;
        let idx = column.position_of(card_id)?;
        let card = column.cards.remove(idx);
        log::debug!("Deleted card {} from column {}", card_id, column_id);

        self.persist_quietly();
        Some(card)
    }

    /// Moves a card to the end of the target column.
    ///
    /// There is no positional drop: the card always lands last, including
    /// when the target is the column it already sits in.
    pub fn move_card(&mut self, card_id: &CardId, target_column_id: &ColumnId) -> bool {
        let Some(target_idx) = self
            .board
            .columns
            .iter()
            .position(|col| &col.id == target_column_id)
        else {
            return false;
        };
        let Some((source_idx, card_idx)) = self.board.locate_card(card_id) else {
            return false;
        };

        let card = self.board.columns[source_idx].cards.remove(card_idx);
        self.board.columns[target_idx].cards.push(card);
        log::debug!(
            "Moved card {} from column {} to column {}",
            card_id,
            self.board.columns[source_idx].id,
            target_column_id
        );

        self.persist_quietly();
        true
    }

    /// Saves the current board, updating the durability state
    pub fn persist(&mut self) -> Result<()> {
        match self.store.save(&self.board) {
            Ok(()) => {
                if self.durability.is_degraded() {
                    log::info!("Board saved again after earlier failure");
                }
                self.durability = Durability::Persisted;
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to save board, keeping changes in memory: {}", e);
                self.durability = Durability::Degraded {
                    reason: e.to_string(),
                };
                Err(e)
            }
        }
    }

    // Mutations never fail on storage errors; they surface through `durability`
    fn persist_quietly(&mut self) {
        let _ = self.persist();
    }
}
