//! # Corkboard Core
//!
//! Board model and persistence for a single-user, local kanban board.
//!
//! This crate owns the board state (a fixed set of columns holding ordered
//! cards), the mutations a view layer dispatches (add, delete, move), and the
//! snapshot that keeps the board alive across sessions. Rendering and input
//! handling live elsewhere; a view reads [`BoardModel::state`] after every
//! command it issues.

pub mod domain;
pub mod error;
pub mod model;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig, Column, ColumnConfig, ColumnId},
    card::{Card, CardId},
};
pub use error::{KanbanError, Result};
pub use model::{BoardModel, Durability};
pub use storage::{KeyValueStore, PersistentStore, StoreConfig};
