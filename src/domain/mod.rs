pub mod board;
pub mod card;

pub use board::{Board, BoardConfig, Column, ColumnConfig, ColumnId};
pub use card::{normalize_text, Card, CardId, CardIdGenerator};
