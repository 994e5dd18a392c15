//! Minesweeper engine: board generation and an AI that plays by logical
//! inference.
//!
//! The [`KnowledgeBase`] accepts the revealed count of every opened cell,
//! derives which cells are certainly safe or certainly mines, and picks the
//! next move. [`Game`] couples it with a hidden [`Board`].

pub mod ai;
mod board;
mod cell;
mod config;
mod error;
mod game;
mod rng;

pub use ai::{
    Deduction, KnowledgeBase, Move, MoveKind, Rule, RuleOrder, Sentence, SentenceId,
    SentenceStore,
};
pub use board::Board;
pub use cell::{all_cells, Cell};
pub use config::{BoardConfig, Difficulty};
pub use error::{Error, Result};
pub use game::{Game, GameStatus};
