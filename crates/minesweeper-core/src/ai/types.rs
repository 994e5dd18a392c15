use crate::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inference rules applied during one fixed-point pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// Sentences with count 0: every cell is safe
    KnownSafes,
    /// Sentences with count == |cells|: every cell is a mine
    KnownMines,
    /// `B - A` whenever `A.cells` is a proper subset of `B.cells`
    SubsetInference,
}

/// Order in which a pass applies the rules. Every order reaches the same
/// fixed point; only the number of passes differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuleOrder {
    #[default]
    SafesFirst,
    MinesFirst,
    SubsetsFirst,
}

impl RuleOrder {
    pub fn rules(&self) -> [Rule; 3] {
        match self {
            RuleOrder::SafesFirst => [Rule::KnownSafes, Rule::KnownMines, Rule::SubsetInference],
            RuleOrder::MinesFirst => [Rule::KnownMines, Rule::KnownSafes, Rule::SubsetInference],
            RuleOrder::SubsetsFirst => [Rule::SubsetInference, Rule::KnownSafes, Rule::KnownMines],
        }
    }

    pub fn all() -> &'static [RuleOrder] {
        &[
            RuleOrder::SafesFirst,
            RuleOrder::MinesFirst,
            RuleOrder::SubsetsFirst,
        ]
    }
}

/// What one round of inference derived
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    /// Cells newly proven safe (including the opened cell itself)
    pub new_safes: BTreeSet<Cell>,
    /// Cells newly proven to be mines
    pub new_mines: BTreeSet<Cell>,
    /// Sentences added, whether observed or derived by subset inference
    pub sentences_added: usize,
    /// Sentences discarded as empty or duplicate
    pub sentences_pruned: usize,
    /// Fixed-point passes run, including the final pass that changed nothing
    pub passes: usize,
}

impl Deduction {
    /// True if nothing new was learned about any cell
    pub fn is_empty(&self) -> bool {
        self.new_safes.is_empty() && self.new_mines.is_empty()
    }
}

/// How a move was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// The cell is proven safe
    Safe,
    /// No safe cell was available; the cell had the lowest risk score
    Guess { score: usize },
}

/// A move recommended by the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub cell: Cell,
    pub kind: MoveKind,
}

impl Move {
    pub fn is_safe(&self) -> bool {
        matches!(self.kind, MoveKind::Safe)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            MoveKind::Safe => write!(f, "safe move {}", self.cell),
            MoveKind::Guess { score } => write!(f, "guess {} (risk score {})", self.cell, score),
        }
    }
}
