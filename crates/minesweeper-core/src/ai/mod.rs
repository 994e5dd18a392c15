//! Knowledge base for playing Minesweeper by logical inference.
//!
//! Every opened cell contributes one [`Sentence`]. Sentences shrink as cells
//! are classified, combine through subset inference, and feed the global
//! `safes`/`mines` sets that move selection reads from.

mod inference;
mod selection;
mod sentence;
mod store;
mod types;

use crate::{Cell, Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

pub use sentence::Sentence;
pub use store::{SentenceId, SentenceStore};
pub use types::{Deduction, Move, MoveKind, Rule, RuleOrder};

/// The AI's persistent state for one board.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    height: usize,
    width: usize,
    /// Cells already selected as a move
    moves_made: BTreeSet<Cell>,
    /// Cells proven not to contain a mine
    safes: BTreeSet<Cell>,
    /// Cells proven to contain a mine
    mines: BTreeSet<Cell>,
    knowledge: SentenceStore,
    /// Count reported for each opened cell
    observations: BTreeMap<Cell, u8>,
    order: RuleOrder,
}

impl KnowledgeBase {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            moves_made: BTreeSet::new(),
            safes: BTreeSet::new(),
            mines: BTreeSet::new(),
            knowledge: SentenceStore::new(),
            observations: BTreeMap::new(),
            order: RuleOrder::default(),
        }
    }

    /// Use a different rule order for the fixed-point passes
    pub fn with_rule_order(mut self, order: RuleOrder) -> Self {
        self.order = order;
        self
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn rule_order(&self) -> RuleOrder {
        self.order
    }

    pub fn moves_made(&self) -> &BTreeSet<Cell> {
        &self.moves_made
    }

    pub fn safes(&self) -> &BTreeSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    /// Currently held sentences, in arena order
    pub fn knowledge(&self) -> impl Iterator<Item = &Sentence> {
        self.knowledge.sentences()
    }

    pub fn sentence_count(&self) -> usize {
        self.knowledge.len()
    }

    /// Count previously reported for an opened cell
    pub fn observation(&self, cell: Cell) -> Option<u8> {
        self.observations.get(&cell).copied()
    }

    /// Whether the cell has been classified as safe or mine
    pub fn is_known(&self, cell: Cell) -> bool {
        self.safes.contains(&cell) || self.mines.contains(&cell)
    }

    fn check_bounds(&self, cell: Cell) -> Result<()> {
        if cell.in_bounds(self.height, self.width) {
            Ok(())
        } else {
            Err(Error::CellOutOfBounds {
                cell,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Mark a cell as a mine and remove it from every sentence.
    /// Returns whether the cell was newly classified.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool> {
        self.check_bounds(cell)?;
        if self.safes.contains(&cell) {
            return Err(Error::Contradiction(format!(
                "{} is already known to be safe",
                cell
            )));
        }
        let newly = self.mines.insert(cell);
        self.knowledge.mark_mine(cell)?;
        Ok(newly)
    }

    /// Mark a cell as safe and remove it from every sentence.
    /// Returns whether the cell was newly classified.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool> {
        self.check_bounds(cell)?;
        if self.mines.contains(&cell) {
            return Err(Error::Contradiction(format!(
                "{} is already known to be a mine",
                cell
            )));
        }
        let newly = self.safes.insert(cell);
        self.knowledge.mark_safe(cell)?;
        Ok(newly)
    }

    /// Integrate the revealed count of an opened cell and infer everything
    /// that follows from it.
    ///
    /// Reporting the same cell again with the same count is a no-op. A
    /// different count, a count larger than the number of neighbors, or a cell
    /// already proven to be a mine is rejected. Marks applied before an error
    /// are kept; the knowledge base has no rollback.
    pub fn add_knowledge(&mut self, cell: Cell, count: u8) -> Result<Deduction> {
        let result = self.integrate(cell, count);
        if let Err(ref e) = result {
            warn!(%cell, count, error = %e, "observation rejected");
        }
        result
    }

    fn integrate(&mut self, cell: Cell, count: u8) -> Result<Deduction> {
        self.check_bounds(cell)?;
        let neighbors: Vec<Cell> = cell.neighbors(self.height, self.width).collect();
        if usize::from(count) > neighbors.len() {
            return Err(Error::InvalidObservation {
                cell,
                reason: format!("count {} exceeds its {} neighbors", count, neighbors.len()),
            });
        }
        match self.observations.get(&cell) {
            Some(&seen) if seen == count => return Ok(Deduction::default()),
            Some(&seen) => {
                return Err(Error::InvalidObservation {
                    cell,
                    reason: format!("already opened with count {}", seen),
                })
            }
            None => {}
        }
        if self.mines.contains(&cell) {
            return Err(Error::InvalidObservation {
                cell,
                reason: "cell is a known mine".to_string(),
            });
        }

        let mut deduction = Deduction::default();
        self.observations.insert(cell, count);
        self.moves_made.insert(cell);
        if self.mark_safe(cell)? {
            deduction.new_safes.insert(cell);
        }

        let mut unknown = Vec::with_capacity(neighbors.len());
        let mut remaining = usize::from(count);
        for neighbor in neighbors {
            if self.mines.contains(&neighbor) {
                remaining = remaining.checked_sub(1).ok_or_else(|| {
                    Error::Contradiction(format!(
                        "{} reports {} mines but more neighbors are known mines",
                        cell, count
                    ))
                })?;
            } else if !self.safes.contains(&neighbor) {
                unknown.push(neighbor);
            }
        }
        let sentence = Sentence::new(unknown, remaining)?;
        debug!(%cell, count, %sentence, "adding observation");
        if self.knowledge.insert(sentence)?.is_some() {
            deduction.sentences_added += 1;
        }

        inference::run_to_fixed_point(self, &mut deduction)?;
        debug!(
            %cell,
            new_safes = deduction.new_safes.len(),
            new_mines = deduction.new_mines.len(),
            passes = deduction.passes,
            sentences = self.knowledge.len(),
            "observation integrated"
        );
        Ok(deduction)
    }

    /// Run inference over the current knowledge until nothing changes
    pub fn infer(&mut self) -> Result<Deduction> {
        let mut deduction = Deduction::default();
        inference::run_to_fixed_point(self, &mut deduction)?;
        Ok(deduction)
    }
}
