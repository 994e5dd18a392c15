use crate::{Cell, Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;

/// Logical statement about the board: exactly `count` of `cells` are mines.
///
/// `count <= cells.len()` holds for every value of this type. Operations that
/// would break it return [`Error::Contradiction`] and leave the sentence as it
/// was.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Result<Self> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        if count > cells.len() {
            return Err(Error::Contradiction(format!(
                "{} mines claimed among {} cells",
                count,
                cells.len()
            )));
        }
        Ok(Self { cells, count })
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Every cell is a mine. An empty sentence asserts nothing.
    pub fn known_mines(&self) -> Option<&BTreeSet<Cell>> {
        if !self.cells.is_empty() && self.count == self.cells.len() {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Every cell is safe (vacuously so when empty).
    pub fn known_safes(&self) -> Option<&BTreeSet<Cell>> {
        if self.count == 0 {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Drop a cell proven to be a mine. Returns whether the cell was present.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == 0 {
            return Err(Error::Contradiction(format!(
                "{} is a mine but {} says it has none",
                cell, self
            )));
        }
        self.cells.remove(&cell);
        self.count -= 1;
        Ok(true)
    }

    /// Drop a cell proven to be safe. Returns whether the cell was present.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == self.cells.len() {
            return Err(Error::Contradiction(format!(
                "{} is safe but {} says every cell is a mine",
                cell, self
            )));
        }
        self.cells.remove(&cell);
        Ok(true)
    }

    /// Strict, non-empty subset test used by subset inference
    pub fn is_proper_subset_of(&self, other: &Sentence) -> bool {
        !self.cells.is_empty()
            && self.cells.len() < other.cells.len()
            && self.cells.is_subset(&other.cells)
    }

    /// Subset inference: if `subset` is a proper subset of `self`, the cells
    /// outside it hold the remaining mines.
    pub fn difference(&self, subset: &Sentence) -> Result<Option<Sentence>> {
        if !subset.is_proper_subset_of(self) {
            return Ok(None);
        }
        let count = self.count.checked_sub(subset.count).ok_or_else(|| {
            Error::Contradiction(format!("{} cannot be contained in {}", subset, self))
        })?;
        Sentence::new(self.cells.difference(&subset.cells).copied(), count).map(Some)
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "}} = {}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn test_rejects_count_above_cells() {
        assert!(matches!(
            Sentence::new([c(0, 0)], 2),
            Err(Error::Contradiction(_))
        ));
    }

    #[test]
    fn test_known_mines_only_when_full() {
        let all = Sentence::new([c(0, 0), c(0, 1)], 2).unwrap();
        assert_eq!(all.known_mines().map(|s| s.len()), Some(2));

        let partial = Sentence::new([c(0, 0), c(0, 1)], 1).unwrap();
        assert!(partial.known_mines().is_none());

        let empty = Sentence::new(std::iter::empty(), 0).unwrap();
        assert!(empty.known_mines().is_none());
    }

    #[test]
    fn test_known_safes_only_when_zero() {
        let safe = Sentence::new([c(0, 0), c(0, 1)], 0).unwrap();
        assert_eq!(safe.known_safes(), Some(safe.cells()));

        let risky = Sentence::new([c(0, 0), c(0, 1)], 1).unwrap();
        assert!(risky.known_safes().is_none());

        let empty = Sentence::new(std::iter::empty(), 0).unwrap();
        assert!(empty.known_safes().map_or(false, |s| s.is_empty()));
    }

    #[test]
    fn test_mark_safe_shrinks_cells_only() {
        let mut s = Sentence::new([c(0, 0), c(0, 1), c(1, 1)], 1).unwrap();
        assert!(s.mark_safe(c(0, 1)).unwrap());
        assert_eq!(s.len(), 2);
        assert_eq!(s.count(), 1);

        assert!(!s.mark_safe(c(5, 5)).unwrap());
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_mark_mine_shrinks_cells_and_count() {
        let mut s = Sentence::new([c(0, 0), c(0, 1), c(1, 1)], 2).unwrap();
        assert!(s.mark_mine(c(1, 1)).unwrap());
        assert_eq!(s.len(), 2);
        assert_eq!(s.count(), 1);

        assert!(!s.mark_mine(c(1, 1)).unwrap());
        assert_eq!(s.count(), 1);
    }

    #[test]
    fn test_contradictory_marks_are_rejected() {
        let mut none = Sentence::new([c(0, 0), c(0, 1)], 0).unwrap();
        assert!(none.mark_mine(c(0, 0)).is_err());
        assert_eq!(none.len(), 2);

        let mut all = Sentence::new([c(0, 0), c(0, 1)], 2).unwrap();
        assert!(all.mark_safe(c(0, 0)).is_err());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_difference_of_subset() {
        let a = Sentence::new([c(0, 0), c(0, 1), c(0, 2)], 1).unwrap();
        let b = Sentence::new([c(0, 0), c(0, 1), c(0, 2), c(1, 0)], 2).unwrap();
        let derived = b.difference(&a).unwrap().unwrap();
        assert_eq!(derived, Sentence::new([c(1, 0)], 1).unwrap());

        // Not a subset in the other direction, and never of itself
        assert!(a.difference(&b).unwrap().is_none());
        assert!(a.difference(&a).unwrap().is_none());
    }

    #[test]
    fn test_difference_detects_overcount() {
        let a = Sentence::new([c(0, 0), c(0, 1)], 2).unwrap();
        let b = Sentence::new([c(0, 0), c(0, 1), c(0, 2)], 1).unwrap();
        assert!(matches!(b.difference(&a), Err(Error::Contradiction(_))));
    }

    #[test]
    fn test_equality_and_display() {
        let a = Sentence::new([c(1, 0), c(0, 1)], 1).unwrap();
        let b = Sentence::new([c(0, 1), c(1, 0)], 1).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Sentence::new([c(0, 1), c(1, 0)], 2).unwrap());
        assert_eq!(a.to_string(), "{(0, 1), (1, 0)} = 1");
    }
}
