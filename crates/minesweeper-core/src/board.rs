//! Ground truth of a game: where the mines are.
//!
//! The board is owned by the game driver. The knowledge base never sees it;
//! it only receives the `(cell, nearby_mines)` observations derived from it.

use crate::cell::all_cells;
use crate::rng::SimpleRng;
use crate::{BoardConfig, Cell, Error, Result};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    /// Row-major mine map
    cells: Vec<bool>,
    mines: BTreeSet<Cell>,
}

impl Board {
    /// Generate a board with mines placed uniformly at random
    pub fn new(config: &BoardConfig) -> Result<Self> {
        Self::generate(config, &mut SimpleRng::new())
    }

    /// Generate a reproducible board from a seed
    pub fn with_seed(config: &BoardConfig, seed: u64) -> Result<Self> {
        Self::generate(config, &mut SimpleRng::with_seed(seed))
    }

    /// Build a board with an explicit mine layout
    pub fn from_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Cell>,
    ) -> Result<Self> {
        let mut board = Self {
            height,
            width,
            cells: vec![false; height * width],
            mines: BTreeSet::new(),
        };
        for cell in mines {
            board.check_bounds(cell)?;
            board.cells[cell.index(width)] = true;
            board.mines.insert(cell);
        }
        BoardConfig::new(height, width, board.mines.len())?;
        Ok(board)
    }

    fn generate(config: &BoardConfig, rng: &mut SimpleRng) -> Result<Self> {
        config.validate()?;
        let mut indices: Vec<usize> = (0..config.cell_count()).collect();
        rng.shuffle(&mut indices);
        let mines = indices[..config.mines]
            .iter()
            .map(|&idx| Cell::from_index(idx, config.width));
        Self::from_mines(config.height, config.width, mines)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.height, self.width)
    }

    pub fn check_bounds(&self, cell: Cell) -> Result<()> {
        if self.contains(cell) {
            Ok(())
        } else {
            Err(Error::CellOutOfBounds {
                cell,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Whether `cell` holds a mine. Out-of-bounds cells hold none.
    pub fn is_mine(&self, cell: Cell) -> bool {
        self.contains(cell) && self.cells[cell.index(self.width)]
    }

    /// Number of mines among the up to 8 neighbors of `cell`
    pub fn nearby_mines(&self, cell: Cell) -> u8 {
        cell.neighbors(self.height, self.width)
            .filter(|&n| self.is_mine(n))
            .count() as u8
    }

    /// True iff the flagged cells are exactly the mines
    pub fn won(&self, flags: &BTreeSet<Cell>) -> bool {
        *flags == self.mines
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        all_cells(self.height, self.width)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = format!("{}-", "--".repeat(self.width));
        for row in 0..self.height {
            writeln!(f, "{}", rule)?;
            for col in 0..self.width {
                let mark = if self.is_mine(Cell::new(row, col)) { "|X" } else { "| " };
                write!(f, "{}", mark)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_board(board: &Board, config: &BoardConfig) {
        assert_eq!(board.height(), config.height);
        assert_eq!(board.width(), config.width);
        let seen = board.cells().filter(|&c| board.is_mine(c)).count();
        assert_eq!(seen, config.mines);
        assert_eq!(board.mine_count(), config.mines);
    }

    #[test]
    fn test_generate_small_board() {
        let config = BoardConfig::new(3, 3, 3).unwrap();
        for _ in 0..10 {
            let board = Board::new(&config).unwrap();
            validate_board(&board, &config);
        }
    }

    #[test]
    fn test_generate_large_board() {
        let config = BoardConfig::expert();
        let board = Board::new(&config).unwrap();
        validate_board(&board, &config);
    }

    #[test]
    fn test_generate_empty_and_nearly_full() {
        let empty = BoardConfig::new(3, 3, 0).unwrap();
        validate_board(&Board::new(&empty).unwrap(), &empty);

        let nearly_full = BoardConfig::new(4, 3, 11).unwrap();
        validate_board(&Board::new(&nearly_full).unwrap(), &nearly_full);
    }

    #[test]
    fn test_overfull_board_is_rejected() {
        let config = BoardConfig {
            height: 4,
            width: 3,
            mines: 13,
        };
        assert!(matches!(
            Board::new(&config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_seeded_boards_are_reproducible() {
        let config = BoardConfig::intermediate();
        let a = Board::with_seed(&config, 42).unwrap();
        let b = Board::with_seed(&config, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nearby_mines() {
        let board = Board::from_mines(
            3,
            3,
            [Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)],
        )
        .unwrap();
        assert_eq!(board.nearby_mines(Cell::new(0, 1)), 3);
        assert_eq!(board.nearby_mines(Cell::new(1, 1)), 2);
        assert_eq!(board.nearby_mines(Cell::new(2, 2)), 1);
        assert_eq!(board.nearby_mines(Cell::new(0, 2)), 1);
    }

    #[test]
    fn test_won_requires_exact_flags() {
        let board = Board::from_mines(2, 2, [Cell::new(1, 1)]).unwrap();
        let mut flags = BTreeSet::new();
        assert!(!board.won(&flags));
        flags.insert(Cell::new(1, 1));
        assert!(board.won(&flags));
        flags.insert(Cell::new(0, 0));
        assert!(!board.won(&flags));
    }

    #[test]
    fn test_out_of_bounds_mine_rejected() {
        assert!(matches!(
            Board::from_mines(2, 2, [Cell::new(2, 0)]),
            Err(Error::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_display() {
        let board = Board::from_mines(1, 2, [Cell::new(0, 1)]).unwrap();
        assert_eq!(board.to_string(), "-----\n| |X|\n-----\n");
    }
}
