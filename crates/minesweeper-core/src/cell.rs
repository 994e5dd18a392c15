use serde::{Deserialize, Serialize};

/// A board coordinate. Ordered row-major, which is the order every
/// deterministic scan in this crate follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check whether this cell lies on a `height` x `width` board
    #[inline]
    pub fn in_bounds(&self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }

    /// In-bounds cells at Chebyshev distance 1, excluding the cell itself.
    /// Up to 8 cells; fewer along edges and in corners.
    pub fn neighbors(self, height: usize, width: usize) -> impl Iterator<Item = Cell> {
        let rows = self.row.saturating_sub(1)..=(self.row + 1).min(height.saturating_sub(1));
        rows.flat_map(move |row| {
            let cols = self.col.saturating_sub(1)..=(self.col + 1).min(width.saturating_sub(1));
            cols.map(move |col| Cell::new(row, col))
        })
        .filter(move |&cell| cell != self && cell.in_bounds(height, width))
    }

    /// Convert to a linear row-major index
    #[inline]
    pub fn index(&self, width: usize) -> usize {
        self.row * width + self.col
    }

    /// Convert a linear row-major index back to a cell
    #[inline]
    pub fn from_index(idx: usize, width: usize) -> Self {
        Self::new(idx / width, idx % width)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// All cells of a `height` x `width` board in row-major order
pub fn all_cells(height: usize, width: usize) -> impl Iterator<Item = Cell> {
    (0..height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
}
