use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Standard board sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    /// Board configuration for this difficulty
    pub fn config(&self) -> BoardConfig {
        match self {
            Difficulty::Beginner => BoardConfig::beginner(),
            Difficulty::Intermediate => BoardConfig::intermediate(),
            Difficulty::Expert => BoardConfig::expert(),
        }
    }

    pub fn all_levels() -> &'static [Difficulty] {
        &[
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Expert,
        ]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Expert => write!(f, "Expert"),
        }
    }
}

/// Configuration for board generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
    /// Number of mines placed on the board
    pub mines: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
        }
    }
}

impl BoardConfig {
    pub fn new(height: usize, width: usize, mines: usize) -> Result<Self> {
        let config = Self {
            height,
            width,
            mines,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn beginner() -> Self {
        Self {
            height: 9,
            width: 9,
            mines: 10,
        }
    }

    pub fn intermediate() -> Self {
        Self {
            height: 16,
            width: 16,
            mines: 40,
        }
    }

    pub fn expert() -> Self {
        Self {
            height: 16,
            width: 30,
            mines: 99,
        }
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.height * self.width
    }

    /// Reject empty boards and boards with no safe cell left
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(Error::InvalidConfiguration {
                message: format!("board must be non-empty, got {}x{}", self.height, self.width),
            });
        }
        if self.mines >= self.cell_count() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "a {}x{} board can hold at most {} mines, requested {}",
                    self.height,
                    self.width,
                    self.cell_count() - 1,
                    self.mines
                ),
            });
        }
        Ok(())
    }
}
