//! A single game: hidden board, revealed counts, player flags, and the AI
//! knowledge base fed by every opened cell.

use crate::{Board, BoardConfig, Cell, Error, KnowledgeBase, Move, MoveKind, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Outcome of a game so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    /// A mine was opened
    Lost { mine: Cell },
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    ai: KnowledgeBase,
    /// Opened cells and their neighbor counts
    revealed: BTreeMap<Cell, u8>,
    flags: BTreeSet<Cell>,
    status: GameStatus,
    /// AI moves taken from proven-safe cells
    safe_moves: usize,
    /// AI moves that had to guess
    guesses: usize,
    last_move: Option<Move>,
}

impl Game {
    /// New game on a freshly generated board
    pub fn new(config: &BoardConfig) -> Result<Self> {
        Ok(Self::from_board(Board::new(config)?))
    }

    /// New game whose mine layout is reproducible from `seed`
    pub fn with_seed(config: &BoardConfig, seed: u64) -> Result<Self> {
        Ok(Self::from_board(Board::with_seed(config, seed)?))
    }

    pub fn from_board(board: Board) -> Self {
        let ai = KnowledgeBase::new(board.height(), board.width());
        Self {
            board,
            ai,
            revealed: BTreeMap::new(),
            flags: BTreeSet::new(),
            status: GameStatus::InProgress,
            safe_moves: 0,
            guesses: 0,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.ai
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn revealed(&self) -> &BTreeMap<Cell, u8> {
        &self.revealed
    }

    /// Neighbor count of an opened cell
    pub fn count_at(&self, cell: Cell) -> Option<u8> {
        self.revealed.get(&cell).copied()
    }

    pub fn is_revealed(&self, cell: Cell) -> bool {
        self.revealed.contains_key(&cell)
    }

    pub fn flags(&self) -> &BTreeSet<Cell> {
        &self.flags
    }

    pub fn is_flagged(&self, cell: Cell) -> bool {
        self.flags.contains(&cell)
    }

    pub fn safe_moves(&self) -> usize {
        self.safe_moves
    }

    pub fn guesses(&self) -> usize {
        self.guesses
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Number of mines not yet covered by a flag (may go negative with wrong flags)
    pub fn mines_left(&self) -> isize {
        self.board.mine_count() as isize - self.flags.len() as isize
    }

    /// Open a cell. Flagged and already opened cells are left alone.
    pub fn open(&mut self, cell: Cell) -> Result<GameStatus> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        self.board.check_bounds(cell)?;
        if self.is_flagged(cell) || self.is_revealed(cell) {
            return Ok(self.status);
        }

        if self.board.is_mine(cell) {
            info!(%cell, "opened a mine");
            self.status = GameStatus::Lost { mine: cell };
            return Ok(self.status);
        }

        let count = self.board.nearby_mines(cell);
        self.revealed.insert(cell, count);
        let deduction = self.ai.add_knowledge(cell, count)?;
        debug!(
            %cell,
            count,
            new_safes = deduction.new_safes.len(),
            new_mines = deduction.new_mines.len(),
            "cell opened"
        );
        self.update_status();
        Ok(self.status)
    }

    /// Flag or unflag a hidden cell. Returns whether the cell is now flagged.
    pub fn toggle_flag(&mut self, cell: Cell) -> Result<bool> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        self.board.check_bounds(cell)?;
        if self.is_revealed(cell) {
            return Ok(false);
        }

        let flagged = if self.flags.remove(&cell) {
            false
        } else {
            self.flags.insert(cell)
        };
        self.update_status();
        Ok(flagged)
    }

    /// Let the knowledge base pick a move and play it, then flag every mine
    /// it has proven.
    pub fn ai_move(&mut self) -> Result<Move> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        let mv = self.ai.next_move()?;
        match mv.kind {
            MoveKind::Safe => self.safe_moves += 1,
            MoveKind::Guess { score } => {
                self.guesses += 1;
                debug!(cell = %mv.cell, score, "no safe move, guessing");
            }
        }

        // The engine does not see player flags
        self.flags.remove(&mv.cell);
        self.last_move = Some(mv);
        self.open(mv.cell)?;

        if !self.is_over() {
            self.ai.flag_mines(&mut self.flags);
            self.update_status();
        }
        Ok(mv)
    }

    /// Play AI moves until the game ends
    pub fn autoplay(&mut self) -> Result<GameStatus> {
        while !self.is_over() {
            self.ai_move()?;
        }
        info!(
            status = ?self.status,
            safe_moves = self.safe_moves,
            guesses = self.guesses,
            "autoplay finished"
        );
        Ok(self.status)
    }

    fn update_status(&mut self) {
        if self.is_over() {
            return;
        }
        if self.revealed.len() + self.board.mine_count() == self.board.cell_count() {
            self.flags = self.board.mines().clone();
            self.status = GameStatus::Won;
        } else if self.board.won(&self.flags) {
            self.status = GameStatus::Won;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    /// 3x3 with a single mine in the bottom-right corner
    fn corner_game() -> Game {
        Game::from_board(Board::from_mines(3, 3, [c(2, 2)]).unwrap())
    }

    #[test]
    fn test_open_safe_cell_feeds_knowledge() {
        let mut game = corner_game();
        assert_eq!(game.open(c(0, 0)).unwrap(), GameStatus::InProgress);
        assert_eq!(game.count_at(c(0, 0)), Some(0));
        assert!(game.knowledge().safes().contains(&c(1, 1)));
        assert!(game.knowledge().moves_made().contains(&c(0, 0)));

        // Opening twice changes nothing
        game.open(c(0, 0)).unwrap();
        assert_eq!(game.revealed().len(), 1);
    }

    #[test]
    fn test_open_mine_loses() {
        let mut game = corner_game();
        assert_eq!(game.open(c(2, 2)).unwrap(), GameStatus::Lost { mine: c(2, 2) });
        assert!(game.is_over());
        assert_eq!(game.open(c(0, 0)), Err(Error::GameOver));
        assert_eq!(game.ai_move(), Err(Error::GameOver));
    }

    #[test]
    fn test_open_out_of_bounds() {
        let mut game = corner_game();
        assert!(matches!(
            game.open(c(0, 3)),
            Err(Error::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_flags() {
        let mut game = corner_game();
        assert!(game.toggle_flag(c(0, 2)).unwrap());
        assert!(game.is_flagged(c(0, 2)));
        assert_eq!(game.mines_left(), 0);

        // Flagged cells do not open
        game.open(c(0, 2)).unwrap();
        assert!(!game.is_revealed(c(0, 2)));

        assert!(!game.toggle_flag(c(0, 2)).unwrap());
        assert!(!game.is_flagged(c(0, 2)));

        game.open(c(0, 0)).unwrap();
        assert!(!game.toggle_flag(c(0, 0)).unwrap());
        assert!(game.flags().is_empty());
    }

    #[test]
    fn test_flagging_every_mine_wins() {
        let mut game = corner_game();
        game.toggle_flag(c(2, 2)).unwrap();
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn test_revealing_every_safe_cell_wins_and_flags_mines() {
        let mut game = Game::from_board(Board::from_mines(1, 3, [c(0, 2)]).unwrap());
        game.open(c(0, 0)).unwrap();
        assert_eq!(game.status(), GameStatus::InProgress);
        game.open(c(0, 1)).unwrap();
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.flags(), &BTreeSet::from([c(0, 2)]));
    }

    #[test]
    fn test_ai_clears_corner_board() {
        let mut game = corner_game();
        let first = game.ai_move().unwrap();
        assert_eq!(first.cell, c(0, 0));
        assert_eq!(first.kind, MoveKind::Guess { score: 0 });

        assert_eq!(game.autoplay().unwrap(), GameStatus::Won);
        assert_eq!(game.guesses(), 1);
        assert!(game.safe_moves() > 0);
        assert_eq!(game.flags(), &BTreeSet::from([c(2, 2)]));
    }

    #[test]
    fn test_ai_overrides_wrong_player_flag() {
        let mut game = corner_game();
        game.toggle_flag(c(0, 0)).unwrap();
        let mv = game.ai_move().unwrap();
        assert_eq!(mv.cell, c(0, 0));
        assert!(game.is_revealed(c(0, 0)));
        assert!(!game.is_flagged(c(0, 0)));
    }

    #[test]
    fn test_autoplay_never_opens_a_proven_mine() {
        let config = BoardConfig::beginner();
        let mut wins = 0;
        for seed in 0..20 {
            let mut game = Game::with_seed(&config, seed).unwrap();
            while !game.is_over() {
                let proven_mines = game.knowledge().mines().clone();
                let mv = game.ai_move().unwrap();
                assert!(!proven_mines.contains(&mv.cell), "seed {}: opened {}", seed, mv.cell);
                if mv.is_safe() {
                    assert!(!game.board().is_mine(mv.cell), "seed {}: unsound {}", seed, mv);
                }
                if !game.is_over() {
                    assert!(game.flags().is_subset(game.board().mines()));
                }
            }

            match game.status() {
                GameStatus::Won => wins += 1,
                GameStatus::Lost { mine } => {
                    let last = game.last_move().unwrap();
                    assert_eq!(last.cell, mine);
                    assert!(!last.is_safe());
                }
                GameStatus::InProgress => unreachable!(),
            }
        }
        assert!(wins > 0);
    }
}
