use minesweeper_core::{BoardConfig, Game, GameStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    /// `None` while the game is still running
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::Won => Some(GameResult::Win),
            GameStatus::Lost { .. } => Some(GameResult::Loss),
            GameStatus::InProgress => None,
        }
    }
}

/// Record of a single finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Seed the board was generated from, if known
    pub seed: Option<u64>,
    pub result: GameResult,
    /// AI moves played from proven-safe cells
    pub safe_moves: usize,
    /// AI moves that had to guess
    pub guesses: usize,
    pub cells_opened: usize,
    /// Mines the AI proved before the game ended
    pub mines_proven: usize,
}

impl GameRecord {
    pub fn from_game(game: &Game, seed: Option<u64>) -> Option<Self> {
        Some(Self {
            seed,
            result: GameResult::from_status(game.status())?,
            safe_moves: game.safe_moves(),
            guesses: game.guesses(),
            cells_opened: game.revealed().len(),
            mines_proven: game.knowledge().mines().len(),
        })
    }
}

/// Aggregate over many games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_games: usize,
    pub wins: usize,
    pub losses: usize,
    pub safe_moves: usize,
    pub guesses: usize,
    pub current_streak: i32, // Positive = win streak, negative = loss streak
    pub best_streak: i32,
}

impl Summary {
    pub fn record(&mut self, record: &GameRecord) {
        self.total_games += 1;
        self.safe_moves += record.safe_moves;
        self.guesses += record.guesses;
        match record.result {
            GameResult::Win => {
                self.wins += 1;
                self.current_streak = self.current_streak.max(0) + 1;
                self.best_streak = self.best_streak.max(self.current_streak);
            }
            GameResult::Loss => {
                self.losses += 1;
                self.current_streak = self.current_streak.min(0) - 1;
            }
        }
    }

    pub fn win_rate(&self) -> f32 {
        if self.total_games > 0 {
            self.wins as f32 / self.total_games as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn avg_guesses(&self) -> f32 {
        if self.total_games > 0 {
            self.guesses as f32 / self.total_games as f32
        } else {
            0.0
        }
    }
}

/// Output of a headless autoplay batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplayReport {
    pub config: BoardConfig,
    pub summary: Summary,
    pub games: Vec<GameRecord>,
}

impl AutoplayReport {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            summary: Summary::default(),
            games: Vec::new(),
        }
    }

    pub fn push(&mut self, record: GameRecord) {
        self.summary.record(&record);
        self.games.push(record);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for AutoplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(
            f,
            "Board: {}x{} with {} mines",
            self.config.height, self.config.width, self.config.mines
        )?;
        writeln!(f, "Games:        {}", s.total_games)?;
        writeln!(f, "Wins:         {} ({:.1}%)", s.wins, s.win_rate())?;
        writeln!(f, "Losses:       {}", s.losses)?;
        writeln!(f, "Safe moves:   {}", s.safe_moves)?;
        writeln!(f, "Guesses:      {} ({:.2} per game)", s.guesses, s.avg_guesses())?;
        writeln!(f, "Best streak:  {}", s.best_streak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minesweeper_core::{Board, Cell};

    fn record(result: GameResult, guesses: usize) -> GameRecord {
        GameRecord {
            seed: None,
            result,
            safe_moves: 5,
            guesses,
            cells_opened: 5 + guesses,
            mines_proven: 1,
        }
    }

    #[test]
    fn test_summary_streaks() {
        let mut summary = Summary::default();
        for result in [GameResult::Win, GameResult::Win, GameResult::Loss, GameResult::Win] {
            summary.record(&record(result, 1));
        }
        assert_eq!(summary.total_games, 4);
        assert_eq!(summary.wins, 3);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.best_streak, 2);
        assert_eq!(summary.current_streak, 1);
        assert_eq!(summary.win_rate(), 75.0);
        assert_eq!(summary.avg_guesses(), 1.0);

        summary.record(&record(GameResult::Loss, 0));
        summary.record(&record(GameResult::Loss, 0));
        assert_eq!(summary.current_streak, -2);
    }

    #[test]
    fn test_empty_summary_rates() {
        let summary = Summary::default();
        assert_eq!(summary.win_rate(), 0.0);
        assert_eq!(summary.avg_guesses(), 0.0);
    }

    #[test]
    fn test_record_requires_finished_game() {
        let board = Board::from_mines(3, 3, [Cell::new(2, 2)]).unwrap();
        let mut game = Game::from_board(board);
        assert!(GameRecord::from_game(&game, Some(9)).is_none());

        game.autoplay().unwrap();
        let record = GameRecord::from_game(&game, Some(9)).unwrap();
        assert_eq!(record.result, GameResult::Win);
        assert_eq!(record.seed, Some(9));
        // Won by flagging once (2, 2) was proven, before every safe cell was opened
        assert_eq!(record.cells_opened, 5);
        assert_eq!(record.mines_proven, 1);
    }

    #[test]
    fn test_report_json() {
        let mut report = AutoplayReport::new(BoardConfig::beginner());
        report.push(record(GameResult::Win, 2));
        report.push(record(GameResult::Loss, 3));

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["summary"]["wins"], 1);
        assert_eq!(value["summary"]["guesses"], 5);
        assert_eq!(value["games"][1]["result"], "loss");
        assert_eq!(value["config"]["mines"], 10);
    }
}
