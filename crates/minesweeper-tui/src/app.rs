use crate::stats::{GameRecord, Summary};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use minesweeper_core::{BoardConfig, Cell, Game, Result};
use std::time::Duration;
use tracing::{info, warn};

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// The main application state
pub struct App {
    /// Current game
    pub game: Game,
    /// Board size and mine count for new games
    pub config: BoardConfig,
    /// Base seed; game `n` of the session uses `seed + n`
    seed: Option<u64>,
    games_started: u64,
    /// Seed of the current game, if reproducible
    pub game_seed: Option<u64>,
    /// Currently selected cell
    pub cursor: Cell,
    /// Color theme
    pub theme: Theme,
    theme_index: usize,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Whether the AI plays one move per tick
    pub autoplay: bool,
    /// Whether to mark cells the AI has classified
    pub show_knowledge: bool,
    /// Results of games finished this session
    pub session: Summary,
    /// Whether current game has been recorded (to avoid double recording)
    game_recorded: bool,
}

impl App {
    pub fn new(config: BoardConfig, seed: Option<u64>) -> Result<Self> {
        let game_seed = seed;
        let game = match game_seed {
            Some(seed) => Game::with_seed(&config, seed)?,
            None => Game::new(&config)?,
        };
        Ok(Self {
            game,
            config,
            seed,
            games_started: 1,
            game_seed,
            cursor: Cell::new(config.height / 2, config.width / 2),
            theme: Theme::dark(),
            theme_index: 0,
            message: None,
            message_timer: 0,
            autoplay: false,
            show_knowledge: false,
            session: Summary::default(),
            game_recorded: false,
        })
    }

    /// Get the tick rate; autoplay moves once per tick
    pub fn get_tick_rate(&self) -> Duration {
        if self.autoplay {
            Duration::from_millis(60)
        } else {
            Duration::from_millis(100)
        }
    }

    /// Update timers and autoplay (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.autoplay && !self.game.is_over() {
            self.ai_move();
        }
        if self.game.is_over() {
            self.autoplay = false;
            self.record_game();
        }
    }

    fn record_game(&mut self) {
        if self.game_recorded {
            return;
        }
        if let Some(record) = GameRecord::from_game(&self.game, self.game_seed) {
            info!(result = ?record.result, guesses = record.guesses, "game finished");
            self.session.record(&record);
            self.game_recorded = true;
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Start a new game with the current configuration
    pub fn new_game(&mut self) {
        let game_seed = self.seed.map(|seed| seed.wrapping_add(self.games_started));
        let game = match game_seed {
            Some(seed) => Game::with_seed(&self.config, seed),
            None => Game::new(&self.config),
        };
        match game {
            Ok(game) => {
                self.game = game;
                self.game_seed = game_seed;
                self.games_started += 1;
                self.game_recorded = false;
                self.autoplay = false;
                self.show_message("New game");
            }
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, e: minesweeper_core::Error) {
        warn!(error = %e, "action failed");
        self.show_message(&e.to_string());
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            KeyCode::Char('n') => self.new_game(),
            KeyCode::Enter if self.game.is_over() => self.new_game(),

            // Open / flag
            KeyCode::Char(' ') | KeyCode::Enter => self.open_cursor(),
            KeyCode::Char('f') => self.flag_cursor(),

            // AI
            KeyCode::Char('a') => self.ai_move(),
            KeyCode::Char('p') => {
                if self.game.is_over() {
                    self.show_message("Game over, press n for a new game");
                } else {
                    self.autoplay = !self.autoplay;
                    let msg = if self.autoplay { "Autoplay on" } else { "Autoplay off" };
                    self.show_message(msg);
                }
            }
            KeyCode::Char('v') => {
                self.show_knowledge = !self.show_knowledge;
                let msg = if self.show_knowledge {
                    "Showing AI knowledge"
                } else {
                    "Hiding AI knowledge"
                };
                self.show_message(msg);
            }

            // Theme toggle
            KeyCode::Char('t') => self.cycle_theme(),

            _ => {}
        }
        AppAction::Continue
    }

    fn move_cursor(&mut self, drow: isize, dcol: isize) {
        let height = self.config.height as isize;
        let width = self.config.width as isize;
        let row = (self.cursor.row as isize + drow).rem_euclid(height);
        let col = (self.cursor.col as isize + dcol).rem_euclid(width);
        self.cursor = Cell::new(row as usize, col as usize);
    }

    fn open_cursor(&mut self) {
        if self.game.is_flagged(self.cursor) {
            self.show_message("Cell is flagged");
            return;
        }
        if let Err(e) = self.game.open(self.cursor) {
            self.report(e);
        }
    }

    fn flag_cursor(&mut self) {
        if let Err(e) = self.game.toggle_flag(self.cursor) {
            self.report(e);
        }
    }

    fn ai_move(&mut self) {
        match self.game.ai_move() {
            Ok(mv) => {
                self.cursor = mv.cell;
                if !self.autoplay {
                    self.show_message(&format!("AI: {}", mv));
                }
            }
            Err(e) => {
                self.autoplay = false;
                self.report(e);
            }
        }
    }

    fn cycle_theme(&mut self) {
        let presets = Theme::presets();
        self.theme_index = (self.theme_index + 1) % presets.len();
        self.theme = presets[self.theme_index].clone();
        let msg = format!("Theme: {}", self.theme.name);
        self.show_message(&msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use minesweeper_core::GameStatus;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        App::new(BoardConfig::beginner(), Some(11)).unwrap()
    }

    #[test]
    fn test_cursor_wraps() {
        let mut app = app();
        app.cursor = Cell::new(0, 0);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, Cell::new(8, 0));
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, Cell::new(8, 8));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.cursor, Cell::new(8, 0));
    }

    #[test]
    fn test_flag_and_open_keys() {
        let mut app = app();
        app.cursor = Cell::new(0, 0);
        press(&mut app, KeyCode::Char('f'));
        assert!(app.game.is_flagged(Cell::new(0, 0)));

        // Flagged cells are protected from opening
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.game.is_revealed(Cell::new(0, 0)));

        press(&mut app, KeyCode::Char('f'));
        assert!(!app.game.is_flagged(Cell::new(0, 0)));
    }

    #[test]
    fn test_ai_key_moves_cursor() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        let last = app.game.last_move().unwrap();
        assert_eq!(app.cursor, last.cell);
        assert!(app.message.is_some());
    }

    #[test]
    fn test_autoplay_finishes_and_records() {
        let mut app = app();
        press(&mut app, KeyCode::Char('p'));
        assert!(app.autoplay);
        let limit = app.config.cell_count();
        for _ in 0..=limit {
            app.tick();
        }
        assert!(app.game.is_over());
        assert!(!app.autoplay);
        assert_eq!(app.session.total_games, 1);

        // Recorded once only
        app.tick();
        assert_eq!(app.session.total_games, 1);
    }

    #[test]
    fn test_new_games_follow_seed() {
        let mut app = app();
        assert_eq!(app.game_seed, Some(11));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.game_seed, Some(12));
        assert_eq!(app.game.status(), GameStatus::InProgress);
        assert!(app.game.revealed().is_empty());
    }

    #[test]
    fn test_theme_cycles() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.name, "Light");
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme.name, "Dark");
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(matches!(
            app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            AppAction::Quit
        ));
    }
}
