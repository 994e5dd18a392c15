mod app;
mod render;
mod stats;
mod theme;

use anyhow::Context;
use app::App;
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use minesweeper_core::{BoardConfig, Difficulty, Game};
use rand::Rng;
use stats::{AutoplayReport, GameRecord};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minesweeper", version, about = "Minesweeper with an AI that plays by inference")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    board: BoardArgs,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Play in the terminal (default)
    Play,
    /// Let the AI play a batch of games headless and report the results
    Auto {
        /// Number of games to play
        #[arg(long, default_value_t = 100)]
        games: usize,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct BoardArgs {
    /// Standard board size
    #[arg(long, value_enum, global = true)]
    difficulty: Option<Level>,
    /// Rows, overriding the difficulty
    #[arg(long, global = true)]
    height: Option<usize>,
    /// Columns, overriding the difficulty
    #[arg(long, global = true)]
    width: Option<usize>,
    /// Mine count, overriding the difficulty
    #[arg(long, global = true)]
    mines: Option<usize>,
    /// Seed for reproducible boards
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => Difficulty::Beginner,
            Level::Intermediate => Difficulty::Intermediate,
            Level::Expert => Difficulty::Expert,
        }
    }
}

impl BoardArgs {
    fn config(&self) -> anyhow::Result<BoardConfig> {
        let base = self
            .difficulty
            .map(|level| Difficulty::from(level).config())
            .unwrap_or_default();
        let config = BoardConfig::new(
            self.height.unwrap_or(base.height),
            self.width.unwrap_or(base.width),
            self.mines.unwrap_or(base.mines),
        )?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.board.config()?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            // stderr belongs to the terminal UI, so only log when given a file
            init_logging(cli.log_file.as_deref(), false)?;
            run_tui(config, cli.board.seed)
        }
        Command::Auto { games, json } => {
            init_logging(cli.log_file.as_deref(), true)?;
            run_auto(config, cli.board.seed, games, json)
        }
    }
}

fn init_logging(log_file: Option<&Path>, stderr_fallback: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if stderr_fallback => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn run_auto(config: BoardConfig, seed: Option<u64>, games: usize, json: bool) -> anyhow::Result<()> {
    let base = seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(games, base_seed = base, "starting autoplay batch");

    let mut report = AutoplayReport::new(config);
    for i in 0..games {
        let game_seed = base.wrapping_add(i as u64);
        let mut game = Game::with_seed(&config, game_seed)?;
        game.autoplay()
            .with_context(|| format!("autoplay failed for seed {}", game_seed))?;
        if let Some(record) = GameRecord::from_game(&game, Some(game_seed)) {
            report.push(record);
        }
    }

    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn run_tui(config: BoardConfig, seed: Option<u64>) -> anyhow::Result<()> {
    let mut app = App::new(config, seed)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    result?;
    if app.session.total_games > 0 {
        println!(
            "Session: {} won, {} lost",
            app.session.wins, app.session.losses
        );
    }
    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout for autoplay updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
