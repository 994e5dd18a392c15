use crate::app::App;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use minesweeper_core::{Cell, GameStatus, MoveKind};
use std::io;

/// Width of one cell on screen
const CELL_WIDTH: u16 = 2;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    let grid_width = app.config.width as u16 * CELL_WIDTH + 3;
    let grid_height = app.config.height as u16 + 2;

    // Center the board horizontally, leave room for info panel
    let total_width = grid_width + 30;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > grid_height + 8 { 2 } else { 1 };

    render_board(stdout, app, start_x, start_y)?;
    render_info_panel(stdout, app, start_x + grid_width + 3, start_y)?;
    render_controls(stdout, app, start_x, start_y + grid_height.max(18) + 1)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_board(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let width = app.config.width;
    let rule = format!("+{}+", "-".repeat(width * CELL_WIDTH as usize + 1));

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        MoveTo(x, y),
        Print(&rule)
    )?;

    for row in 0..app.config.height {
        let cell_y = y + 1 + row as u16;
        execute!(
            stdout,
            MoveTo(x, cell_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|")
        )?;
        for col in 0..width {
            render_cell(stdout, app, Cell::new(row, col))?;
        }
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print(" |")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y + 1 + app.config.height as u16),
        Print(&rule)
    )?;
    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, cell: Cell) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let kb = game.knowledge();
    let exploded = matches!(game.status(), GameStatus::Lost { mine } if mine == cell);

    let (glyph, fg) = if let Some(count) = game.count_at(cell) {
        match theme.number(count) {
            Some(color) => (char::from(b'0' + count), color),
            None => (' ', theme.fg),
        }
    } else if game.is_flagged(cell) {
        // A wrong flag is revealed once the game is lost
        if game.is_over() && !game.board().is_mine(cell) {
            ('X', theme.error)
        } else {
            ('F', theme.flag)
        }
    } else if game.is_over() && game.board().is_mine(cell) {
        ('*', theme.mine)
    } else if app.show_knowledge && kb.mines().contains(&cell) {
        ('x', theme.mine_hint)
    } else if app.show_knowledge && kb.safes().contains(&cell) {
        ('o', theme.safe_hint)
    } else {
        ('.', theme.hidden)
    };

    let bg = if cell == app.cursor {
        theme.cursor_bg
    } else if exploded {
        theme.error
    } else if game.is_revealed(cell) {
        theme.revealed_bg
    } else {
        theme.bg
    };

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(format!(" {}", glyph))
    )?;
    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let game = &app.game;
    let kb = game.knowledge();

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("=== MINESWEEPER ===")
    )?;

    let (status, status_color) = match game.status() {
        GameStatus::InProgress if app.autoplay => ("Autoplay".to_string(), theme.key),
        GameStatus::InProgress => ("Playing".to_string(), theme.fg),
        GameStatus::Won => ("Won!".to_string(), theme.success),
        GameStatus::Lost { mine } => (format!("Lost at {}", mine), theme.error),
    };

    let lines = [
        (
            format!(
                "Board: {:>12}",
                format!("{}x{}", app.config.height, app.config.width)
            ),
            theme.info,
        ),
        (format!("Mines left: {:>7}", game.mines_left()), theme.info),
        (format!("Status: {:>11}", status), status_color),
        (String::new(), theme.info),
        (format!("Safe moves: {:>7}", game.safe_moves()), theme.info),
        (format!("Guesses: {:>10}", game.guesses()), theme.info),
        (format!("Known safe: {:>7}", kb.safes().len()), theme.safe_hint),
        (format!("Known mines: {:>6}", kb.mines().len()), theme.mine_hint),
        (format!("Sentences: {:>8}", kb.sentence_count()), theme.info),
    ];
    for (i, (text, color)) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + 2 + i as u16),
            SetForegroundColor(*color),
            Print(text)
        )?;
    }

    let mut row = y + 2 + lines.len() as u16 + 1;
    if let Some(mv) = game.last_move() {
        let text = match mv.kind {
            MoveKind::Safe => format!("AI: safe {}", mv.cell),
            MoveKind::Guess { score } => format!("AI: guess {} ({})", mv.cell, score),
        };
        execute!(
            stdout,
            MoveTo(x, row),
            SetForegroundColor(theme.fg),
            Print(text)
        )?;
    }
    row += 2;

    // Current cell
    let cursor = app.cursor;
    execute!(
        stdout,
        MoveTo(x, row),
        SetForegroundColor(theme.info),
        Print(format!("Cell: {}", cursor))
    )?;
    if !game.is_revealed(cursor) && !kb.is_known(cursor) {
        execute!(
            stdout,
            MoveTo(x, row + 1),
            SetForegroundColor(theme.info),
            Print(format!("Risk score: {:>7}", kb.risk_score(cursor)))
        )?;
    }

    let session = &app.session;
    if session.total_games > 0 {
        execute!(
            stdout,
            MoveTo(x, row + 3),
            SetForegroundColor(theme.info),
            Print(format!(
                "Session: {}W {}L ({:.0}%)",
                session.wins,
                session.losses,
                session.win_rate()
            ))
        )?;
    }

    if let Some(seed) = app.game_seed {
        execute!(
            stdout,
            MoveTo(x, row + 4),
            SetForegroundColor(theme.border),
            Print(format!("Seed: {}", seed))
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("Space", "Open"),
        ("f", "Flag"),
        ("a", "AI move"),
        ("p", "Autoplay"),
        ("v", "AI knowledge"),
        ("n", "New game"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // Display in columns of 3
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 3;
        let row = i % 3;
        let cx = x + (col as u16) * 20;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.len() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.cursor_bg),
        Print(&padded)
    )?;

    Ok(())
}
