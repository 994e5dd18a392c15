//! Basic example of using the Minesweeper engine

use minesweeper_core::{BoardConfig, Cell, Game, GameStatus, KnowledgeBase};

fn main() -> minesweeper_core::Result<()> {
    // Feed observations to a bare knowledge base
    println!("Opening cells on an empty 3x3 board...\n");
    let mut kb = KnowledgeBase::new(3, 3);
    let deduction = kb.add_knowledge(Cell::new(0, 0), 0)?;
    println!("(0, 0) shows 0, proven safe: {:?}", deduction.new_safes);

    kb.add_knowledge(Cell::new(0, 1), 0)?;
    kb.add_knowledge(Cell::new(1, 0), 0)?;
    let deduction = kb.add_knowledge(Cell::new(1, 1), 1)?;
    println!("(1, 1) shows 1, proven mines: {:?}", deduction.new_mines);

    println!("Remaining knowledge:");
    for sentence in kb.knowledge() {
        println!("  {}", sentence);
    }
    match kb.make_safe_move() {
        Some(cell) => println!("Next safe move: {}\n", cell),
        None => println!("No safe move, best guess: {}\n", kb.make_random_move()?),
    }

    // Let the AI play a whole beginner game
    let config = BoardConfig::beginner();
    let mut game = Game::with_seed(&config, 42)?;
    println!("Board ({} mines):", config.mines);
    println!("{}", game.board());

    let status = game.autoplay()?;
    match status {
        GameStatus::Won => println!("AI won"),
        GameStatus::Lost { mine } => println!("AI hit a mine at {}", mine),
        GameStatus::InProgress => unreachable!("autoplay returns only when the game is over"),
    }
    println!(
        "Safe moves: {}, guesses: {}, cells opened: {}",
        game.safe_moves(),
        game.guesses(),
        game.revealed().len()
    );
    Ok(())
}
