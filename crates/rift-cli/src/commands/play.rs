//! Interactive play loop.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;

use rift_engine::{Session, SessionConfig};

pub fn run(dir: &Path, save: Option<PathBuf>) -> Result<(), String> {
    let content = super::load_content(dir)?;
    let mut config = SessionConfig::default();
    if let Some(path) = save {
        config = config.with_save_path(path);
    }

    let mut session = Session::new(Arc::new(content), config)
        .map_err(|e| format!("failed to start session: {e}"))?;

    println!("  {}", session.content().manifest.title.bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");
    println!("{}\n", session.start().display_text);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    while !session.is_ended() {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let outcome = session.process_turn(input);
        if outcome.game_ended {
            println!("{}\n", outcome.display_text.bold());
        } else if !outcome.display_text.is_empty() {
            println!("{}\n", outcome.display_text);
        }
    }

    Ok(())
}
