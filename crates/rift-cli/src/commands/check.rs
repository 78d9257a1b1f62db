use std::path::Path;

use rift_core::Vocabulary;

pub fn run(dir: &Path) -> Result<(), String> {
    let content = super::load_content(dir)?;
    let vocabulary = Vocabulary::from_content(&content).map_err(|e| e.to_string())?;

    println!("  All checks passed for '{}'.", content.manifest.title);
    println!(
        "  {} rooms, {} items, {} rules, {} timers, {} words",
        content.rooms.len(),
        content.items.len(),
        content.rules.len(),
        content.timers.len(),
        vocabulary.len()
    );

    Ok(())
}
