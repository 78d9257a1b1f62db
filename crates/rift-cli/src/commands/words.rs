use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use rift_core::Vocabulary;

pub fn run(dir: &Path) -> Result<(), String> {
    let content = super::load_content(dir)?;
    let vocabulary = Vocabulary::from_content(&content).map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Word", "Class", "Means"]);

    for (surface, token, class) in vocabulary.entries() {
        table.add_row(vec![surface.to_string(), class.to_string(), token.to_string()]);
    }

    println!("{table}");
    println!();
    println!("  {} words", vocabulary.len());

    Ok(())
}
