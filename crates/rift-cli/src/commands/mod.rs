pub mod check;
pub mod play;
pub mod words;

use std::path::Path;

use rift_core::{Content, ContentError};

/// Load and validate a content directory, printing every problem found.
fn load_content(dir: &Path) -> Result<Content, String> {
    Content::load_validated(dir).map_err(|e| {
        print_content_errors(&e);
        format!("{} is not playable", dir.display())
    })
}

/// Print content errors to stderr, one per line.
fn print_content_errors(error: &ContentError) {
    let errors = match error {
        ContentError::Invalid(errors) => errors.as_slice(),
        other => std::slice::from_ref(other),
    };
    for e in errors {
        eprintln!("  {e}");
    }
    eprintln!(
        "  {} error{}",
        errors.len(),
        if errors.len() == 1 { "" } else { "s" }
    );
}
