//! "Did you mean" suggestions for unknown words.

use rift_core::{Vocabulary, WordClass};
use strsim::jaro_winkler;

/// Minimum similarity for a suggestion (0.0-1.0).
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// The known noun or direction phrase closest to `word`, if any is similar
/// enough to be worth offering.
pub fn suggest_word(vocab: &Vocabulary, word: &str) -> Option<String> {
    let word = word.to_lowercase();
    vocab
        .entries()
        .filter(|(_, _, class)| *class != WordClass::Verb)
        .map(|(surface, _, _)| (surface, jaro_winkler(&word, surface)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(surface, _)| surface.to_string())
}
