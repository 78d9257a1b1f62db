//! Input parsing and word suggestions.

mod command;
mod suggest;

pub use command::{Command, parse};
pub use suggest::suggest_word;
