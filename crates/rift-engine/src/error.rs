//! Error types for the engine.
//!
//! Parse, action, and save failures are ordinary outcomes of a turn: their
//! `Display` text is what the player reads, and none of them change state.
//! Only [`EngineError`] is fatal, and only while a session is being built.

use std::path::PathBuf;

use rift_core::ContentError;
use thiserror::Error;

/// Result type for session construction.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that stop a session from starting.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The content failed to load or validate.
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Input that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// Nothing but whitespace.
    #[error("I beg your pardon?")]
    EmptyInput,

    /// The sentence does not start with a known verb or direction.
    #[error("I don't know how to \"{0}\".")]
    UnknownVerb(String),

    /// A word after the verb is not a known noun.
    #[error("I don't know the word \"{word}\".{}", did_you_mean(.suggestion))]
    UnknownNoun {
        /// The unrecognised word.
        word: String,
        /// The closest known word, if one is close enough.
        suggestion: Option<String>,
    },

    /// More than two objects after the verb.
    #[error("You can only do that with one or two things at a time.")]
    TooManyObjects,
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" Did you mean \"{s}\"?"))
        .unwrap_or_default()
}

/// A built-in action that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionFailure {
    /// No exit leads that way.
    #[error("You can't go that way.")]
    NoExit,

    /// The exit exists but its gate is closed.
    #[error("{0}")]
    ExitBlocked(String),

    /// The item is neither here nor carried.
    #[error("You don't see any {0} here.")]
    ItemNotFound(String),

    /// The item is fixed in place.
    #[error("You can't take the {0}.")]
    NotPortable(String),

    /// The verb needs an object the player did not give.
    #[error("{0}")]
    MissingObject(&'static str),

    /// TAKE on something already carried.
    #[error("You already have that.")]
    AlreadyCarrying,

    /// The item has to be carried for this.
    #[error("You're not carrying the {0}.")]
    NotCarrying(String),

    /// The inventory limit is reached.
    #[error("You're carrying too much already.")]
    InventoryFull,

    /// GO with something that is not a direction.
    #[error("I don't understand the direction \"{0}\".")]
    NotADirection(String),

    /// A content verb that no rule handled here.
    #[error("You can't do that here.")]
    Unhandled,
}

/// A save file that could not be written or restored.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The save file could not be read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// The save file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The save data does not describe a valid state for this adventure.
    #[error("corrupt save: {0}")]
    Corrupt(String),
}
