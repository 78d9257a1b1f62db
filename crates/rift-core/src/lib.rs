//! Core types for Rift: the static content model and the mutable world state.
//!
//! This crate defines everything a text adventure is made of: rooms, items,
//! the vocabulary the player types, and the condition-gated rules that let
//! content override engine behavior. It is independent of the command
//! pipeline. Content is loaded from a directory of JSON files or built
//! programmatically, then validated once before play.

/// Condition trees evaluated against world state.
pub mod condition;
/// Rooms, exits, items, timers, the manifest, and content loading.
pub mod content;
/// Movement directions.
pub mod direction;
/// State mutations applied by rules.
pub mod effect;
/// Error types used throughout the crate.
pub mod error;
/// Content rules: triggers, scopes, and effects.
pub mod rule;
/// The mutable world state of a session.
pub mod state;
/// Canonical tokens produced by vocabulary lookup.
pub mod token;
/// Load-time validation of content references.
pub mod validate;
/// Surface-word to token mapping.
pub mod vocabulary;

/// Re-export content types.
pub use condition::Condition;
pub use content::{Content, Exit, Item, Manifest, Room, Synonyms, Timer};
pub use direction::Direction;
pub use effect::{Effect, Outcome};
/// Re-export error types.
pub use error::{ContentError, ContentResult};
pub use rule::{Rule, Trigger};
/// Re-export world state types.
pub use state::{Ending, ItemLocation, RoomState, WorldState};
pub use token::Token;
pub use validate::{evaluation_order, validate};
pub use vocabulary::{Vocabulary, WordClass};
