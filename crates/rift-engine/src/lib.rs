//! Command resolution for Rift text adventures.
//!
//! A line of player input flows through a fixed pipeline: the parser folds
//! it onto canonical tokens, the event manager looks for a content rule that
//! overrides the command, and the built-in actions handle whatever no rule
//! claimed. [`Session`] drives that pipeline one turn at a time and owns the
//! world state; everything else here is stateless.

/// Built-in fallback actions and room descriptions.
pub mod actions;
/// Condition evaluation against world state.
pub mod condition;
/// Session configuration.
pub mod config;
/// Error types for the engine.
pub mod error;
/// Rule selection, effects, and timers.
pub mod events;
/// Input parsing.
pub mod parser;
/// Save file encoding and validation.
pub mod save;
/// The turn loop.
pub mod session;

#[cfg(test)]
mod testing;

pub use condition::evaluate;
pub use config::SessionConfig;
pub use error::{ActionFailure, EngineError, EngineResult, ParseFailure, SaveError};
pub use events::{EventManager, EventResult};
pub use parser::{Command, parse};
pub use session::{Phase, Session, TurnOutcome};
