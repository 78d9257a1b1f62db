//! Content rules.
//!
//! A rule pairs a trigger with a condition and a list of effects. Rules are
//! immutable once loaded; whether a one-shot rule has already fired is kept
//! in the world state.

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::effect::Effect;
use crate::token::Token;

/// What makes a rule eligible to fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// A player command. Absent objects match anything.
    Command {
        /// Canonical verb.
        verb: Token,
        /// Required direct object, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        object: Option<Token>,
        /// Required indirect object, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        object2: Option<Token>,
    },
    /// Checked after every completed turn.
    Turn,
    /// Fired only by a timer reaching zero.
    Timer,
}

impl Trigger {
    /// Whether a command with this verb and objects matches the trigger.
    pub fn matches(&self, verb: &Token, object: Option<&Token>, object2: Option<&Token>) -> bool {
        match self {
            Self::Command {
                verb: want,
                object: want_object,
                object2: want_object2,
            } => {
                want == verb
                    && want_object.as_ref().is_none_or(|w| object == Some(w))
                    && want_object2.as_ref().is_none_or(|w| object2 == Some(w))
            }
            Self::Turn | Self::Timer => false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A content-defined override of engine behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule id. One-shot bookkeeping is keyed by it.
    pub id: String,
    /// Room the rule is scoped to. `None` means global.
    #[serde(default)]
    pub room: Option<String>,
    /// What makes the rule eligible.
    pub trigger: Trigger,
    /// Must hold for the rule to fire.
    #[serde(default)]
    pub condition: Condition,
    /// Mutations applied in order when the rule fires.
    #[serde(default)]
    pub effects: Vec<Effect>,
    /// Text shown after the effects are applied.
    #[serde(default)]
    pub text: Option<String>,
    /// Fires at most once per session.
    #[serde(default)]
    pub once: bool,
    /// Higher priorities are checked first. Ties keep declared order.
    #[serde(default)]
    pub priority: i32,
    /// Skip the built-in action when this rule fires.
    #[serde(default = "default_true")]
    pub override_builtin: bool,
}

impl Rule {
    /// Whether the rule applies in the given room.
    pub fn in_scope(&self, room: &str) -> bool {
        self.room.as_deref().is_none_or(|r| r == room)
    }

    /// Whether the rule responds to player commands.
    pub fn is_command(&self) -> bool {
        matches!(self.trigger, Trigger::Command { .. })
    }

    /// Whether the rule runs every turn.
    pub fn is_turn(&self) -> bool {
        matches!(self.trigger, Trigger::Turn)
    }
}
