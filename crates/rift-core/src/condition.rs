//! Condition trees over world state.
//!
//! Conditions are pure data. The engine evaluates them; this crate only
//! describes their shape and which content ids they reference.

use serde::{Deserialize, Serialize};

use crate::validate::Reference;

/// A predicate tree tested against the world state.
///
/// Deserialized from a tagged JSON object such as
/// `{"type": "item_in_inventory", "item": "pry_bar"}`. An unknown `type`
/// fails deserialization, so a malformed condition never reaches play.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// The player is in the given room.
    PlayerIn {
        /// Room id.
        room: String,
    },
    /// The item is carried by the player.
    ItemInInventory {
        /// Item id.
        item: String,
    },
    /// The item lies in the given room.
    ItemInRoom {
        /// Item id.
        item: String,
        /// Room id.
        room: String,
    },
    /// The item lies in the player's current room.
    ItemHere {
        /// Item id.
        item: String,
    },
    /// The item is somewhere in the world (not destroyed).
    ItemExists {
        /// Item id.
        item: String,
    },
    /// A global flag is set.
    FlagSet {
        /// Flag name.
        flag: String,
    },
    /// A flag on a specific room is set.
    RoomFlagSet {
        /// Room id.
        room: String,
        /// Flag name.
        flag: String,
    },
    /// The room has been entered at least once.
    Visited {
        /// Room id.
        room: String,
    },
    /// The score is at least `points`.
    ScoreAtLeast {
        /// Threshold.
        points: i64,
    },
    /// A counter is at least `value`.
    CounterAtLeast {
        /// Counter name.
        counter: String,
        /// Threshold.
        value: i64,
    },
    /// A counter is at most `value`.
    CounterAtMost {
        /// Counter name.
        counter: String,
        /// Threshold.
        value: i64,
    },
    /// A counter equals `value`.
    CounterEquals {
        /// Counter name.
        counter: String,
        /// Expected value.
        value: i64,
    },
    /// Every child holds. Empty is true.
    And {
        /// Children, checked left to right.
        all: Vec<Condition>,
    },
    /// At least one child holds. Empty is false.
    Or {
        /// Children, checked left to right.
        any: Vec<Condition>,
    },
    /// The child does not hold.
    Not {
        /// The negated condition.
        condition: Box<Condition>,
    },
    /// Always true.
    #[default]
    Always,
}

impl Condition {
    /// Shorthand for `Condition::And`.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::And {
            all: conditions.into_iter().collect(),
        }
    }

    /// Shorthand for `Condition::Or`.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Or {
            any: conditions.into_iter().collect(),
        }
    }

    /// Shorthand for `Condition::Not`.
    pub fn negate(condition: Condition) -> Self {
        Self::Not {
            condition: Box::new(condition),
        }
    }

    /// Whether this is the trivially true condition.
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Collect every room and item id this condition mentions.
    pub(crate) fn references<'a>(&'a self, out: &mut Vec<Reference<'a>>) {
        match self {
            Self::PlayerIn { room } | Self::Visited { room } => out.push(Reference::Room(room)),
            Self::RoomFlagSet { room, .. } => out.push(Reference::Room(room)),
            Self::ItemInInventory { item } | Self::ItemHere { item } | Self::ItemExists { item } => {
                out.push(Reference::Item(item))
            }
            Self::ItemInRoom { item, room } => {
                out.push(Reference::Item(item));
                out.push(Reference::Room(room));
            }
            Self::And { all: children } | Self::Or { any: children } => {
                for child in children {
                    child.references(out);
                }
            }
            Self::Not { condition } => condition.references(out),
            Self::FlagSet { .. }
            | Self::ScoreAtLeast { .. }
            | Self::CounterAtLeast { .. }
            | Self::CounterAtMost { .. }
            | Self::CounterEquals { .. }
            | Self::Always => {}
        }
    }
}
