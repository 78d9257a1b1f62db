//! Effects that modify world state.

use serde::{Deserialize, Serialize};

use crate::state::ItemLocation;
use crate::validate::Reference;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The player won.
    Won,
    /// The player lost.
    Lost,
}

/// A single state mutation applied when a rule fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Move an item to a room, the inventory, or nowhere.
    MoveItem {
        /// Item id.
        item: String,
        /// Destination.
        to: ItemLocation,
    },
    /// Move an item to nowhere.
    DestroyItem {
        /// Item id.
        item: String,
    },
    /// Replace an item with another at the same location.
    SwapItem {
        /// Item being replaced.
        item: String,
        /// Item taking its place.
        with: String,
    },
    /// Set a global flag.
    SetFlag {
        /// Flag name.
        flag: String,
    },
    /// Clear a global flag.
    ClearFlag {
        /// Flag name.
        flag: String,
    },
    /// Set a flag on a room.
    SetRoomFlag {
        /// Room id.
        room: String,
        /// Flag name.
        flag: String,
    },
    /// Clear a flag on a room.
    ClearRoomFlag {
        /// Room id.
        room: String,
        /// Flag name.
        flag: String,
    },
    /// Set a counter.
    SetCounter {
        /// Counter name.
        counter: String,
        /// New value.
        value: i64,
    },
    /// Add to a counter (negative to subtract).
    AddCounter {
        /// Counter name.
        counter: String,
        /// Amount to add.
        amount: i64,
    },
    /// Move the player.
    ChangeRoom {
        /// Destination room id.
        room: String,
    },
    /// Add points to the score.
    AddScore {
        /// Points to add.
        points: i64,
    },
    /// Mark a room as visited without entering it.
    MarkVisited {
        /// Room id.
        room: String,
    },
    /// Start a countdown timer.
    EnableTimer {
        /// Timer name.
        timer: String,
    },
    /// Stop a countdown timer.
    DisableTimer {
        /// Timer name.
        timer: String,
    },
    /// End the game.
    EndGame {
        /// Win or loss.
        outcome: Outcome,
    },
}

impl Effect {
    /// Collect every room, item, and timer id this effect mentions.
    pub(crate) fn references<'a>(&'a self, out: &mut Vec<Reference<'a>>) {
        match self {
            Self::MoveItem { item, to } => {
                out.push(Reference::Item(item));
                if let ItemLocation::Room(room) = to {
                    out.push(Reference::Room(room));
                }
            }
            Self::DestroyItem { item } => out.push(Reference::Item(item)),
            Self::SwapItem { item, with } => {
                out.push(Reference::Item(item));
                out.push(Reference::Item(with));
            }
            Self::SetRoomFlag { room, .. }
            | Self::ClearRoomFlag { room, .. }
            | Self::ChangeRoom { room }
            | Self::MarkVisited { room } => out.push(Reference::Room(room)),
            Self::EnableTimer { timer } | Self::DisableTimer { timer } => {
                out.push(Reference::Timer(timer))
            }
            Self::SetFlag { .. }
            | Self::ClearFlag { .. }
            | Self::SetCounter { .. }
            | Self::AddCounter { .. }
            | Self::AddScore { .. }
            | Self::EndGame { .. } => {}
        }
    }
}
