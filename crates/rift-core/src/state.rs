//! The mutable world state of a session.
//!
//! `WorldState` is the single aggregate every turn reads and writes. It is
//! serialized wholesale for save files, so every registry is an ordered map
//! and the whole thing compares with `==`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::Content;
use crate::effect::Outcome;

const INVENTORY: &str = "inventory";
const NOWHERE: &str = "nowhere";

/// Where an item currently is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemLocation {
    /// Lying in a room.
    Room(String),
    /// Carried by the player.
    Inventory,
    /// Out of play.
    Nowhere,
}

impl ItemLocation {
    /// Whether a room id would read back as `inventory` or `nowhere`.
    pub fn is_reserved(id: &str) -> bool {
        id == INVENTORY || id == NOWHERE
    }
}

impl From<String> for ItemLocation {
    fn from(s: String) -> Self {
        match s.as_str() {
            INVENTORY => Self::Inventory,
            NOWHERE => Self::Nowhere,
            _ => Self::Room(s),
        }
    }
}

impl From<&str> for ItemLocation {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ItemLocation> for String {
    fn from(loc: ItemLocation) -> Self {
        match loc {
            ItemLocation::Room(room) => room,
            ItemLocation::Inventory => INVENTORY.to_string(),
            ItemLocation::Nowhere => NOWHERE.to_string(),
        }
    }
}

impl fmt::Display for ItemLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room(room) => f.write_str(room),
            Self::Inventory => f.write_str(INVENTORY),
            Self::Nowhere => f.write_str(NOWHERE),
        }
    }
}

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// A rule ended the game with a win.
    Won,
    /// A rule ended the game with a loss.
    Lost,
    /// The player quit.
    Quit,
}

impl From<Outcome> for Ending {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => Self::Won,
            Outcome::Lost => Self::Lost,
        }
    }
}

/// Runtime state of one room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    /// Items lying here.
    pub items: BTreeSet<String>,
    /// Room-local flags.
    pub flags: BTreeSet<String>,
    /// Whether the player has been here.
    pub visited: bool,
}

/// The complete mutable snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    current_room: String,
    score: i64,
    turns: u32,
    inventory: BTreeSet<String>,
    rooms: BTreeMap<String, RoomState>,
    items: BTreeMap<String, ItemLocation>,
    flags: BTreeSet<String>,
    counters: BTreeMap<String, i64>,
    fired: BTreeSet<String>,
    active_timers: BTreeSet<String>,
    ending: Option<Ending>,
}

impl WorldState {
    /// Build the opening state for validated content. The start room counts
    /// as visited.
    pub fn initial(content: &Content) -> Self {
        let mut state = Self {
            current_room: content.manifest.start_room.clone(),
            score: 0,
            turns: 0,
            inventory: BTreeSet::new(),
            rooms: content
                .rooms
                .iter()
                .map(|r| (r.id.clone(), RoomState::default()))
                .collect(),
            items: BTreeMap::new(),
            flags: content.manifest.initial_flags.iter().cloned().collect(),
            counters: BTreeMap::new(),
            fired: BTreeSet::new(),
            active_timers: BTreeSet::new(),
            ending: None,
        };
        for item in &content.items {
            state.items.insert(item.id.clone(), ItemLocation::Nowhere);
            state.move_item(&item.id, item.location.clone());
        }
        let start = state.current_room.clone();
        state.mark_visited(&start);
        state
    }

    // -----------------------------------------------------------------------
    // Player position
    // -----------------------------------------------------------------------

    /// The room the player is in.
    pub fn current_room(&self) -> &str {
        &self.current_room
    }

    /// Move the player. Returns true on the first visit.
    pub fn enter_room(&mut self, room: &str) -> bool {
        self.current_room = room.to_string();
        self.mark_visited(room)
    }

    /// Mark a room visited. Returns true if it was not visited before.
    pub fn mark_visited(&mut self, room: &str) -> bool {
        match self.rooms.get_mut(room) {
            Some(state) => !std::mem::replace(&mut state.visited, true),
            None => false,
        }
    }

    /// Whether the player has been in the room.
    pub fn has_visited(&self, room: &str) -> bool {
        self.rooms.get(room).is_some_and(|r| r.visited)
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Where an item is, if it exists.
    pub fn item_location(&self, item: &str) -> Option<&ItemLocation> {
        self.items.get(item)
    }

    /// Whether the player carries the item.
    pub fn carries(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    /// Whether the item lies in the player's current room.
    pub fn is_here(&self, item: &str) -> bool {
        self.rooms
            .get(&self.current_room)
            .is_some_and(|r| r.items.contains(item))
    }

    /// Carried item ids, in id order.
    pub fn inventory(&self) -> impl Iterator<Item = &str> {
        self.inventory.iter().map(String::as_str)
    }

    /// Number of carried items.
    pub fn inventory_len(&self) -> usize {
        self.inventory.len()
    }

    /// Item ids lying in a room, in id order.
    pub fn items_in_room(&self, room: &str) -> impl Iterator<Item = &str> {
        self.rooms
            .get(room)
            .into_iter()
            .flat_map(|r| r.items.iter().map(String::as_str))
    }

    /// Move an item, keeping the item registry, room contents, and inventory
    /// in agreement. Returns false if the item or destination room is unknown.
    pub fn move_item(&mut self, item: &str, to: ItemLocation) -> bool {
        if let ItemLocation::Room(room) = &to
            && !self.rooms.contains_key(room)
        {
            return false;
        }
        let Some(slot) = self.items.get_mut(item) else {
            return false;
        };
        let from = std::mem::replace(slot, to.clone());
        match from {
            ItemLocation::Room(room) => {
                if let Some(r) = self.rooms.get_mut(&room) {
                    r.items.remove(item);
                }
            }
            ItemLocation::Inventory => {
                self.inventory.remove(item);
            }
            ItemLocation::Nowhere => {}
        }
        match to {
            ItemLocation::Room(room) => {
                if let Some(r) = self.rooms.get_mut(&room) {
                    r.items.insert(item.to_string());
                }
            }
            ItemLocation::Inventory => {
                self.inventory.insert(item.to_string());
            }
            ItemLocation::Nowhere => {}
        }
        true
    }

    // -----------------------------------------------------------------------
    // Flags and counters
    // -----------------------------------------------------------------------

    /// Set a global flag.
    pub fn set_flag(&mut self, flag: &str) {
        self.flags.insert(flag.to_string());
    }

    /// Clear a global flag.
    pub fn clear_flag(&mut self, flag: &str) {
        self.flags.remove(flag);
    }

    /// Whether a global flag is set.
    pub fn flag_is_set(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Set a room-local flag. Unknown rooms are ignored.
    pub fn set_room_flag(&mut self, room: &str, flag: &str) {
        if let Some(r) = self.rooms.get_mut(room) {
            r.flags.insert(flag.to_string());
        }
    }

    /// Clear a room-local flag.
    pub fn clear_room_flag(&mut self, room: &str, flag: &str) {
        if let Some(r) = self.rooms.get_mut(room) {
            r.flags.remove(flag);
        }
    }

    /// Whether a room-local flag is set.
    pub fn room_flag_is_set(&self, room: &str, flag: &str) -> bool {
        self.rooms.get(room).is_some_and(|r| r.flags.contains(flag))
    }

    /// A counter's value. Unset counters read as zero.
    pub fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Set a counter.
    pub fn set_counter(&mut self, name: &str, value: i64) {
        self.counters.insert(name.to_string(), value);
    }

    /// Add to a counter and return the new value.
    pub fn add_counter(&mut self, name: &str, amount: i64) -> i64 {
        let value = self.counters.entry(name.to_string()).or_insert(0);
        *value += amount;
        *value
    }

    // -----------------------------------------------------------------------
    // Score, turns, and ending
    // -----------------------------------------------------------------------

    /// Current score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Add points to the score.
    pub fn add_score(&mut self, points: i64) {
        self.score += points;
    }

    /// Completed turns.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Count one more completed turn.
    pub fn next_turn(&mut self) {
        self.turns += 1;
    }

    /// How the game ended, if it has.
    pub fn ending(&self) -> Option<Ending> {
        self.ending
    }

    /// Whether the game is over.
    pub fn is_ended(&self) -> bool {
        self.ending.is_some()
    }

    /// End the game. The first ending sticks.
    pub fn end(&mut self, ending: Ending) {
        self.ending.get_or_insert(ending);
    }

    // -----------------------------------------------------------------------
    // Rule and timer bookkeeping
    // -----------------------------------------------------------------------

    /// Whether a one-shot rule has fired.
    pub fn has_fired(&self, rule: &str) -> bool {
        self.fired.contains(rule)
    }

    /// Record that a one-shot rule fired.
    pub fn mark_fired(&mut self, rule: &str) {
        self.fired.insert(rule.to_string());
    }

    /// Activate a timer.
    pub fn enable_timer(&mut self, timer: &str) {
        self.active_timers.insert(timer.to_string());
    }

    /// Deactivate a timer.
    pub fn disable_timer(&mut self, timer: &str) {
        self.active_timers.remove(timer);
    }

    /// Whether a timer is running.
    pub fn timer_active(&self, timer: &str) -> bool {
        self.active_timers.contains(timer)
    }

    // -----------------------------------------------------------------------
    // Integrity
    // -----------------------------------------------------------------------

    /// Check this state against content: known ids only, and every item in
    /// exactly the place its location says. Returns a description of each
    /// problem found.
    pub fn inconsistencies(&self, content: &Content) -> Vec<String> {
        let mut problems = Vec::new();

        if content.room(&self.current_room).is_none() {
            problems.push(format!("current room \"{}\" is unknown", self.current_room));
        }
        for room in self.rooms.keys() {
            if content.room(room).is_none() {
                problems.push(format!("room \"{room}\" is unknown"));
            }
        }
        for room in &content.rooms {
            if !self.rooms.contains_key(&room.id) {
                problems.push(format!("room \"{}\" is missing", room.id));
            }
        }
        for item in &content.items {
            if !self.items.contains_key(&item.id) {
                problems.push(format!("item \"{}\" is missing", item.id));
            }
        }

        for (item, location) in &self.items {
            if content.item(item).is_none() {
                problems.push(format!("item \"{item}\" is unknown"));
            }
            let in_inventory = self.inventory.contains(item);
            let holders: Vec<&str> = self
                .rooms
                .iter()
                .filter(|(_, r)| r.items.contains(item))
                .map(|(id, _)| id.as_str())
                .collect();
            let agrees = match location {
                ItemLocation::Room(room) => !in_inventory && holders == [room.as_str()],
                ItemLocation::Inventory => in_inventory && holders.is_empty(),
                ItemLocation::Nowhere => !in_inventory && holders.is_empty(),
            };
            if !agrees {
                problems.push(format!("item \"{item}\" is not where it claims ({location})"));
            }
        }
        for item in &self.inventory {
            if !self.items.contains_key(item) {
                problems.push(format!("inventory holds unknown item \"{item}\""));
            }
        }
        for (room, state) in &self.rooms {
            for item in &state.items {
                if !self.items.contains_key(item) {
                    problems.push(format!("room \"{room}\" holds unknown item \"{item}\""));
                }
            }
        }

        problems
    }
}
