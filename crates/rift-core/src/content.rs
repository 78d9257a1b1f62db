//! Static content: rooms, items, rules, timers, vocabulary, and the manifest.
//!
//! Content is read once at startup and never mutated afterwards. Lookups by
//! id go through indexes built when the content is assembled.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::direction::Direction;
use crate::error::{ContentError, ContentResult};
use crate::rule::Rule;
use crate::state::ItemLocation;

fn default_true() -> bool {
    true
}

fn default_max_inventory() -> usize {
    10
}

fn default_light_flag() -> String {
    "has_light".to_string()
}

fn default_dark_description() -> String {
    "It's pitch black. You can't see a thing.".to_string()
}

fn default_blocked_message() -> String {
    "The way is blocked.".to_string()
}

fn default_location() -> ItemLocation {
    ItemLocation::Nowhere
}

/// Title, scoring, and start-up settings for an adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Adventure title.
    pub title: String,
    /// Author credit.
    #[serde(default)]
    pub author: String,
    /// Content version.
    #[serde(default)]
    pub version: String,
    /// Highest reachable score.
    #[serde(default)]
    pub max_score: i64,
    /// How many items the player may carry.
    #[serde(default = "default_max_inventory")]
    pub max_inventory: usize,
    /// Room the player starts in.
    pub start_room: String,
    /// Flags set before the first turn.
    #[serde(default)]
    pub initial_flags: Vec<String>,
    /// Flag that lights up dark rooms.
    #[serde(default = "default_light_flag")]
    pub light_flag: String,
    /// Text shown when the session starts.
    #[serde(default)]
    pub intro: String,
    /// Text shown for HELP. Empty uses the engine's default.
    #[serde(default)]
    pub help: String,
}

impl Manifest {
    /// A manifest with defaults for everything but the title and start room.
    pub fn new(title: impl Into<String>, start_room: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: String::new(),
            version: String::new(),
            max_score: 0,
            max_inventory: default_max_inventory(),
            start_room: start_room.into(),
            initial_flags: Vec::new(),
            light_flag: default_light_flag(),
            intro: String::new(),
            help: String::new(),
        }
    }
}

/// A way out of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Direction the player types.
    pub direction: Direction,
    /// Room id on the other side.
    pub destination: String,
    /// Must hold for the exit to be passable.
    #[serde(default)]
    pub gate: Option<Condition>,
    /// Shown when the gate does not hold.
    #[serde(default = "default_blocked_message")]
    pub blocked_message: String,
}

impl Exit {
    /// An ungated exit.
    pub fn open(direction: Direction, destination: impl Into<String>) -> Self {
        Self {
            direction,
            destination: destination.into(),
            gate: None,
            blocked_message: default_blocked_message(),
        }
    }

    /// An exit passable only while `gate` holds.
    pub fn gated(
        direction: Direction,
        destination: impl Into<String>,
        gate: Condition,
        blocked_message: impl Into<String>,
    ) -> Self {
        Self {
            direction,
            destination: destination.into(),
            gate: Some(gate),
            blocked_message: blocked_message.into(),
        }
    }
}

/// A place the player can be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Shown by LOOK.
    pub description: String,
    /// Ways out.
    #[serde(default)]
    pub exits: Vec<Exit>,
    /// Needs the manifest's light flag to be seen.
    #[serde(default)]
    pub dark: bool,
    /// Shown instead of the description while dark.
    #[serde(default = "default_dark_description")]
    pub dark_description: String,
    /// Extra text shown on the first entry.
    #[serde(default)]
    pub first_visit_text: Option<String>,
    /// Flag set on the first entry.
    #[serde(default)]
    pub visit_flag: Option<String>,
}

impl Room {
    /// A lit room with no exits.
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            exits: Vec::new(),
            dark: false,
            dark_description: default_dark_description(),
            first_visit_text: None,
            visit_flag: None,
        }
    }

    /// Add an exit.
    pub fn with_exit(mut self, exit: Exit) -> Self {
        self.exits.push(exit);
        self
    }

    /// The exit in a direction, if any.
    pub fn exit(&self, direction: Direction) -> Option<&Exit> {
        self.exits.iter().find(|e| e.direction == direction)
    }
}

/// An object in the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique item id. Doubles as the item's noun token.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Shown by EXAMINE.
    pub description: String,
    /// Line shown in the room listing.
    #[serde(default)]
    pub room_description: String,
    /// Where the item starts.
    #[serde(default = "default_location")]
    pub location: ItemLocation,
    /// Whether TAKE is allowed.
    #[serde(default = "default_true")]
    pub portable: bool,
    /// Extra phrases the player may use for this item.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Item this one combines with.
    #[serde(default)]
    pub combine_with: Option<String>,
    /// Item produced by the combination.
    #[serde(default)]
    pub combine_result: Option<String>,
    /// Text shown when the combination succeeds.
    #[serde(default)]
    pub combine_message: Option<String>,
}

impl Item {
    /// A portable item with no aliases.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<ItemLocation>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            room_description: String::new(),
            location: location.into(),
            portable: true,
            aliases: Vec::new(),
            combine_with: None,
            combine_result: None,
            combine_message: None,
        }
    }

    /// Add surface aliases.
    pub fn with_aliases<'a>(mut self, aliases: impl IntoIterator<Item = &'a str>) -> Self {
        self.aliases.extend(aliases.into_iter().map(str::to_string));
        self
    }

    /// Mark the item as fixed in place.
    pub fn fixed(mut self) -> Self {
        self.portable = false;
        self
    }
}

/// A named countdown that fires a rule when it reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    /// Unique timer name.
    pub name: String,
    /// Counter the timer decrements.
    pub counter: String,
    /// Counter value set when the timer is enabled.
    pub start: i64,
    /// Rule fired at zero.
    #[serde(default)]
    pub on_zero: Option<String>,
    /// Per-turn message; `{value}` is replaced with the counter.
    #[serde(default)]
    pub message: Option<String>,
}

/// Surface phrase to canonical token tables, as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonyms {
    /// Verb phrases to canonical verbs.
    #[serde(default)]
    pub verb_synonyms: BTreeMap<String, String>,
    /// Noun phrases to canonical nouns.
    #[serde(default)]
    pub noun_synonyms: BTreeMap<String, String>,
    /// Direction phrases to canonical direction names.
    #[serde(default)]
    pub direction_synonyms: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct EventFile {
    #[serde(default)]
    rules: Vec<Rule>,
    #[serde(default)]
    timers: Vec<Timer>,
}

/// A complete, immutable adventure.
#[derive(Debug, Clone)]
pub struct Content {
    /// Title and start-up settings.
    pub manifest: Manifest,
    /// Every room.
    pub rooms: Vec<Room>,
    /// Every item, in declared order.
    pub items: Vec<Item>,
    /// Every rule, in declared order.
    pub rules: Vec<Rule>,
    /// Every timer.
    pub timers: Vec<Timer>,
    /// Authored synonyms.
    pub synonyms: Synonyms,

    // Indexes
    room_index: HashMap<String, usize>,
    item_index: HashMap<String, usize>,
    rule_index: HashMap<String, usize>,
    timer_index: HashMap<String, usize>,
}

fn index_by<T>(records: &[T], id: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        index.entry(id(record).to_string()).or_insert(i);
    }
    index
}

impl Content {
    /// Assemble content from its parts.
    pub fn new(
        manifest: Manifest,
        rooms: Vec<Room>,
        items: Vec<Item>,
        rules: Vec<Rule>,
        timers: Vec<Timer>,
        synonyms: Synonyms,
    ) -> Self {
        Self {
            room_index: index_by(&rooms, |r| &r.id),
            item_index: index_by(&items, |i| &i.id),
            rule_index: index_by(&rules, |r| &r.id),
            timer_index: index_by(&timers, |t| &t.name),
            manifest,
            rooms,
            items,
            rules,
            timers,
            synonyms,
        }
    }

    /// Load content from a directory of JSON files.
    ///
    /// `manifest.json`, `rooms.json`, and `items.json` are required;
    /// `events.json` and `vocabulary.json` may be absent. The result is not
    /// yet validated.
    pub fn load_dir(dir: &Path) -> ContentResult<Self> {
        let manifest: Manifest = read_json(dir, "manifest.json")?;
        let rooms: Vec<Room> = read_json(dir, "rooms.json")?;
        let items: Vec<Item> = read_json(dir, "items.json")?;
        let events: EventFile = read_optional_json(dir, "events.json")?;
        let synonyms: Synonyms = read_optional_json(dir, "vocabulary.json")?;

        tracing::debug!(
            dir = %dir.display(),
            rooms = rooms.len(),
            items = items.len(),
            rules = events.rules.len(),
            timers = events.timers.len(),
            "loaded content"
        );

        Ok(Self::new(
            manifest,
            rooms,
            items,
            events.rules,
            events.timers,
            synonyms,
        ))
    }

    /// Look up a room by id.
    pub fn room(&self, id: &str) -> Option<&Room> {
        self.room_index.get(id).map(|&i| &self.rooms[i])
    }

    /// Look up an item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.item_index.get(id).map(|&i| &self.items[i])
    }

    /// Look up a rule by id.
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rule_index.get(id).map(|&i| &self.rules[i])
    }

    /// Look up a timer by name.
    pub fn timer(&self, name: &str) -> Option<&Timer> {
        self.timer_index.get(name).map(|&i| &self.timers[i])
    }

    /// Display name for an item, falling back to the id.
    pub fn item_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.item(id).map_or(id, |i| i.name.as_str())
    }
}

fn read_json<T: DeserializeOwned>(dir: &Path, file: &str) -> ContentResult<T> {
    let path = dir.join(file);
    let text = fs::read_to_string(&path).map_err(|source| ContentError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ContentError::Json { path, source })
}

fn read_optional_json<T: DeserializeOwned + Default>(dir: &Path, file: &str) -> ContentResult<T> {
    if dir.join(file).exists() {
        read_json(dir, file)
    } else {
        Ok(T::default())
    }
}
