//! Shared fixture content for unit tests.

use std::sync::Arc;

use rift_core::{Content, Item, Manifest, Room, Rule, Synonyms, Timer, Vocabulary};

const MANIFEST: &str = r#"{
    "title": "Hatch Test",
    "start_room": "cryo_bay",
    "max_score": 35,
    "max_inventory": 3,
    "initial_flags": ["hatch_jammed"],
    "intro": "You wake up cold."
}"#;

const ROOMS: &str = r#"[
    {
        "id": "cryo_bay",
        "name": "Cryo Bay",
        "description": "Frost-rimed pods line the walls.",
        "exits": [
            {
                "direction": "south",
                "destination": "corridor",
                "gate": {"type": "not", "condition": {"type": "flag_set", "flag": "hatch_jammed"}},
                "blocked_message": "The hatch to the south is jammed shut."
            },
            {"direction": "east", "destination": "storage"}
        ]
    },
    {
        "id": "storage",
        "name": "Storage",
        "description": "Empty shelves.",
        "exits": [{"direction": "west", "destination": "cryo_bay"}],
        "first_visit_text": "Dust swirls as you enter.",
        "visit_flag": "storage_seen"
    },
    {
        "id": "corridor",
        "name": "Corridor",
        "description": "A long corridor.",
        "exits": [
            {"direction": "north", "destination": "cryo_bay"},
            {"direction": "down", "destination": "pit"}
        ]
    },
    {
        "id": "pit",
        "name": "Pit",
        "description": "Rough rock walls.",
        "dark": true,
        "exits": [{"direction": "up", "destination": "corridor"}]
    }
]"#;

const ITEMS: &str = r#"[
    {
        "id": "pry_bar",
        "name": "pry bar",
        "description": "A heavy steel bar.",
        "room_description": "A pry bar lies on the floor.",
        "location": "cryo_bay",
        "aliases": ["bar", "crowbar"]
    },
    {
        "id": "pod",
        "name": "cryo pod",
        "description": "Your pod. Still humming.",
        "location": "cryo_bay",
        "portable": false,
        "aliases": ["pod"]
    },
    {
        "id": "cell",
        "name": "power cell",
        "description": "A drained power cell.",
        "location": "storage",
        "aliases": ["cell"],
        "combine_with": "adapter",
        "combine_result": "charged_cell",
        "combine_message": "The cell clicks into the adapter."
    },
    {"id": "adapter", "name": "adapter", "description": "A charging adapter.", "location": "storage"},
    {"id": "charged_cell", "name": "charged cell", "description": "It hums.", "location": "nowhere"},
    {"id": "gem", "name": "gem", "description": "A red gem.", "location": "pit"},
    {"id": "torch", "name": "torch", "description": "A hand torch.", "location": "inventory"}
]"#;

const RULES: &str = r#"[
    {
        "id": "open_hatch",
        "room": "cryo_bay",
        "trigger": {"type": "command", "verb": "use", "object": "pry_bar"},
        "condition": {"type": "and", "all": [
            {"type": "item_in_inventory", "item": "pry_bar"},
            {"type": "flag_set", "flag": "hatch_jammed"}
        ]},
        "effects": [
            {"type": "clear_flag", "flag": "hatch_jammed"},
            {"type": "add_score", "points": 10}
        ],
        "text": "You lever the hatch open."
    },
    {
        "id": "first_gem",
        "trigger": {"type": "command", "verb": "take", "object": "gem"},
        "once": true,
        "override_builtin": false,
        "effects": [{"type": "add_score", "points": 20}],
        "text": "The gem glitters."
    },
    {
        "id": "light_torch",
        "trigger": {"type": "command", "verb": "use", "object": "torch"},
        "condition": {"type": "item_in_inventory", "item": "torch"},
        "effects": [{"type": "set_flag", "flag": "has_light"}],
        "text": "The torch flickers on."
    },
    {
        "id": "pray",
        "trigger": {"type": "command", "verb": "pray"},
        "once": true,
        "effects": [{"type": "add_score", "points": 5}],
        "text": "You feel better."
    },
    {
        "id": "corridor_alarm",
        "room": "corridor",
        "trigger": {"type": "turn"},
        "once": true,
        "text": "An alarm wails in the distance."
    },
    {
        "id": "arm_pod",
        "trigger": {"type": "command", "verb": "kick", "object": "pod"},
        "priority": 1,
        "effects": [{"type": "enable_timer", "timer": "fuse"}],
        "text": "The pod starts beeping."
    },
    {
        "id": "boom",
        "trigger": {"type": "timer"},
        "effects": [{"type": "end_game", "outcome": "lost"}],
        "text": "The pod explodes."
    }
]"#;

const TIMERS: &str = r#"[
    {"name": "fuse", "counter": "fuse", "start": 3, "on_zero": "boom", "message": "Beep. {value} turns left."}
]"#;

const SYNONYMS: &str = r#"{
    "verb_synonyms": {"lever": "use", "hit": "kick"},
    "noun_synonyms": {"jimmy": "pry_bar"},
    "direction_synonyms": {"downward": "down"}
}"#;

/// Four rooms, a jammed hatch, a recipe, a one-shot rule, a turn rule,
/// and a timer.
pub(crate) fn hatch_content() -> Arc<Content> {
    let manifest: Manifest = serde_json::from_str(MANIFEST).unwrap();
    let rooms: Vec<Room> = serde_json::from_str(ROOMS).unwrap();
    let items: Vec<Item> = serde_json::from_str(ITEMS).unwrap();
    let rules: Vec<Rule> = serde_json::from_str(RULES).unwrap();
    let timers: Vec<Timer> = serde_json::from_str(TIMERS).unwrap();
    let synonyms: Synonyms = serde_json::from_str(SYNONYMS).unwrap();
    let content = Content::new(manifest, rooms, items, rules, timers, synonyms);
    content.validate().unwrap();
    Arc::new(content)
}

pub(crate) fn hatch_vocabulary() -> Vocabulary {
    Vocabulary::from_content(&hatch_content()).unwrap()
}
