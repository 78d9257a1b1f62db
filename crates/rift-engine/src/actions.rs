//! Built-in fallback actions.
//!
//! These run only when no rule claimed the command (or a rule asked for the
//! built-in to run as well). Every handler either succeeds with the text to
//! show or fails with an [`ActionFailure`] before touching the state.

use rift_core::vocabulary::verbs;
use rift_core::{Content, Direction, ItemLocation, Room, Token, WorldState};

use crate::condition::evaluate;
use crate::error::ActionFailure;
use crate::parser::Command;

/// Outcome of a built-in action: the text to show, or why nothing happened.
pub type ActionResult = Result<String, ActionFailure>;

const NOTHING_HAPPENS: &str = "Nothing happens.";

/// Run the built-in action for a command.
///
/// Meta verbs (SAVE, LOAD, HELP, QUIT) are the session's business and are
/// not handled here.
pub fn perform(
    command: &Command,
    state: &mut WorldState,
    content: &Content,
    max_inventory: usize,
) -> ActionResult {
    match command.verb.as_str() {
        verbs::GO => go(command, state, content),
        verbs::LOOK => match &command.primary {
            Some(_) => examine(command, state, content),
            None => Ok(describe_room(state, content, false)),
        },
        verbs::EXAMINE => examine(command, state, content),
        verbs::TAKE => take(command, state, content, max_inventory),
        verbs::DROP => drop_item(command, state, content),
        verbs::USE => use_item(command, state, content),
        verbs::COMBINE => combine(command, state, content),
        verbs::INVENTORY => Ok(inventory(state, content)),
        verbs::SCORE => Ok(score(state, content)),
        _ => Err(ActionFailure::Unhandled),
    }
}

/// Describe the player's room as LOOK shows it.
///
/// Dark rooms show only their dark description unless the manifest's light
/// flag is set. `first_visit` adds the room's first-visit text.
pub fn describe_room(state: &WorldState, content: &Content, first_visit: bool) -> String {
    let Some(room) = content.room(state.current_room()) else {
        return "You see nothing.".to_string();
    };
    if room.dark && !state.flag_is_set(&content.manifest.light_flag) {
        return room.dark_description.clone();
    }

    let mut lines = vec![room.name.clone(), room.description.clone()];
    if first_visit && let Some(text) = &room.first_visit_text {
        lines.push(text.clone());
    }

    let here = ItemLocation::Room(room.id.clone());
    for item in content
        .items
        .iter()
        .filter(|i| state.item_location(&i.id) == Some(&here))
    {
        if item.room_description.is_empty() {
            lines.push(format!("The {} is here.", item.name));
        } else {
            lines.push(item.room_description.clone());
        }
    }

    let exits = exit_labels(room, state);
    if !exits.is_empty() {
        lines.push(format!("Exits: {}", exits.join(", ")));
    }
    lines.join("\n")
}

fn exit_labels(room: &Room, state: &WorldState) -> Vec<String> {
    room.exits
        .iter()
        .map(|exit| {
            let name = capitalize(exit.direction.name());
            match &exit.gate {
                Some(gate) if !evaluate(gate, state) => format!("{name} (locked)"),
                _ => name,
            }
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Move the player into a room, applying its first-visit flag. Returns the
/// description to show.
pub fn enter(state: &mut WorldState, content: &Content, room: &str) -> String {
    let first = state.enter_room(room);
    if first
        && let Some(flag) = content.room(room).and_then(|r| r.visit_flag.as_deref())
    {
        state.set_flag(flag);
    }
    describe_room(state, content, first)
}

fn go(command: &Command, state: &mut WorldState, content: &Content) -> ActionResult {
    let Some(target) = &command.primary else {
        return Err(ActionFailure::MissingObject("Go where?"));
    };
    let direction = Direction::parse(target.as_str())
        .ok_or_else(|| ActionFailure::NotADirection(target.as_str().to_string()))?;
    let exit = content
        .room(state.current_room())
        .and_then(|room| room.exit(direction))
        .ok_or(ActionFailure::NoExit)?;
    if let Some(gate) = &exit.gate
        && !evaluate(gate, state)
    {
        return Err(ActionFailure::ExitBlocked(exit.blocked_message.clone()));
    }
    Ok(enter(state, content, &exit.destination))
}

fn item_name(content: &Content, token: &Token) -> String {
    content.item_name(token.as_str()).to_string()
}

fn examine(command: &Command, state: &WorldState, content: &Content) -> ActionResult {
    let Some(target) = &command.primary else {
        return Err(ActionFailure::MissingObject("Examine what?"));
    };
    match content.item(target.as_str()) {
        Some(item) if state.carries(&item.id) || state.is_here(&item.id) => {
            Ok(item.description.clone())
        }
        _ => Err(ActionFailure::ItemNotFound(item_name(content, target))),
    }
}

fn take(
    command: &Command,
    state: &mut WorldState,
    content: &Content,
    max_inventory: usize,
) -> ActionResult {
    let Some(target) = &command.primary else {
        return Err(ActionFailure::MissingObject("Take what?"));
    };
    if state.carries(target.as_str()) {
        return Err(ActionFailure::AlreadyCarrying);
    }
    let item = content
        .item(target.as_str())
        .filter(|item| state.is_here(&item.id))
        .ok_or_else(|| ActionFailure::ItemNotFound(item_name(content, target)))?;
    if !item.portable {
        return Err(ActionFailure::NotPortable(item.name.clone()));
    }
    if state.inventory_len() >= max_inventory {
        return Err(ActionFailure::InventoryFull);
    }
    state.move_item(&item.id, ItemLocation::Inventory);
    Ok(format!("Taken: {}", item.name))
}

fn drop_item(command: &Command, state: &mut WorldState, content: &Content) -> ActionResult {
    let Some(target) = &command.primary else {
        return Err(ActionFailure::MissingObject("Drop what?"));
    };
    if !state.carries(target.as_str()) {
        return Err(ActionFailure::NotCarrying(item_name(content, target)));
    }
    let room = ItemLocation::Room(state.current_room().to_string());
    state.move_item(target.as_str(), room);
    Ok(format!("Dropped: {}", item_name(content, target)))
}

fn use_item(command: &Command, state: &WorldState, content: &Content) -> ActionResult {
    let Some(target) = &command.primary else {
        return Err(ActionFailure::MissingObject("Use what?"));
    };
    for object in [Some(target), command.secondary.as_ref()].into_iter().flatten() {
        if content.item(object.as_str()).is_some()
            && !state.carries(object.as_str())
            && !state.is_here(object.as_str())
        {
            return Err(ActionFailure::ItemNotFound(item_name(content, object)));
        }
    }
    Ok(NOTHING_HAPPENS.to_string())
}

fn combine(command: &Command, state: &mut WorldState, content: &Content) -> ActionResult {
    let (Some(first), Some(second)) = (&command.primary, &command.secondary) else {
        return Err(ActionFailure::MissingObject("Combine what with what?"));
    };
    for object in [first, second] {
        if !state.carries(object.as_str()) {
            return Err(ActionFailure::NotCarrying(item_name(content, object)));
        }
    }

    let recipe = [(first, second), (second, first)]
        .into_iter()
        .filter_map(|(a, b)| content.item(a.as_str()).zip(content.item(b.as_str())))
        .find(|(a, b)| a.combine_with.as_deref() == Some(b.id.as_str()) && a.combine_result.is_some());
    let Some((base, other)) = recipe else {
        return Ok(NOTHING_HAPPENS.to_string());
    };
    let Some(result) = base.combine_result.as_deref().and_then(|id| content.item(id)) else {
        return Ok(NOTHING_HAPPENS.to_string());
    };

    state.move_item(&base.id, ItemLocation::Nowhere);
    state.move_item(&other.id, ItemLocation::Nowhere);
    state.move_item(&result.id, ItemLocation::Inventory);

    let message = base
        .combine_message
        .clone()
        .unwrap_or_else(|| format!("You combine the {} and the {}.", base.name, other.name));
    Ok(format!("{message} You now have: {}", result.name))
}

fn inventory(state: &WorldState, content: &Content) -> String {
    let carried: Vec<&str> = content
        .items
        .iter()
        .filter(|i| state.carries(&i.id))
        .map(|i| i.name.as_str())
        .collect();
    if carried.is_empty() {
        return "You aren't carrying anything.".to_string();
    }
    let mut out = String::from("You are carrying:");
    for name in carried {
        out.push_str("\n  - ");
        out.push_str(name);
    }
    out
}

/// The SCORE line.
pub fn score(state: &WorldState, content: &Content) -> String {
    format!(
        "Score: {} / {} (Turns: {})",
        state.score(),
        content.manifest.max_score,
        state.turns()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::hatch_content;

    struct Fixture {
        content: std::sync::Arc<Content>,
        state: WorldState,
    }

    impl Fixture {
        fn new() -> Self {
            let content = hatch_content();
            let state = WorldState::initial(&content);
            Self { content, state }
        }

        fn run(&mut self, command: Command) -> ActionResult {
            perform(&command, &mut self.state, &self.content, 3)
        }
    }

    #[test]
    fn take_moves_item_and_nothing_else() {
        let mut f = Fixture::new();
        let before = f.state.clone();
        assert_eq!(
            f.run(Command::new("take").with_primary("pry_bar")),
            Ok("Taken: pry bar".into())
        );
        assert!(f.state.carries("pry_bar"));
        assert!(!f.state.is_here("pry_bar"));
        assert_eq!(f.state.score(), before.score());
        assert_eq!(f.state.turns(), before.turns());

        let mut expected = before;
        expected.move_item("pry_bar", ItemLocation::Inventory);
        assert_eq!(f.state, expected);
    }

    #[test]
    fn take_failures_leave_state_alone() {
        let mut f = Fixture::new();
        let before = f.state.clone();
        assert_eq!(
            f.run(Command::new("take").with_primary("pod")),
            Err(ActionFailure::NotPortable("cryo pod".into()))
        );
        assert_eq!(
            f.run(Command::new("take").with_primary("gem")),
            Err(ActionFailure::ItemNotFound("gem".into()))
        );
        assert_eq!(
            f.run(Command::new("take").with_primary("torch")),
            Err(ActionFailure::AlreadyCarrying)
        );
        assert_eq!(
            f.run(Command::new("take")),
            Err(ActionFailure::MissingObject("Take what?"))
        );
        assert_eq!(f.state, before);
    }

    #[test]
    fn inventory_limit() {
        let mut f = Fixture::new();
        f.state.move_item("gem", ItemLocation::Inventory);
        f.state.move_item("adapter", ItemLocation::Inventory);
        assert_eq!(
            f.run(Command::new("take").with_primary("pry_bar")),
            Err(ActionFailure::InventoryFull)
        );
    }

    #[test]
    fn drop_puts_item_in_room() {
        let mut f = Fixture::new();
        assert_eq!(
            f.run(Command::new("drop").with_primary("torch")),
            Ok("Dropped: torch".into())
        );
        assert!(f.state.is_here("torch"));
        assert_eq!(
            f.run(Command::new("drop").with_primary("torch")),
            Err(ActionFailure::NotCarrying("torch".into()))
        );
    }

    #[test]
    fn go_through_open_exit() {
        let mut f = Fixture::new();
        let text = f.run(Command::new("go").with_primary("east")).unwrap();
        assert!(text.starts_with("Storage\nEmpty shelves.\nDust swirls as you enter."));
        assert!(f.state.flag_is_set("storage_seen"));

        let text = f.run(Command::new("go").with_primary("west")).unwrap();
        assert!(text.starts_with("Cryo Bay"));
        let again = f.run(Command::new("go").with_primary("east")).unwrap();
        assert!(!again.contains("Dust swirls"));
    }

    #[test]
    fn go_failures() {
        let mut f = Fixture::new();
        assert_eq!(
            f.run(Command::new("go").with_primary("south")),
            Err(ActionFailure::ExitBlocked(
                "The hatch to the south is jammed shut.".into()
            ))
        );
        assert_eq!(
            f.run(Command::new("go").with_primary("north")),
            Err(ActionFailure::NoExit)
        );
        assert_eq!(
            f.run(Command::new("go").with_primary("pod")),
            Err(ActionFailure::NotADirection("pod".into()))
        );
        assert_eq!(
            f.run(Command::new("go")),
            Err(ActionFailure::MissingObject("Go where?"))
        );
        assert_eq!(f.state.current_room(), "cryo_bay");
    }

    #[test]
    fn look_lists_items_and_exits() {
        let f = Fixture::new();
        assert_eq!(
            describe_room(&f.state, &f.content, false),
            "Cryo Bay\n\
             Frost-rimed pods line the walls.\n\
             A pry bar lies on the floor.\n\
             The cryo pod is here.\n\
             Exits: South (locked), East"
        );
    }

    #[test]
    fn dark_room_needs_light() {
        let mut f = Fixture::new();
        f.state.enter_room("pit");
        assert_eq!(
            describe_room(&f.state, &f.content, false),
            "It's pitch black. You can't see a thing."
        );
        f.state.set_flag("has_light");
        assert!(describe_room(&f.state, &f.content, false).starts_with("Pit\nRough rock walls."));
    }

    #[test]
    fn examine_needs_item_at_hand() {
        let mut f = Fixture::new();
        assert_eq!(
            f.run(Command::new("examine").with_primary("torch")),
            Ok("A hand torch.".into())
        );
        assert_eq!(
            f.run(Command::new("look").with_primary("pod")),
            Ok("Your pod. Still humming.".into())
        );
        assert_eq!(
            f.run(Command::new("examine").with_primary("gem")),
            Err(ActionFailure::ItemNotFound("gem".into()))
        );
    }

    #[test]
    fn use_without_rule_does_nothing() {
        let mut f = Fixture::new();
        let before = f.state.clone();
        assert_eq!(
            f.run(Command::new("use").with_primary("pry_bar")),
            Ok("Nothing happens.".into())
        );
        assert_eq!(
            f.run(Command::new("use").with_primary("gem")),
            Err(ActionFailure::ItemNotFound("gem".into()))
        );
        assert_eq!(f.state, before);
    }

    #[test]
    fn combine_recipe_either_order() {
        for (a, b) in [("cell", "adapter"), ("adapter", "cell")] {
            let mut f = Fixture::new();
            f.state.move_item("cell", ItemLocation::Inventory);
            f.state.move_item("adapter", ItemLocation::Inventory);
            let text = f
                .run(Command::new("combine").with_primary(a).with_secondary(b))
                .unwrap();
            assert_eq!(text, "The cell clicks into the adapter. You now have: charged cell");
            assert!(f.state.carries("charged_cell"));
            assert_eq!(f.state.item_location("cell"), Some(&ItemLocation::Nowhere));
            assert_eq!(f.state.item_location("adapter"), Some(&ItemLocation::Nowhere));
            assert!(f.state.inconsistencies(&f.content).is_empty());
        }
    }

    #[test]
    fn combine_without_recipe_or_items() {
        let mut f = Fixture::new();
        assert_eq!(
            f.run(Command::new("combine").with_primary("torch").with_secondary("cell")),
            Err(ActionFailure::NotCarrying("power cell".into()))
        );
        f.state.move_item("pry_bar", ItemLocation::Inventory);
        assert_eq!(
            f.run(Command::new("combine").with_primary("torch").with_secondary("pry_bar")),
            Ok("Nothing happens.".into())
        );
    }

    #[test]
    fn inventory_and_score() {
        let mut f = Fixture::new();
        assert_eq!(
            f.run(Command::new("inventory")),
            Ok("You are carrying:\n  - torch".into())
        );
        f.state.move_item("torch", ItemLocation::Nowhere);
        assert_eq!(
            f.run(Command::new("i")),
            Err(ActionFailure::Unhandled)
        );
        assert_eq!(
            f.run(Command::new("inventory")),
            Ok("You aren't carrying anything.".into())
        );
        assert_eq!(
            f.run(Command::new("score")),
            Ok("Score: 0 / 35 (Turns: 0)".into())
        );
    }
}
