//! Condition evaluation against world state.

use rift_core::{Condition, ItemLocation, WorldState};

/// Test a condition tree against the current state.
///
/// Combinators short-circuit left to right. Evaluation never fails: content
/// references were checked at load time, and an id that is somehow missing
/// reads as false.
pub fn evaluate(condition: &Condition, state: &WorldState) -> bool {
    match condition {
        Condition::PlayerIn { room } => state.current_room() == room,
        Condition::ItemInInventory { item } => state.carries(item),
        Condition::ItemInRoom { item, room } => {
            matches!(state.item_location(item), Some(ItemLocation::Room(r)) if r == room)
        }
        Condition::ItemHere { item } => state.is_here(item),
        Condition::ItemExists { item } => state
            .item_location(item)
            .is_some_and(|loc| *loc != ItemLocation::Nowhere),
        Condition::FlagSet { flag } => state.flag_is_set(flag),
        Condition::RoomFlagSet { room, flag } => state.room_flag_is_set(room, flag),
        Condition::Visited { room } => state.has_visited(room),
        Condition::ScoreAtLeast { points } => state.score() >= *points,
        Condition::CounterAtLeast { counter, value } => state.counter(counter) >= *value,
        Condition::CounterAtMost { counter, value } => state.counter(counter) <= *value,
        Condition::CounterEquals { counter, value } => state.counter(counter) == *value,
        Condition::And { all } => all.iter().all(|c| evaluate(c, state)),
        Condition::Or { any } => any.iter().any(|c| evaluate(c, state)),
        Condition::Not { condition } => !evaluate(condition, state),
        Condition::Always => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::hatch_content;

    fn state() -> WorldState {
        WorldState::initial(&hatch_content())
    }

    fn flag(name: &str) -> Condition {
        Condition::FlagSet { flag: name.into() }
    }

    #[test]
    fn location_and_inventory() {
        let mut state = state();
        let in_bay = Condition::PlayerIn {
            room: "cryo_bay".into(),
        };
        let holding_bar = Condition::ItemInInventory {
            item: "pry_bar".into(),
        };
        let bar_on_floor = Condition::ItemInRoom {
            item: "pry_bar".into(),
            room: "cryo_bay".into(),
        };
        assert!(evaluate(&in_bay, &state));
        assert!(!evaluate(&holding_bar, &state));
        assert!(evaluate(&bar_on_floor, &state));
        assert!(evaluate(&Condition::ItemHere { item: "pry_bar".into() }, &state));

        state.move_item("pry_bar", ItemLocation::Inventory);
        assert!(evaluate(&holding_bar, &state));
        assert!(!evaluate(&bar_on_floor, &state));
    }

    #[test]
    fn existence() {
        let state = state();
        assert!(evaluate(&Condition::ItemExists { item: "gem".into() }, &state));
        assert!(!evaluate(
            &Condition::ItemExists {
                item: "charged_cell".into()
            },
            &state
        ));
    }

    #[test]
    fn flags_counters_and_score() {
        let mut state = state();
        assert!(evaluate(&flag("hatch_jammed"), &state));
        state.set_room_flag("pit", "flooded");
        assert!(evaluate(
            &Condition::RoomFlagSet {
                room: "pit".into(),
                flag: "flooded".into()
            },
            &state
        ));

        state.set_counter("oxygen", 4);
        let at_least = |value| Condition::CounterAtLeast {
            counter: "oxygen".into(),
            value,
        };
        assert!(evaluate(&at_least(4), &state));
        assert!(!evaluate(&at_least(5), &state));
        assert!(evaluate(
            &Condition::CounterEquals {
                counter: "oxygen".into(),
                value: 4
            },
            &state
        ));
        assert!(evaluate(
            &Condition::CounterAtMost {
                counter: "unset".into(),
                value: 0
            },
            &state
        ));

        assert!(!evaluate(&Condition::ScoreAtLeast { points: 1 }, &state));
        state.add_score(10);
        assert!(evaluate(&Condition::ScoreAtLeast { points: 10 }, &state));
    }

    #[test]
    fn combinators() {
        let state = state();
        let yes = flag("hatch_jammed");
        let no = flag("has_light");
        assert!(evaluate(&Condition::all([yes.clone(), Condition::Always]), &state));
        assert!(!evaluate(&Condition::all([yes.clone(), no.clone()]), &state));
        assert!(evaluate(&Condition::any([no.clone(), yes.clone()]), &state));
        assert!(evaluate(&Condition::negate(no), &state));
        assert!(evaluate(&Condition::all([]), &state));
        assert!(!evaluate(&Condition::any([]), &state));
        assert!(!evaluate(&Condition::negate(yes), &state));
    }

    #[test]
    fn visited() {
        let mut state = state();
        let seen = Condition::Visited {
            room: "storage".into(),
        };
        assert!(evaluate(&Condition::Visited { room: "cryo_bay".into() }, &state));
        assert!(!evaluate(&seen, &state));
        state.enter_room("storage");
        assert!(evaluate(&seen, &state));
    }
}
