//! Rule selection, effects, and timers.
//!
//! Command rules are checked in evaluation order (descending priority, then
//! declared order) and the first eligible one wins. Turn rules all run after
//! each completed turn. Timer rules run only when their timer reaches zero.

use rift_core::{Content, Effect, ItemLocation, Rule, WorldState, evaluation_order};

use crate::actions;
use crate::condition::evaluate;
use crate::parser::Command;

/// What happened when a command was offered to the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventResult {
    /// A rule fired.
    pub matched: bool,
    /// The fired rule's text, empty if it had none.
    pub text: String,
    /// The fired rule was one-shot and is now spent.
    pub consumed: bool,
    /// The built-in action should still run.
    pub run_builtin: bool,
}

impl EventResult {
    fn unmatched() -> Self {
        Self {
            run_builtin: true,
            ..Self::default()
        }
    }
}

/// Selects and fires content rules.
///
/// Holds only the evaluation order; the rules themselves stay in the
/// content, and one-shot bookkeeping stays in the world state.
#[derive(Debug, Clone)]
pub struct EventManager {
    order: Vec<usize>,
}

impl EventManager {
    /// Prepare the rules of some content.
    pub fn new(content: &Content) -> Self {
        Self {
            order: evaluation_order(&content.rules),
        }
    }

    fn rules<'c>(&'c self, content: &'c Content) -> impl Iterator<Item = &'c Rule> {
        self.order.iter().filter_map(|&i| content.rules.get(i))
    }

    /// Offer a command to the command rules and fire the first one that is
    /// in scope, matches the command, is not a spent one-shot, and whose
    /// condition holds.
    pub fn dispatch(
        &self,
        command: &Command,
        state: &mut WorldState,
        content: &Content,
    ) -> EventResult {
        let selected = self.rules(content).find(|rule| {
            rule.in_scope(state.current_room())
                && rule.trigger.matches(
                    &command.verb,
                    command.primary.as_ref(),
                    command.secondary.as_ref(),
                )
                && eligible(rule, state)
        });

        let Some(rule) = selected else {
            return EventResult::unmatched();
        };

        tracing::debug!(
            rule = %rule.id,
            room = %state.current_room(),
            verb = %command.verb,
            "rule fired"
        );
        let text = fire(rule, state, content);
        EventResult {
            matched: true,
            text,
            consumed: rule.once,
            run_builtin: !rule.override_builtin,
        }
    }

    /// Fire every eligible turn rule in scope, in evaluation order. Returns
    /// the texts produced.
    pub fn run_turn_rules(&self, state: &mut WorldState, content: &Content) -> Vec<String> {
        let mut texts = Vec::new();
        for rule in self.rules(content) {
            if state.is_ended() {
                break;
            }
            if rule.is_turn() && rule.in_scope(state.current_room()) && eligible(rule, state) {
                tracing::debug!(rule = %rule.id, room = %state.current_room(), "turn rule fired");
                texts.push(fire(rule, state, content));
            }
        }
        texts.retain(|t| !t.is_empty());
        texts
    }

    /// Advance every active timer by one turn. A timer that reaches zero is
    /// disabled and its `on_zero` rule fires if eligible.
    pub fn tick_timers(&self, state: &mut WorldState, content: &Content) -> Vec<String> {
        let mut texts = Vec::new();
        for timer in &content.timers {
            if state.is_ended() {
                break;
            }
            if !state.timer_active(&timer.name) {
                continue;
            }
            let value = state.add_counter(&timer.counter, -1);
            if value > 0 {
                if let Some(message) = &timer.message {
                    texts.push(message.replace("{value}", &value.to_string()));
                }
                continue;
            }
            state.disable_timer(&timer.name);
            if let Some(rule) = timer.on_zero.as_deref().and_then(|id| content.rule(id))
                && eligible(rule, state)
            {
                tracing::debug!(rule = %rule.id, timer = %timer.name, "timer rule fired");
                texts.push(fire(rule, state, content));
            }
        }
        texts.retain(|t| !t.is_empty());
        texts
    }
}

fn eligible(rule: &Rule, state: &WorldState) -> bool {
    !(rule.once && state.has_fired(&rule.id)) && evaluate(&rule.condition, state)
}

// Apply the effects in order, then record a one-shot as spent. The rule's
// text comes first, followed by anything the effects had to say.
fn fire(rule: &Rule, state: &mut WorldState, content: &Content) -> String {
    let mut texts: Vec<String> = rule.text.iter().cloned().collect();
    for effect in &rule.effects {
        texts.extend(apply_effect(effect, state, content));
    }
    if rule.once {
        state.mark_fired(&rule.id);
    }
    texts.retain(|t| !t.is_empty());
    texts.join("\n")
}

/// Apply one effect to the world state. Returns text for the player when
/// the effect produces any: moving the player describes the new room.
pub fn apply_effect(effect: &Effect, state: &mut WorldState, content: &Content) -> Option<String> {
    match effect {
        Effect::MoveItem { item, to } => {
            state.move_item(item, to.clone());
        }
        Effect::DestroyItem { item } => {
            state.move_item(item, ItemLocation::Nowhere);
        }
        Effect::SwapItem { item, with } => {
            let location = state
                .item_location(item)
                .cloned()
                .unwrap_or(ItemLocation::Nowhere);
            state.move_item(item, ItemLocation::Nowhere);
            state.move_item(with, location);
        }
        Effect::SetFlag { flag } => state.set_flag(flag),
        Effect::ClearFlag { flag } => state.clear_flag(flag),
        Effect::SetRoomFlag { room, flag } => state.set_room_flag(room, flag),
        Effect::ClearRoomFlag { room, flag } => state.clear_room_flag(room, flag),
        Effect::SetCounter { counter, value } => state.set_counter(counter, *value),
        Effect::AddCounter { counter, amount } => {
            state.add_counter(counter, *amount);
        }
        Effect::ChangeRoom { room } => return Some(actions::enter(state, content, room)),
        Effect::AddScore { points } => state.add_score(*points),
        Effect::MarkVisited { room } => {
            state.mark_visited(room);
        }
        Effect::EnableTimer { timer } => {
            if let Some(t) = content.timer(timer) {
                state.set_counter(&t.counter, t.start);
                state.enable_timer(timer);
            }
        }
        Effect::DisableTimer { timer } => state.disable_timer(timer),
        Effect::EndGame { outcome } => {
            tracing::info!(?outcome, score = state.score(), "game ended by rule");
            state.end((*outcome).into());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::hatch_content;

    fn setup() -> (std::sync::Arc<Content>, WorldState, EventManager) {
        let content = hatch_content();
        let state = WorldState::initial(&content);
        let events = EventManager::new(&content);
        (content, state, events)
    }

    #[test]
    fn no_match_falls_through() {
        let (content, mut state, events) = setup();
        let result = events.dispatch(&Command::new("look"), &mut state, &content);
        assert_eq!(result, EventResult::unmatched());
    }

    #[test]
    fn hatch_rule_fires_then_falls_through() {
        let (content, mut state, events) = setup();
        let use_bar = Command::new("use").with_primary("pry_bar");

        // Not carried yet: condition fails.
        assert!(!events.dispatch(&use_bar, &mut state, &content).matched);

        state.move_item("pry_bar", ItemLocation::Inventory);
        let result = events.dispatch(&use_bar, &mut state, &content);
        assert!(result.matched);
        assert!(!result.run_builtin);
        assert_eq!(result.text, "You lever the hatch open.");
        assert!(!state.flag_is_set("hatch_jammed"));
        assert_eq!(state.score(), 10);

        let again = events.dispatch(&use_bar, &mut state, &content);
        assert!(!again.matched);
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn scoped_rule_ignored_elsewhere() {
        let (content, mut state, events) = setup();
        state.move_item("pry_bar", ItemLocation::Inventory);
        state.enter_room("storage");
        let result = events.dispatch(&Command::new("use").with_primary("pry_bar"), &mut state, &content);
        assert!(!result.matched);
        assert!(state.flag_is_set("hatch_jammed"));
    }

    #[test]
    fn one_shot_fires_once() {
        let (content, mut state, events) = setup();
        let pray = Command::new("pray");
        let first = events.dispatch(&pray, &mut state, &content);
        assert!(first.matched && first.consumed);
        for _ in 0..3 {
            assert!(!events.dispatch(&pray, &mut state, &content).matched);
        }
        assert_eq!(state.score(), 5);
        assert!(state.has_fired("pray"));
    }

    #[test]
    fn passthrough_rule_lets_builtin_run() {
        let (content, mut state, events) = setup();
        let result = events.dispatch(&Command::new("take").with_primary("gem"), &mut state, &content);
        assert!(result.matched);
        assert!(result.run_builtin);
        assert_eq!(result.text, "The gem glitters.");
    }

    #[test]
    fn wildcard_object() {
        let (content, mut state, events) = setup();
        let result = events.dispatch(&Command::new("pray").with_primary("gem"), &mut state, &content);
        assert!(result.matched);
    }

    #[test]
    fn turn_rules_respect_scope_and_once() {
        let (content, mut state, events) = setup();
        assert!(events.run_turn_rules(&mut state, &content).is_empty());
        state.enter_room("corridor");
        assert_eq!(
            events.run_turn_rules(&mut state, &content),
            vec!["An alarm wails in the distance.".to_string()]
        );
        assert!(events.run_turn_rules(&mut state, &content).is_empty());
    }

    #[test]
    fn timer_counts_down_and_fires() {
        let (content, mut state, events) = setup();
        let armed = events.dispatch(&Command::new("kick").with_primary("pod"), &mut state, &content);
        assert!(armed.matched);
        assert!(state.timer_active("fuse"));
        assert_eq!(state.counter("fuse"), 3);

        assert_eq!(
            events.tick_timers(&mut state, &content),
            vec!["Beep. 2 turns left.".to_string()]
        );
        assert_eq!(
            events.tick_timers(&mut state, &content),
            vec!["Beep. 1 turns left.".to_string()]
        );
        assert_eq!(
            events.tick_timers(&mut state, &content),
            vec!["The pod explodes.".to_string()]
        );
        assert!(!state.timer_active("fuse"));
        assert_eq!(state.ending(), Some(rift_core::Ending::Lost));
        assert!(events.tick_timers(&mut state, &content).is_empty());
    }

    #[test]
    fn swap_keeps_location() {
        let (content, mut state, _) = setup();
        apply_effect(
            &Effect::SwapItem {
                item: "cell".into(),
                with: "charged_cell".into(),
            },
            &mut state,
            &content,
        );
        assert_eq!(state.item_location("cell"), Some(&ItemLocation::Nowhere));
        assert_eq!(
            state.item_location("charged_cell"),
            Some(&ItemLocation::Room("storage".into()))
        );
        assert!(state.inconsistencies(&content).is_empty());
    }

    #[test]
    fn change_room_marks_visit() {
        let (content, mut state, _) = setup();
        let text = apply_effect(&Effect::ChangeRoom { room: "pit".into() }, &mut state, &content);
        assert_eq!(state.current_room(), "pit");
        assert!(state.has_visited("pit"));
        assert!(text.is_some());
    }

    #[test]
    fn change_room_enters_like_go() {
        let (content, mut state, _) = setup();
        let text = apply_effect(
            &Effect::ChangeRoom {
                room: "storage".into(),
            },
            &mut state,
            &content,
        )
        .unwrap();
        assert!(text.starts_with("Storage\nEmpty shelves.\nDust swirls as you enter."));
        assert!(state.flag_is_set("storage_seen"));

        state.enter_room("cryo_bay");
        let again = apply_effect(
            &Effect::ChangeRoom {
                room: "storage".into(),
            },
            &mut state,
            &content,
        )
        .unwrap();
        assert!(!again.contains("Dust swirls"));
    }

    #[test]
    fn other_effects_are_silent() {
        let (content, mut state, _) = setup();
        let text = apply_effect(&Effect::SetFlag { flag: "x".into() }, &mut state, &content);
        assert_eq!(text, None);
    }
}
