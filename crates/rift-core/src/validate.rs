//! Load-time validation.
//!
//! Every check here is fatal: content that fails validation never reaches a
//! session, so the engine can treat dangling ids as impossible.

use std::collections::HashSet;

use crate::content::Content;
use crate::error::{ContentError, ContentResult};
use crate::rule::Rule;
use crate::state::ItemLocation;
use crate::vocabulary::Vocabulary;

/// A content id mentioned by a condition or effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reference<'a> {
    Room(&'a str),
    Item(&'a str),
    Timer(&'a str),
}

impl Content {
    /// Run every load-time check, failing with all problems bundled in
    /// [`ContentError::Invalid`].
    pub fn validate(&self) -> ContentResult<()> {
        let errors = validate(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ContentError::Invalid(errors))
        }
    }

    /// Load a content directory and validate it.
    pub fn load_validated(dir: &std::path::Path) -> ContentResult<Self> {
        let content = Self::load_dir(dir)?;
        content.validate()?;
        Ok(content)
    }
}

/// Collect every problem in some content. An empty list means the content
/// is playable.
pub fn validate(content: &Content) -> Vec<ContentError> {
    let mut errors = Vec::new();

    if content.room(&content.manifest.start_room).is_none() {
        errors.push(ContentError::MissingStartRoom(
            content.manifest.start_room.clone(),
        ));
    }

    check_unique("room", content.rooms.iter().map(|r| r.id.as_str()), &mut errors);
    check_unique("item", content.items.iter().map(|i| i.id.as_str()), &mut errors);
    check_unique("rule", content.rules.iter().map(|r| r.id.as_str()), &mut errors);
    check_unique("timer", content.timers.iter().map(|t| t.name.as_str()), &mut errors);

    for room in &content.rooms {
        if ItemLocation::is_reserved(&room.id) {
            errors.push(ContentError::ReservedRoomId(room.id.clone()));
        }
        for exit in &room.exits {
            let context = format!("room {} exit {}", room.id, exit.direction);
            check_room(content, &context, &exit.destination, &mut errors);
            if let Some(gate) = &exit.gate {
                let mut refs = Vec::new();
                gate.references(&mut refs);
                check_references(content, &context, &refs, &mut errors);
            }
        }
    }

    for item in &content.items {
        let context = format!("item {}", item.id);
        if let ItemLocation::Room(room) = &item.location {
            check_room(content, &context, room, &mut errors);
        }
        for other in [&item.combine_with, &item.combine_result].into_iter().flatten() {
            check_item(content, &context, other, &mut errors);
        }
    }

    for rule in &content.rules {
        let context = format!("rule {}", rule.id);
        if let Some(room) = &rule.room {
            check_room(content, &context, room, &mut errors);
        }
        let mut refs = Vec::new();
        rule.condition.references(&mut refs);
        for effect in &rule.effects {
            effect.references(&mut refs);
        }
        check_references(content, &context, &refs, &mut errors);
    }

    for timer in &content.timers {
        if let Some(rule) = &timer.on_zero
            && content.rule(rule).is_none()
        {
            errors.push(ContentError::UnknownRule {
                context: format!("timer {}", timer.name),
                rule: rule.clone(),
            });
        }
    }

    let (_, vocabulary_errors) = Vocabulary::build(content);
    errors.extend(vocabulary_errors);

    check_reachable(&content.rules, &mut errors);

    errors
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ContentError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ContentError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_room(content: &Content, context: &str, room: &str, errors: &mut Vec<ContentError>) {
    if content.room(room).is_none() {
        errors.push(ContentError::UnknownRoom {
            context: context.to_string(),
            room: room.to_string(),
        });
    }
}

fn check_item(content: &Content, context: &str, item: &str, errors: &mut Vec<ContentError>) {
    if content.item(item).is_none() {
        errors.push(ContentError::UnknownItem {
            context: context.to_string(),
            item: item.to_string(),
        });
    }
}

fn check_references(
    content: &Content,
    context: &str,
    refs: &[Reference<'_>],
    errors: &mut Vec<ContentError>,
) {
    for reference in refs {
        match *reference {
            Reference::Room(room) => check_room(content, context, room, errors),
            Reference::Item(item) => check_item(content, context, item, errors),
            Reference::Timer(timer) => {
                if content.timer(timer).is_none() {
                    errors.push(ContentError::UnknownTimer {
                        context: context.to_string(),
                        timer: timer.to_string(),
                    });
                }
            }
        }
    }
}

/// Rules in the order the event manager checks them: descending priority,
/// ties in declared order.
pub fn evaluation_order(rules: &[Rule]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rules.len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(rules[i].priority));
    order
}

// A command rule is dead when a rule checked before it has the same scope and
// trigger, always holds, can fire repeatedly, and stops the search.
fn check_reachable(rules: &[Rule], errors: &mut Vec<ContentError>) {
    let order = evaluation_order(rules);
    for (pos, &later) in order.iter().enumerate() {
        let rule = &rules[later];
        if !rule.is_command() {
            continue;
        }
        let shadow = order[..pos].iter().map(|&i| &rules[i]).find(|earlier| {
            earlier.room == rule.room
                && earlier.trigger == rule.trigger
                && earlier.condition.is_always()
                && !earlier.once
                && earlier.override_builtin
        });
        if let Some(earlier) = shadow {
            errors.push(ContentError::UnreachableRule {
                rule: rule.id.clone(),
                shadowed_by: earlier.id.clone(),
            });
        }
    }
}
