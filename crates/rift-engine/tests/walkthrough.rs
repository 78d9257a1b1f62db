//! Plays the bundled Void Station Omega adventure end to end.

use std::path::PathBuf;

use rift_core::{Content, Ending};
use rift_engine::{Session, SessionConfig};

fn content_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../content/void_station")
}

fn new_session() -> Session {
    Session::from_dir(&content_dir(), SessionConfig::default()).unwrap()
}

/// Each command with the score expected after it.
const WALKTHROUGH: &[(&str, i64)] = &[
    ("east", 0),
    ("take bar", 0),
    ("take adapter", 5),
    ("west", 5),
    ("use bar", 15),
    ("south", 15),
    ("take card", 30),
    ("east", 40),
    ("examine log", 55),
    ("north", 55),
    ("take chip", 75),
    ("south", 75),
    ("west", 75),
    ("south", 75),
    ("take flashlight", 85),
    ("use bar on locker", 100),
    ("take suit", 110),
    ("wear suit", 120),
    ("north", 120),
    ("down", 120),
    ("take cell", 130),
    ("combine cell with adapter", 150),
    ("east", 150),
    ("use charged cell", 175),
    ("south", 175),
    ("south", 175),
    ("type 7439", 195),
    ("use chip", 215),
    ("launch", 250),
];

#[test]
fn content_is_valid() {
    let content = Content::load_validated(&content_dir()).unwrap();
    assert_eq!(content.manifest.max_score, 250);
}

#[test]
fn full_walkthrough_wins_with_max_score() {
    let mut session = new_session();
    let opening = session.start();
    assert!(opening.display_text.contains("Cryo Bay"));
    assert!(opening.display_text.contains("Exits: East, South (locked)"));

    let last = WALKTHROUGH.len() - 1;
    for (i, (command, score)) in WALKTHROUGH.iter().enumerate() {
        let outcome = session.process_turn(command);
        assert_eq!(outcome.score, *score, "after {command:?}: {}", outcome.display_text);
        assert_eq!(outcome.game_ended, i == last, "after {command:?}");
    }

    let state = session.state();
    assert_eq!(state.score(), 250);
    assert_eq!(state.ending(), Some(Ending::Won));
    assert_eq!(state.turns(), WALKTHROUGH.len() as u32);
    assert!(state.inconsistencies(session.content()).is_empty());
}

#[test]
fn final_turn_reports_win() {
    let mut session = new_session();
    let mut text = String::new();
    for (command, _) in WALKTHROUGH {
        text = session.process_turn(command).display_text;
    }
    assert!(text.contains("blasts free of Void Station Omega"));
    assert!(text.contains("*** You have won ***"));
    assert!(text.ends_with("Final score: 250 / 250 in 29 turns."));
}

#[test]
fn dawdling_after_restoring_power_loses() {
    let mut session = new_session();
    let upto = WALKTHROUGH
        .iter()
        .position(|(c, _)| *c == "use charged cell")
        .unwrap();
    for (command, _) in &WALKTHROUGH[..=upto] {
        session.process_turn(command);
    }
    assert!(session.state().timer_active("overload"));

    let mut outcome = session.process_turn("look");
    for _ in 0..20 {
        if outcome.game_ended {
            break;
        }
        outcome = session.process_turn("look");
    }
    assert!(outcome.game_ended);
    assert!(outcome.display_text.contains("The reactor overloads."));
    assert_eq!(session.state().ending(), Some(rift_core::Ending::Lost));
}

#[test]
fn engineering_is_dark_without_the_flashlight() {
    let mut session = new_session();
    for command in ["east", "take bar", "west", "use bar", "south"] {
        session.process_turn(command);
    }
    let text = session.process_turn("down").display_text;
    assert_eq!(
        text,
        "It's pitch black down here. You can hear machinery ticking somewhere close."
    );
}

#[test]
fn hatch_stays_open_after_use() {
    let mut session = new_session();
    assert_eq!(
        session.process_turn("s").display_text,
        "The hatch to the south is jammed shut."
    );
    for command in ["e", "get crowbar", "w"] {
        session.process_turn(command);
    }
    assert!(session.process_turn("use bar").display_text.contains("slides open"));
    assert_eq!(session.process_turn("use bar").display_text, "Nothing happens.");
    assert_eq!(session.state().score(), 10);
}

#[test]
fn wrong_code_is_rejected() {
    let mut session = new_session();
    let upto = WALKTHROUGH
        .iter()
        .position(|(c, _)| *c == "type 7439")
        .unwrap();
    for (command, _) in &WALKTHROUGH[..upto] {
        session.process_turn(command);
    }
    assert!(
        session
            .process_turn("launch")
            .display_text
            .starts_with("The console flashes: NAVIGATION DATA REQUIRED.")
    );
    assert!(
        session
            .process_turn("type keypad")
            .display_text
            .starts_with("The console buzzes: INVALID INPUT.")
    );
    assert!(!session.state().flag_is_set("pod_unlocked"));
}
