//! The turn loop.
//!
//! A [`Session`] owns the world state and walks each input line through the
//! dispatcher phases: parse, offer to the rules, fall back to the built-in
//! action, then run turn rules and timers and report. Parse and action
//! failures end the cycle early with a message and leave the state as it
//! was.

use std::path::Path;
use std::sync::Arc;

use rift_core::vocabulary::verbs;
use rift_core::{Content, Ending, Vocabulary, WorldState};

use crate::actions;
use crate::config::SessionConfig;
use crate::error::{EngineResult, SaveError};
use crate::events::EventManager;
use crate::parser::{Command, parse};
use crate::save;

const GAME_OVER: &str = "The game is over.";

const DEFAULT_HELP: &str = "Commands: LOOK, GO <direction> (or just N, S, E, W, U, D), \
EXAMINE <item>, TAKE <item>, DROP <item>, USE <item>, COMBINE <item> WITH <item>, \
INVENTORY, SCORE, SAVE, LOAD, HELP, QUIT.";

/// Where the dispatcher is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the next line.
    AwaitingInput,
    /// Turning the line into a command.
    Parsing,
    /// Offering the command to the rules.
    EventCheck,
    /// Running the built-in action.
    ActionFallback,
    /// Assembling the turn's text.
    Output,
    /// The game is over; no further input changes anything.
    Ended,
}

/// The result of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Text to show the player.
    pub display_text: String,
    /// Whether the game is now over.
    pub game_ended: bool,
    /// Score after the turn.
    pub score: i64,
}

/// A running game.
pub struct Session {
    content: Arc<Content>,
    vocabulary: Vocabulary,
    events: EventManager,
    state: WorldState,
    config: SessionConfig,
    phase: Phase,
    started: bool,
}

impl Session {
    /// Validate content and set up a session at the start room.
    pub fn new(content: Arc<Content>, config: SessionConfig) -> EngineResult<Self> {
        content.validate()?;
        let vocabulary = Vocabulary::from_content(&content)?;
        let events = EventManager::new(&content);
        let state = WorldState::initial(&content);
        Ok(Self {
            content,
            vocabulary,
            events,
            state,
            config,
            phase: Phase::AwaitingInput,
            started: false,
        })
    }

    /// Load content from a directory and set up a session.
    pub fn from_dir(dir: &Path, config: SessionConfig) -> EngineResult<Self> {
        let content = Content::load_dir(dir)?;
        Self::new(Arc::new(content), config)
    }

    /// The static content.
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// The word table in use.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The current world state.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The dispatcher phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the game is over.
    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    fn max_inventory(&self) -> usize {
        self.config
            .max_inventory
            .unwrap_or(self.content.manifest.max_inventory)
    }

    /// Opening text: the intro, the start room, and any turn rules that
    /// already hold.
    ///
    /// Only the first call does this. Later calls describe the current room
    /// and change nothing.
    pub fn start(&mut self) -> TurnOutcome {
        if self.started {
            let room = actions::describe_room(&self.state, &self.content, false);
            return self.outcome(room);
        }
        self.started = true;
        let mut out = vec![self.content.manifest.intro.clone()];
        if let Some(flag) = self
            .content
            .room(self.state.current_room())
            .and_then(|room| room.visit_flag.as_deref())
        {
            self.state.set_flag(flag);
        }
        out.push(actions::describe_room(&self.state, &self.content, true));
        out.extend(self.events.run_turn_rules(&mut self.state, &self.content));
        self.finish(out)
    }

    /// Run one line of input through the pipeline.
    pub fn process_turn(&mut self, input: &str) -> TurnOutcome {
        if self.state.is_ended() {
            self.phase = Phase::Ended;
            return self.outcome(GAME_OVER.to_string());
        }

        self.phase = Phase::Parsing;
        let command = match parse(input, &self.vocabulary) {
            Ok(command) => command,
            Err(failure) => return self.finish(vec![failure.to_string()]),
        };
        if let Some(text) = self.meta(&command) {
            return self.finish(vec![text]);
        }

        let score_before = self.state.score();
        let mut out = Vec::new();

        self.phase = Phase::EventCheck;
        let event = self
            .events
            .dispatch(&command, &mut self.state, &self.content);
        out.push(event.text);
        let mut completed = event.matched;

        if event.run_builtin && !self.state.is_ended() {
            self.phase = Phase::ActionFallback;
            let max_inventory = self.max_inventory();
            match actions::perform(&command, &mut self.state, &self.content, max_inventory) {
                Ok(text) => {
                    out.push(text);
                    // Reading the score is free.
                    completed |= !command.is(verbs::SCORE);
                }
                Err(failure) => out.push(failure.to_string()),
            }
        }

        if completed {
            self.state.next_turn();
            if !self.state.is_ended() {
                out.extend(self.events.run_turn_rules(&mut self.state, &self.content));
                out.extend(self.events.tick_timers(&mut self.state, &self.content));
            }
        }

        if self.config.echo_score && self.state.score() != score_before {
            out.push(format!(
                "[Score: {} / {}]",
                self.state.score(),
                self.content.manifest.max_score
            ));
        }
        self.finish(out)
    }

    // Verbs that act on the session rather than the world. None of them
    // counts as a turn or consults the rules, so QUIT always works.
    fn meta(&mut self, command: &Command) -> Option<String> {
        let text = match command.verb.as_str() {
            verbs::SAVE => match save::save_to(&self.config.save_path, &self.state, &self.content) {
                Ok(()) => format!("Game saved to {}.", self.config.save_path.display()),
                Err(e) => format!("Could not save the game: {e}"),
            },
            verbs::LOAD => match save::load_from(&self.config.save_path, &self.content) {
                Ok(state) => {
                    self.state = state;
                    format!(
                        "Game loaded.\n{}",
                        actions::describe_room(&self.state, &self.content, false)
                    )
                }
                Err(e) => format!("Could not load the game: {e}"),
            },
            verbs::HELP => {
                let help = &self.content.manifest.help;
                if help.is_empty() {
                    DEFAULT_HELP.to_string()
                } else {
                    help.clone()
                }
            }
            verbs::QUIT => {
                self.state.end(Ending::Quit);
                "Thanks for playing!".to_string()
            }
            _ => return None,
        };
        Some(text)
    }

    fn finish(&mut self, mut out: Vec<String>) -> TurnOutcome {
        self.phase = Phase::Output;
        if let Some(ending) = self.state.ending() {
            tracing::info!(
                ?ending,
                score = self.state.score(),
                turns = self.state.turns(),
                "game over"
            );
            out.push(self.ending_text(ending));
            self.phase = Phase::Ended;
        } else {
            self.phase = Phase::AwaitingInput;
        }
        out.retain(|line| !line.is_empty());
        self.outcome(out.join("\n"))
    }

    fn ending_text(&self, ending: Ending) -> String {
        let tally = format!(
            "Final score: {} / {} in {} turns.",
            self.state.score(),
            self.content.manifest.max_score,
            self.state.turns()
        );
        match ending {
            Ending::Won => format!("*** You have won ***\n{tally}"),
            Ending::Lost => format!("*** You have lost ***\n{tally}"),
            Ending::Quit => tally,
        }
    }

    fn outcome(&self, display_text: String) -> TurnOutcome {
        TurnOutcome {
            display_text,
            game_ended: self.state.is_ended(),
            score: self.state.score(),
        }
    }

    /// Encode the current state as save-file JSON.
    pub fn snapshot(&self) -> Result<String, SaveError> {
        save::encode(&self.state, &self.content)
    }

    /// Replace the current state with a snapshot. On error the state is
    /// untouched.
    pub fn restore(&mut self, text: &str) -> Result<(), SaveError> {
        self.state = save::decode(text, &self.content)?;
        self.phase = if self.state.is_ended() {
            Phase::Ended
        } else {
            Phase::AwaitingInput
        };
        Ok(())
    }
}
