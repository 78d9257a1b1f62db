//! Surface-word to token mapping.
//!
//! The vocabulary folds everything the player may type (verbs, nouns,
//! directions, and their synonyms, including multi-word phrases) onto
//! canonical tokens. Every surface phrase maps to at most one token; a clash
//! is a content error caught when the table is built.

use std::collections::BTreeMap;
use std::fmt;

use crate::content::Content;
use crate::direction::Direction;
use crate::error::{ContentError, ContentResult};
use crate::rule::Trigger;
use crate::token::Token;

/// Canonical built-in verbs.
pub mod verbs {
    /// Move through an exit.
    pub const GO: &str = "go";
    /// Describe the current room.
    pub const LOOK: &str = "look";
    /// Describe an item.
    pub const EXAMINE: &str = "examine";
    /// Pick an item up.
    pub const TAKE: &str = "take";
    /// Put an item down.
    pub const DROP: &str = "drop";
    /// Use an item.
    pub const USE: &str = "use";
    /// Combine two items.
    pub const COMBINE: &str = "combine";
    /// List carried items.
    pub const INVENTORY: &str = "inventory";
    /// Show the score.
    pub const SCORE: &str = "score";
    /// Save the session.
    pub const SAVE: &str = "save";
    /// Restore a saved session.
    pub const LOAD: &str = "load";
    /// End the session.
    pub const QUIT: &str = "quit";
    /// Show help.
    pub const HELP: &str = "help";
}

/// Built-in verb phrases, canonical verb first.
const BUILTIN_VERBS: &[(&str, &[&str])] = &[
    (verbs::GO, &["go", "walk", "move", "head", "travel"]),
    (verbs::LOOK, &["look", "l"]),
    (verbs::EXAMINE, &["examine", "x", "inspect", "read", "look at"]),
    (verbs::TAKE, &["take", "get", "grab", "pick up", "collect"]),
    (verbs::DROP, &["drop", "discard", "put down"]),
    (verbs::USE, &["use", "apply", "push", "operate"]),
    (verbs::COMBINE, &["combine", "attach", "join"]),
    (verbs::INVENTORY, &["inventory", "i", "inv"]),
    (verbs::SCORE, &["score"]),
    (verbs::SAVE, &["save"]),
    (verbs::LOAD, &["load", "restore"]),
    (verbs::QUIT, &["quit", "q", "exit"]),
    (verbs::HELP, &["help", "h", "commands"]),
];

/// The grammatical role of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WordClass {
    /// An action.
    Verb,
    /// A thing.
    Noun,
    /// A movement direction.
    Direction,
}

impl fmt::Display for WordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verb => f.write_str("verb"),
            Self::Noun => f.write_str("noun"),
            Self::Direction => f.write_str("direction"),
        }
    }
}

/// Fold a phrase for lookup: lower-case, punctuation stripped from the ends
/// of each word, whitespace collapsed.
pub fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The surface-phrase table.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: BTreeMap<String, (Token, WordClass)>,
    longest_phrase: usize,
}

impl Vocabulary {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in verbs and directions.
    pub fn builtin() -> Self {
        let mut vocab = Self::new();
        let mut errors = Vec::new();
        vocab.add_builtins(&mut errors);
        debug_assert!(errors.is_empty(), "built-in vocabulary clashes: {errors:?}");
        vocab
    }

    /// Build the full table for some content: built-ins, authored synonyms,
    /// item names and aliases, and the nouns and verbs rules mention.
    pub fn from_content(content: &Content) -> ContentResult<Self> {
        let (vocab, errors) = Self::build(content);
        if errors.is_empty() {
            Ok(vocab)
        } else {
            Err(ContentError::Invalid(errors))
        }
    }

    /// Like [`Vocabulary::from_content`], returning the table together with
    /// every clash instead of failing.
    pub fn build(content: &Content) -> (Self, Vec<ContentError>) {
        let mut vocab = Self::new();
        let mut errors = Vec::new();
        vocab.add_builtins(&mut errors);

        let synonyms = &content.synonyms;
        for (surface, canonical) in &synonyms.verb_synonyms {
            vocab.record(canonical, Token::new(canonical), WordClass::Verb, &mut errors);
            vocab.record(surface, Token::new(canonical), WordClass::Verb, &mut errors);
        }
        for (surface, canonical) in &synonyms.direction_synonyms {
            match Direction::parse(canonical) {
                Some(dir) => vocab.record(surface, dir.token(), WordClass::Direction, &mut errors),
                None => errors.push(ContentError::UnknownDirection {
                    word: surface.clone(),
                    target: canonical.clone(),
                }),
            }
        }
        for (surface, canonical) in &synonyms.noun_synonyms {
            vocab.record(canonical, Token::new(canonical), WordClass::Noun, &mut errors);
            vocab.record(surface, Token::new(canonical), WordClass::Noun, &mut errors);
        }

        for item in &content.items {
            let token = Token::new(&item.id);
            vocab.record(&item.id, token.clone(), WordClass::Noun, &mut errors);
            vocab.record(&item.id.replace('_', " "), token.clone(), WordClass::Noun, &mut errors);
            vocab.record(&item.name, token.clone(), WordClass::Noun, &mut errors);
            for alias in &item.aliases {
                vocab.record(alias, token.clone(), WordClass::Noun, &mut errors);
            }
        }

        // Rules may bind verbs and nouns no synonym table mentions. Register
        // them only where the phrase is still free.
        for rule in &content.rules {
            if let Trigger::Command {
                verb,
                object,
                object2,
            } = &rule.trigger
            {
                vocab.record_trigger(&rule.id, verb, WordClass::Verb, &mut errors);
                for noun in [object, object2].into_iter().flatten() {
                    vocab.record_trigger(&rule.id, noun, WordClass::Noun, &mut errors);
                }
            }
        }

        (vocab, errors)
    }

    fn add_builtins(&mut self, errors: &mut Vec<ContentError>) {
        for (canonical, phrases) in BUILTIN_VERBS {
            for phrase in *phrases {
                self.record(phrase, Token::new(canonical), WordClass::Verb, errors);
            }
        }
        for dir in Direction::ALL {
            self.record(dir.name(), dir.token(), WordClass::Direction, errors);
            self.record(dir.abbreviation(), dir.token(), WordClass::Direction, errors);
        }
    }

    // A trigger token that already reads as another token is a synonym, and
    // the parser would never hand it to the rule.
    fn record_trigger(
        &mut self,
        rule: &str,
        token: &Token,
        class: WordClass,
        errors: &mut Vec<ContentError>,
    ) {
        if let Some((canonical, _)) = self.entries.get(&normalize(token.as_str()))
            && canonical != token
        {
            errors.push(ContentError::NonCanonicalTrigger {
                rule: rule.to_string(),
                word: token.as_str().to_string(),
                canonical: canonical.as_str().to_string(),
            });
            return;
        }
        for surface in [token.as_str().to_string(), token.as_str().replace('_', " ")] {
            let key = normalize(&surface);
            if !key.is_empty() && !self.entries.contains_key(&key) {
                self.put(key, token.clone(), class);
            }
        }
    }

    fn record(&mut self, surface: &str, token: Token, class: WordClass, errors: &mut Vec<ContentError>) {
        if let Err(e) = self.insert(surface, token, class) {
            errors.push(e);
        }
    }

    /// Map a surface phrase to a token.
    ///
    /// Re-inserting the same mapping is a no-op; mapping a known phrase to a
    /// different token or class fails with [`ContentError::AmbiguousWord`].
    pub fn insert(&mut self, surface: &str, token: Token, class: WordClass) -> ContentResult<()> {
        let key = normalize(surface);
        if key.is_empty() {
            return Ok(());
        }
        if let Some((existing, existing_class)) = self.entries.get(&key) {
            if *existing == token && *existing_class == class {
                return Ok(());
            }
            return Err(ContentError::AmbiguousWord {
                word: key,
                first: existing.to_string(),
                first_class: *existing_class,
                second: token.to_string(),
                second_class: class,
            });
        }
        self.put(key, token, class);
        Ok(())
    }

    fn put(&mut self, key: String, token: Token, class: WordClass) {
        self.longest_phrase = self.longest_phrase.max(key.split(' ').count());
        self.entries.insert(key, (token, class));
    }

    /// Resolve a word or phrase. Case-insensitive; surrounding punctuation is
    /// ignored. Unknown phrases yield `None`.
    pub fn resolve(&self, phrase: &str) -> Option<(&Token, WordClass)> {
        self.entries
            .get(&normalize(phrase))
            .map(|(token, class)| (token, *class))
    }

    /// The most words any known phrase has.
    pub fn longest_phrase(&self) -> usize {
        self.longest_phrase
    }

    /// Every entry, ordered by surface phrase.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Token, WordClass)> {
        self.entries
            .iter()
            .map(|(surface, (token, class))| (surface.as_str(), token, *class))
    }

    /// Number of surface phrases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
