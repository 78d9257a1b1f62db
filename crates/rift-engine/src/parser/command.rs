//! Turning a line of input into a canonical command.

use std::fmt;

use rift_core::vocabulary::{normalize, verbs};
use rift_core::{Token, Vocabulary, WordClass};

use super::suggest::suggest_word;
use crate::error::ParseFailure;

/// Filler words dropped between nouns.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "at", "to", "on", "in", "into", "from", "with", "some",
];

/// Splits a two-object sentence into its noun phrases.
const JOINER: &str = "with";

/// A parsed player command: a verb and up to two objects, all canonical.
///
/// Commands carry no trace of the words typed, so every synonym of a
/// sentence parses to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    /// The action.
    pub verb: Token,
    /// The direct object.
    pub primary: Option<Token>,
    /// The indirect object.
    pub secondary: Option<Token>,
}

impl Command {
    /// A command with no objects.
    pub fn new(verb: impl Into<Token>) -> Self {
        Self {
            verb: verb.into(),
            primary: None,
            secondary: None,
        }
    }

    /// Set the direct object.
    pub fn with_primary(mut self, object: impl Into<Token>) -> Self {
        self.primary = Some(object.into());
        self
    }

    /// Set the indirect object.
    pub fn with_secondary(mut self, object: impl Into<Token>) -> Self {
        self.secondary = Some(object.into());
        self
    }

    /// Whether the verb is one of the given canonical verbs.
    pub fn is(&self, verb: &str) -> bool {
        self.verb == verb
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.verb)?;
        for object in [&self.primary, &self.secondary].into_iter().flatten() {
            write!(f, " {object}")?;
        }
        Ok(())
    }
}

/// Parse a line of player input.
///
/// The first known phrase must be a verb or a direction; a bare direction
/// means GO. Whatever follows is read as noun phrases, longest match first,
/// with filler words skipped. A `with` splits the rest into a direct and an
/// indirect object. Parsing never touches world state.
pub fn parse(input: &str, vocab: &Vocabulary) -> Result<Command, ParseFailure> {
    let words: Vec<String> = input
        .split_whitespace()
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        return Err(ParseFailure::EmptyInput);
    }

    let start = words
        .iter()
        .position(|w| !is_stop_word(w))
        .unwrap_or_default();
    let Some((head, class, len)) =
        longest_match(&words[start..], vocab, &[WordClass::Verb, WordClass::Direction])
    else {
        return Err(ParseFailure::UnknownVerb(words[start].clone()));
    };

    let mut objects = Vec::new();
    let verb = if class == WordClass::Direction {
        objects.push(head);
        Token::new(verbs::GO)
    } else {
        head
    };

    let rest = &words[start + len..];
    let (left, right) = match rest.iter().position(|w| w == JOINER) {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };
    objects.extend(noun_phrase(left, vocab)?);

    // Each side of the joiner holds at most one object; without it, the
    // sentence holds at most two.
    let (primary, secondary) = match right {
        Some(words) => {
            let mut second = noun_phrase(words, vocab)?;
            if objects.len() > 1 || second.len() > 1 {
                return Err(ParseFailure::TooManyObjects);
            }
            (objects.pop(), second.pop())
        }
        None => {
            if objects.len() > 2 {
                return Err(ParseFailure::TooManyObjects);
            }
            let mut objects = objects.into_iter();
            (objects.next(), objects.next())
        }
    };

    let command = Command {
        verb,
        primary,
        secondary,
    };
    tracing::trace!(input, command = %command, "parsed");
    Ok(command)
}

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

fn noun_phrase(words: &[String], vocab: &Vocabulary) -> Result<Vec<Token>, ParseFailure> {
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < words.len() {
        if let Some((token, _, len)) =
            longest_match(&words[i..], vocab, &[WordClass::Noun, WordClass::Direction])
        {
            tokens.push(token);
            i += len;
        } else if is_stop_word(&words[i]) {
            i += 1;
        } else {
            return Err(ParseFailure::UnknownNoun {
                word: words[i].clone(),
                suggestion: suggest_word(vocab, &words[i]),
            });
        }
    }
    Ok(tokens)
}

fn longest_match(
    words: &[String],
    vocab: &Vocabulary,
    classes: &[WordClass],
) -> Option<(Token, WordClass, usize)> {
    let max = vocab.longest_phrase().min(words.len());
    (1..=max).rev().find_map(|len| {
        vocab
            .resolve(&words[..len].join(" "))
            .filter(|(_, class)| classes.contains(class))
            .map(|(token, class)| (token.clone(), class, len))
    })
}
