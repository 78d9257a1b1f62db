use std::path::PathBuf;

use crate::vocabulary::WordClass;

/// Alias for `Result<T, ContentError>`.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors raised while loading or validating content.
///
/// All of these are fatal at startup. None of them can occur once a session
/// is running.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A content file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A content file is not valid JSON or has an unknown condition/effect kind.
    #[error("malformed {path}: {source}")]
    Json {
        /// The file that failed.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// The manifest names a start room that does not exist.
    #[error("start room \"{0}\" does not exist")]
    MissingStartRoom(String),

    /// Two records in the same registry share an id.
    #[error("duplicate {kind} id \"{id}\"")]
    DuplicateId {
        /// Registry name (room, item, rule, timer).
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// A reference to a room that does not exist.
    #[error("{context}: unknown room \"{room}\"")]
    UnknownRoom {
        /// Where the reference was found.
        context: String,
        /// The unresolved room id.
        room: String,
    },

    /// A reference to an item that does not exist.
    #[error("{context}: unknown item \"{item}\"")]
    UnknownItem {
        /// Where the reference was found.
        context: String,
        /// The unresolved item id.
        item: String,
    },

    /// A reference to a timer that does not exist.
    #[error("{context}: unknown timer \"{timer}\"")]
    UnknownTimer {
        /// Where the reference was found.
        context: String,
        /// The unresolved timer name.
        timer: String,
    },

    /// A reference to a rule that does not exist.
    #[error("{context}: unknown rule \"{rule}\"")]
    UnknownRule {
        /// Where the reference was found.
        context: String,
        /// The unresolved rule id.
        rule: String,
    },

    /// A direction synonym points at something that is not a direction.
    #[error("\"{word}\" maps to unknown direction \"{target}\"")]
    UnknownDirection {
        /// The surface phrase.
        word: String,
        /// The canonical value it was mapped to.
        target: String,
    },

    /// One surface phrase maps to two different tokens.
    #[error("\"{word}\" is ambiguous: {first_class} {first} vs {second_class} {second}")]
    AmbiguousWord {
        /// The surface phrase.
        word: String,
        /// The token registered first.
        first: String,
        /// Word class of the first token.
        first_class: WordClass,
        /// The conflicting token.
        second: String,
        /// Word class of the conflicting token.
        second_class: WordClass,
    },

    /// A rule is shadowed by an earlier unconditional rule with the same trigger.
    #[error("rule \"{rule}\" can never fire: shadowed by \"{shadowed_by}\"")]
    UnreachableRule {
        /// The unreachable rule.
        rule: String,
        /// The earlier rule that always wins.
        shadowed_by: String,
    },

    /// A room id that collides with an item-location keyword.
    #[error("room id \"{0}\" is reserved for item locations")]
    ReservedRoomId(String),

    /// A rule trigger names a synonym, which the parser never emits.
    #[error("rule \"{rule}\" triggers on \"{word}\", which is read as \"{canonical}\"")]
    NonCanonicalTrigger {
        /// The rule whose trigger can never match.
        rule: String,
        /// The word as written in the trigger.
        word: String,
        /// The token the parser produces for it.
        canonical: String,
    },

    /// Every problem found by a validation pass.
    #[error("{} content error(s), first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    Invalid(Vec<ContentError>),
}
