//! Save file encoding and validation.
//!
//! A save file wraps the whole [`WorldState`] in a small envelope naming the
//! format and the adventure it belongs to. Decoding checks the envelope and
//! the state against the loaded content before anything is replaced, so a
//! bad file can never leave a session half-restored.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use rift_core::{Content, WorldState};
use serde::{Deserialize, Serialize};

use crate::error::SaveError;

/// Format tag written into every save file.
pub const SAVE_FORMAT: &str = "rift-save/1";

/// The on-disk save envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    /// Format tag; must equal [`SAVE_FORMAT`].
    pub format: String,
    /// When the save was written.
    pub saved_at: DateTime<Utc>,
    /// Title of the adventure the state belongs to.
    pub title: String,
    /// The saved state.
    pub state: WorldState,
}

/// Serialize a state into save-file JSON.
pub fn encode(state: &WorldState, content: &Content) -> Result<String, SaveError> {
    let file = SaveFile {
        format: SAVE_FORMAT.to_string(),
        saved_at: Utc::now(),
        title: content.manifest.title.clone(),
        state: state.clone(),
    };
    serde_json::to_string_pretty(&file)
        .map_err(|e| SaveError::Corrupt(format!("cannot encode state: {e}")))
}

/// Parse and check save-file JSON against the loaded content.
pub fn decode(text: &str, content: &Content) -> Result<WorldState, SaveError> {
    let file: SaveFile =
        serde_json::from_str(text).map_err(|e| reject(format!("unreadable save data: {e}")))?;
    if file.format != SAVE_FORMAT {
        return Err(reject(format!("unsupported format \"{}\"", file.format)));
    }
    if file.title != content.manifest.title {
        return Err(reject(format!(
            "save belongs to \"{}\", not \"{}\"",
            file.title, content.manifest.title
        )));
    }
    if let Some(problem) = file.state.inconsistencies(content).into_iter().next() {
        return Err(reject(problem));
    }
    Ok(file.state)
}

fn reject(reason: String) -> SaveError {
    tracing::warn!(%reason, "rejected save data");
    SaveError::Corrupt(reason)
}

/// Write a state to a save file.
pub fn save_to(path: &Path, state: &WorldState, content: &Content) -> Result<(), SaveError> {
    let text = encode(state, content)?;
    fs::write(path, text).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), turns = state.turns(), "game saved");
    Ok(())
}

/// Read and check a save file.
pub fn load_from(path: &Path, content: &Content) -> Result<WorldState, SaveError> {
    let text = fs::read_to_string(path).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let state = decode(&text, content)?;
    tracing::info!(path = %path.display(), turns = state.turns(), "game loaded");
    Ok(state)
}
