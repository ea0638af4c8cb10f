//! Bookkeeping of recently opened documents.
//!
//! State lives behind the `StateStore` trait and is passed explicitly to the
//! operations that need it. The section core never touches it.

use crate::constants::MAX_RECENT_ENTRIES;
use crate::errors::AppResult;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A document the user opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentEntry {
    /// Path of the opened document.
    pub path: PathBuf,
    /// When it was last opened.
    pub opened_at: DateTime<Local>,
}

/// Persistent application state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Recently opened documents, most recent first, without duplicates.
    #[serde(default)]
    pub recent: Vec<RecentEntry>,
}

impl State {
    /// Moves `path` to the front of the recent list.
    pub fn record_opened(&mut self, path: &Path, opened_at: DateTime<Local>) {
        self.recent.retain(|entry| entry.path != path);
        self.recent.insert(
            0,
            RecentEntry {
                path: path.to_path_buf(),
                opened_at,
            },
        );
        self.recent.truncate(MAX_RECENT_ENTRIES);
    }
}

/// Read/update access to the persisted state.
pub trait StateStore {
    /// Loads the current state. A missing state is the default state.
    fn load(&self) -> AppResult<State>;

    /// Replaces the persisted state.
    fn save(&self, state: &State) -> AppResult<()>;
}

/// `StateStore` backed by a JSON file.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    /// Creates a store persisting to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonStateStore { path: path.into() }
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> AppResult<State> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(State::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&text) {
            Ok(state) => Ok(state),
            Err(e) => {
                // A damaged state file only loses history; start over.
                warn!("Ignoring unreadable state file {:?}: {}", self.path, e);
                Ok(State::default())
            }
        }
    }

    fn save(&self, state: &State) -> AppResult<()> {
        let parent = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&parent)?;

        let mut staged = NamedTempFile::new_in(&parent)?;
        serde_json::to_writer_pretty(&mut staged, state)?;
        staged.write_all(b"\n")?;
        staged.persist(&self.path).map_err(|e| e.error)?;

        debug!("Saved state with {} recent entries", state.recent.len());
        Ok(())
    }
}
