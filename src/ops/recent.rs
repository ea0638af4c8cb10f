//! Recently opened documents.

use crate::errors::AppResult;
use crate::state::StateStore;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

/// A recently opened document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentDocument {
    /// Path of the document
    pub path: PathBuf,
    /// When it was last opened
    pub opened_at: DateTime<Local>,
    /// Whether it still exists
    pub exists: bool,
}

/// The `limit` most recently opened documents, newest first.
pub fn recent_documents(state: &dyn StateStore, limit: usize) -> AppResult<Vec<RecentDocument>> {
    Ok(state
        .load()?
        .recent
        .into_iter()
        .take(limit)
        .map(|entry| RecentDocument {
            exists: entry.path.is_file(),
            path: entry.path,
            opened_at: entry.opened_at,
        })
        .collect())
}
