//! Interactive browsing: pick a document, then open it.

use super::open::{open_resolved, OpenReport};
use super::summarize;
use crate::editor::Editor;
use crate::errors::AppResult;
use crate::picker::{Candidate, Picker, Previewer};
use crate::state::StateStore;
use crate::store::{DocRef, DocumentStore};
use chrono::{DateTime, Local};
use std::cmp::Reverse;
use tracing::info;

/// What the user did in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseOutcome {
    /// A document was chosen and opened.
    Opened(OpenReport),
    /// The picker was dismissed, or there was nothing to pick from.
    Cancelled,
}

/// Lists every document in a picker and opens the one chosen.
///
/// Entries are offered newest first, followed by notes and other files.
pub fn browse(
    store: &dyn DocumentStore,
    editor: &dyn Editor,
    state: &dyn StateStore,
    picker: &dyn Picker,
    previewer: &dyn Previewer,
    now: DateTime<Local>,
) -> AppResult<BrowseOutcome> {
    let mut docs = store.list()?;
    docs.sort_by_key(|doc| match doc {
        DocRef::Entry(date) => (0, Some(Reverse(*date))),
        DocRef::Note(_) => (1, None),
        DocRef::Path(_) => (2, None),
    });

    let mut candidates = Vec::with_capacity(docs.len());
    for doc in &docs {
        let summary = summarize(store, doc)?;
        candidates.push(Candidate {
            label: format!("{}  {}", summary.key, summary.title),
            path: summary.path,
        });
    }

    match picker.pick(&candidates, previewer)? {
        Some(choice) if choice < docs.len() => {
            let report = open_resolved(store, editor, state, &docs[choice], now)?;
            Ok(BrowseOutcome::Opened(report))
        }
        _ => {
            info!("Browse cancelled");
            Ok(BrowseOutcome::Cancelled)
        }
    }
}
