//! Opening entries and notes in the editor.

use crate::editor::Editor;
use crate::errors::{AppError, AppResult};
use crate::journal_core;
use crate::state::StateStore;
use crate::store::{DocKind, DocRef, DocumentStore};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Result of opening a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenReport {
    /// Path handed to the editor
    pub path: PathBuf,
    /// Whether the document was created by this call
    pub created: bool,
}

/// Result of resolving a reference without opening it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedReport {
    /// The reference as given
    pub reference: String,
    /// What the reference resolved to
    pub kind: DocKind,
    /// Location on disk
    pub path: PathBuf,
    /// Whether the document exists yet
    pub exists: bool,
}

/// Opens the document named by `reference`, creating it first if needed.
///
/// New dated entries start with a date heading, new notes with their slug as
/// heading. The document is recorded as recently opened before the editor
/// starts.
///
/// # Errors
///
/// Returns `AppError::Journal` for an unusable reference, `AppError::Store`
/// when the new document cannot be written and `AppError::Editor` when the
/// editor fails.
pub fn open_document(
    store: &dyn DocumentStore,
    editor: &dyn Editor,
    state: &dyn StateStore,
    reference: &str,
    now: DateTime<Local>,
) -> AppResult<OpenReport> {
    let doc = store.resolve(reference)?;
    open_resolved(store, editor, state, &doc, now)
}

/// Opens (or creates) the note named `slug`.
pub fn open_note(
    store: &dyn DocumentStore,
    editor: &dyn Editor,
    state: &dyn StateStore,
    slug: &str,
    now: DateTime<Local>,
) -> AppResult<OpenReport> {
    let slug = slug.trim();
    if !journal_core::is_valid_slug(slug) {
        return Err(AppError::Journal(format!(
            "Invalid note name '{}': use letters, digits, '-' or '_'",
            slug
        )));
    }
    open_resolved(store, editor, state, &DocRef::Note(slug.to_string()), now)
}

/// Resolves `reference` and reports where the document lives.
pub fn resolve_reference(store: &dyn DocumentStore, reference: &str) -> AppResult<ResolvedReport> {
    let doc = store.resolve(reference)?;
    Ok(ResolvedReport {
        reference: reference.to_string(),
        kind: doc.kind(),
        path: store.path_of(&doc),
        exists: store.exists(&doc),
    })
}

pub(crate) fn open_resolved(
    store: &dyn DocumentStore,
    editor: &dyn Editor,
    state: &dyn StateStore,
    doc: &DocRef,
    now: DateTime<Local>,
) -> AppResult<OpenReport> {
    let path = store.path_of(doc);
    let created = !store.exists(doc);

    if created {
        let initial = match doc {
            DocRef::Entry(date) => journal_core::entry_header(*date),
            DocRef::Note(slug) => journal_core::note_header(slug),
            DocRef::Path(_) => String::new(),
        };
        store.write(doc, &initial)?;
        info!("Created {:?}", path);
    }

    remember(state, &path, now);

    debug!("Opening {:?} in editor", path);
    editor.open_files(std::slice::from_ref(&path))?;

    Ok(OpenReport { path, created })
}

fn remember(state: &dyn StateStore, path: &std::path::Path, now: DateTime<Local>) {
    // Losing recent-history bookkeeping must not keep the user from writing.
    let result = state.load().and_then(|mut current| {
        current.record_opened(path, now);
        state.save(&current)
    });
    if let Err(e) = result {
        warn!("Could not record {:?} as recently opened: {}", path, e);
    }
}
