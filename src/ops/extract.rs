//! Moving sections of a document into a note.
//!
//! The whole extraction is computed in memory and validated before the first
//! write. The destination note is written before the source, so a failure
//! can leave the sections in both files but never in neither.

use crate::errors::{AppError, AppResult, ExtractError, StoreError};
use crate::journal_core;
use crate::sections::{self, BlankLinePolicy};
use crate::store::{DocRef, DocumentStore};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Outcome of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    /// Always "ok"
    pub status: &'static str,
    /// Path of the source document
    pub source: PathBuf,
    /// Extracted section indices, ascending
    pub sections: Vec<usize>,
    /// Destination note slug
    pub slug: String,
    /// Path of the destination note
    pub destination: PathBuf,
    /// Whether the destination note was created
    pub created: bool,
    /// Number of sections left in the source
    pub remaining_sections: usize,
}

/// Extracts `indices` from the document named by `source` into the note `slug`.
///
/// A new destination note starts with a heading naming the slug. An existing
/// one gets the sections appended after a blank line.
///
/// # Errors
///
/// Validation errors (`EmptySlug`, `InvalidSlug`, `EmptySectionList`,
/// `SourceNotFound`, `SameDocument`, `InvalidSectionIndex`) are raised before
/// anything is written. `DestinationWriteFailed` leaves the source untouched.
/// `SourceWriteFailed` means the destination already holds the sections.
pub fn extract_sections(
    store: &dyn DocumentStore,
    source: &str,
    indices: &[usize],
    slug: &str,
    policy: &BlankLinePolicy,
) -> AppResult<ExtractReport> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(ExtractError::EmptySlug.into());
    }
    if !journal_core::is_valid_slug(slug) {
        return Err(ExtractError::InvalidSlug(slug.to_string()).into());
    }
    if indices.is_empty() {
        return Err(ExtractError::EmptySectionList.into());
    }

    let source_not_found = || ExtractError::SourceNotFound {
        reference: source.to_string(),
    };
    let source_doc = store.resolve(source).map_err(|_| source_not_found())?;
    let source_text = store.read(&source_doc).map_err(|e| match e {
        StoreError::NotFound { .. } => AppError::from(source_not_found()),
        other => AppError::from(other),
    })?;

    let destination_doc = DocRef::Note(slug.to_string());
    if store.same_document(&source_doc, &destination_doc) {
        return Err(ExtractError::SameDocument {
            path: store.path_of(&destination_doc),
        }
        .into());
    }

    let document_sections = sections::split(&source_text);
    let result = sections::extract(&source_text, indices, &document_sections, policy)?;

    let created = !store.exists(&destination_doc);
    let destination_text = if created {
        format!(
            "{}{}",
            journal_core::note_header(slug).replace('\n', sections::line_ending(&source_text)),
            result.new_note_text
        )
    } else {
        let existing = store.read(&destination_doc)?;
        append_sections(&existing, &result.new_note_text)
    };

    let source_path = store.path_of(&source_doc);
    let destination_path = store.path_of(&destination_doc);
    debug!(
        "Extracting sections {:?} from {:?} into {:?}",
        result.extracted, source_path, destination_path
    );

    store
        .write(&destination_doc, &destination_text)
        .map_err(|source| ExtractError::DestinationWriteFailed {
            path: destination_path.clone(),
            source,
        })?;

    if let Err(source) = store.write(&source_doc, &result.remaining_source_text) {
        error!(
            "Sections were written to {:?} but {:?} could not be updated",
            destination_path, source_path
        );
        return Err(ExtractError::SourceWriteFailed {
            path: source_path,
            destination: destination_path,
            source,
        }
        .into());
    }

    info!(
        "Moved {} sections into {:?}",
        result.extracted.len(),
        destination_path
    );

    Ok(ExtractReport {
        status: "ok",
        source: source_path,
        sections: result.extracted,
        slug: slug.to_string(),
        destination: destination_path,
        created,
        remaining_sections: sections::split(&result.remaining_source_text).len(),
    })
}

/// Appends extracted text to an existing note, one blank line after its content.
///
/// The appended lines take the note's line terminator.
fn append_sections(existing: &str, new_text: &str) -> String {
    let base = existing.trim_end_matches(['\n', '\r']);
    if base.trim().is_empty() {
        return new_text.to_string();
    }
    let newline = sections::line_ending(existing);
    let body: String = new_text
        .lines()
        .map(|line| format!("{}{}", line, newline))
        .collect();
    format!("{}{}{}{}", base, newline, newline, body)
}
