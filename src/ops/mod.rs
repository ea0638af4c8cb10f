//! User-facing journal operations.
//!
//! Each operation takes its collaborators (document store, editor, picker,
//! state store, search backend) as trait objects and returns a typed report.
//! Nothing here prints or serializes; that happens in `output` at the
//! application boundary.

pub mod browse;
pub mod extract;
pub mod list;
pub mod open;
pub mod recent;
pub mod search;
pub mod sections;
pub mod tags;
pub mod timeline;

pub use browse::{browse, BrowseOutcome};
pub use extract::{extract_sections, ExtractReport};
pub use list::list_documents;
pub use open::{open_document, open_note, resolve_reference, OpenReport, ResolvedReport};
pub use recent::{recent_documents, RecentDocument};
pub use search::{search_documents, SearchReport};
pub use sections::{list_sections, SectionsReport};
pub use tags::{documents_with_tag, tag_counts, tag_document, TagCount, TagUpdateReport, TaggedReport};
pub use timeline::{timeline, TimelineEntry, TimelineQuery};

use crate::constants::EMPTY_SECTION_TITLE;
use crate::errors::StoreError;
use crate::journal_core::tags::parse_tags;
use crate::sections::split;
use crate::store::{DocKind, DocRef, DocumentStore};
use serde::Serialize;
use std::path::PathBuf;

/// One document as shown by list, tag and browse operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// Entry, note or plain file
    pub kind: DocKind,
    /// ISO date, slug or path
    pub key: String,
    /// Location on disk
    pub path: PathBuf,
    /// Title of the first section
    pub title: String,
    /// Tags from the first two lines
    pub tags: Vec<String>,
}

/// Title of a document: the title of its first section.
pub(crate) fn document_title(text: &str) -> String {
    split(text)
        .into_iter()
        .next()
        .map(|section| section.title)
        .unwrap_or_else(|| EMPTY_SECTION_TITLE.to_string())
}

pub(crate) fn summarize(
    store: &dyn DocumentStore,
    doc: &DocRef,
) -> Result<DocumentSummary, StoreError> {
    let text = store.read(doc)?;
    Ok(summary_from_text(store, doc, &text))
}

pub(crate) fn summary_from_text(
    store: &dyn DocumentStore,
    doc: &DocRef,
    text: &str,
) -> DocumentSummary {
    DocumentSummary {
        kind: doc.kind(),
        key: doc.key(),
        path: store.path_of(doc),
        title: document_title(text),
        tags: parse_tags(text),
    }
}

#[cfg(test)]
pub(crate) mod test_support;
