//! Listing journal documents.

use super::{summarize, DocumentSummary};
use crate::errors::AppResult;
use crate::store::{DocKind, DocumentStore};
use tracing::debug;

/// Summaries of every document, optionally restricted to one kind.
///
/// Entries come first in date order, then notes by slug, then other files.
pub fn list_documents(
    store: &dyn DocumentStore,
    kind: Option<DocKind>,
) -> AppResult<Vec<DocumentSummary>> {
    let mut summaries = Vec::new();
    for doc in store.list()? {
        if kind.is_some_and(|k| k != doc.kind()) {
            continue;
        }
        summaries.push(summarize(store, &doc)?);
    }
    debug!("Listed {} documents", summaries.len());
    Ok(summaries)
}
