//! Full-text search over the journal.

use crate::errors::AppResult;
use crate::search::{SearchBackend, SearchHit};
use crate::store::DocumentStore;
use serde::Serialize;
use tracing::info;

/// Hits for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// The query as given
    pub query: String,
    /// Matching lines, in document order
    pub hits: Vec<SearchHit>,
}

/// Searches every document for `query` using `backend`.
pub fn search_documents(
    store: &dyn DocumentStore,
    backend: &dyn SearchBackend,
    query: &str,
    limit: usize,
) -> AppResult<SearchReport> {
    let hits = backend.search(store, query, limit)?;
    info!("Search returned {} hits", hits.len());
    Ok(SearchReport {
        query: query.to_string(),
        hits,
    })
}
