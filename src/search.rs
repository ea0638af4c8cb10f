//! Full-text search over journal documents.

use crate::errors::{AppError, AppResult};
use crate::store::{DocKind, DocumentStore};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// A matching line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Kind of the matching document.
    pub kind: DocKind,
    /// Date key, slug or path of the document.
    pub key: String,
    /// Path of the document.
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// The matching line, trimmed.
    pub text: String,
}

/// A full-text search capability.
pub trait SearchBackend {
    /// Returns at most `limit` hits for `query`.
    fn search(
        &self,
        store: &dyn DocumentStore,
        query: &str,
        limit: usize,
    ) -> AppResult<Vec<SearchHit>>;
}

/// Case-insensitive substring scan of every document in the store.
///
/// Hits are ordered by document (entries by date, then notes, then other
/// files) and by line within a document.
pub struct ScanSearch;

impl SearchBackend for ScanSearch {
    fn search(
        &self,
        store: &dyn DocumentStore,
        query: &str,
        limit: usize,
    ) -> AppResult<Vec<SearchHit>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(AppError::Journal("Search query cannot be empty".to_string()));
        }

        let mut hits = Vec::new();
        'documents: for doc in store.list()? {
            let text = store.read(&doc)?;
            for (offset, line) in text.lines().enumerate() {
                if !line.to_lowercase().contains(&needle) {
                    continue;
                }
                if hits.len() == limit {
                    break 'documents;
                }
                hits.push(SearchHit {
                    kind: doc.kind(),
                    key: doc.key(),
                    path: store.path_of(&doc),
                    line: offset + 1,
                    text: line.trim().to_string(),
                });
            }
        }

        debug!("Search for {:?} found {} hits", query, hits.len());
        Ok(hits)
    }
}
