//! Tag queries and tagging.

use super::{summary_from_text, DocumentSummary};
use crate::errors::{AppError, AppResult};
use crate::journal_core::tags::{add_tags, normalize_tag, parse_tags};
use crate::store::DocumentStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// How many documents carry a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    /// The tag, without `#`
    pub tag: String,
    /// Number of documents carrying it
    pub count: usize,
}

/// Documents carrying one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedReport {
    /// The tag, without `#`
    pub tag: String,
    /// Matching documents
    pub documents: Vec<DocumentSummary>,
}

/// Result of tagging a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagUpdateReport {
    /// Path of the tagged document
    pub path: PathBuf,
    /// All tags of the document after the update
    pub tags: Vec<String>,
    /// Tags that were not present before
    pub added: Vec<String>,
}

/// Every tag in the journal with its document count, most used first.
pub fn tag_counts(store: &dyn DocumentStore) -> AppResult<Vec<TagCount>> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for doc in store.list()? {
        for tag in parse_tags(&store.read(&doc)?) {
            *counts.entry(tag).or_default() += 1;
        }
    }

    let mut counts: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount { tag, count })
        .collect();
    // Stable sort keeps ties in alphabetical order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(counts)
}

/// Documents tagged with `tag` (given with or without `#`).
pub fn documents_with_tag(store: &dyn DocumentStore, tag: &str) -> AppResult<TaggedReport> {
    let tag = parse_tag_argument(tag)?;

    let mut documents = Vec::new();
    for doc in store.list()? {
        let text = store.read(&doc)?;
        if parse_tags(&text).contains(&tag) {
            documents.push(summary_from_text(store, &doc, &text));
        }
    }

    debug!("{} documents tagged #{}", documents.len(), tag);
    Ok(TaggedReport { tag, documents })
}

/// Adds `tags` to the document named by `reference`.
///
/// The document is written once, and only if at least one tag is new.
pub fn tag_document(
    store: &dyn DocumentStore,
    reference: &str,
    tags: &[String],
) -> AppResult<TagUpdateReport> {
    if tags.is_empty() {
        return Err(AppError::Journal("No tags given".to_string()));
    }
    let tags = tags
        .iter()
        .map(|t| parse_tag_argument(t))
        .collect::<AppResult<Vec<_>>>()?;

    let doc = store.resolve(reference)?;
    let text = store.read(&doc)?;
    let before = parse_tags(&text);

    let updated = add_tags(&text, &tags);
    let after = parse_tags(&updated);
    let added: Vec<String> = after
        .iter()
        .filter(|tag| !before.contains(tag))
        .cloned()
        .collect();

    if !added.is_empty() {
        store.write(&doc, &updated)?;
    }

    Ok(TagUpdateReport {
        path: store.path_of(&doc),
        tags: after,
        added,
    })
}

fn parse_tag_argument(raw: &str) -> AppResult<String> {
    normalize_tag(raw).ok_or_else(|| {
        AppError::Journal(format!(
            "Invalid tag '{}': use letters, digits, '-', '_' or '/'",
            raw
        ))
    })
}
