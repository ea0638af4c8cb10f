//! Chronological view of dated entries.

use super::document_title;
use crate::errors::{AppError, AppResult};
use crate::journal_core::tags::parse_tags;
use crate::sections;
use crate::store::{DocRef, DocumentStore};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// Bounds for a timeline listing. All bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineQuery {
    /// Earliest date shown
    pub since: Option<NaiveDate>,
    /// Latest date shown
    pub until: Option<NaiveDate>,
    /// Maximum number of entries
    pub limit: Option<usize>,
}

/// One dated entry in the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Entry date
    pub date: NaiveDate,
    /// Location on disk
    pub path: PathBuf,
    /// Title of the first section
    pub title: String,
    /// Tags from the first two lines
    pub tags: Vec<String>,
    /// Number of sections in the entry
    pub section_count: usize,
}

/// Dated entries within the query bounds, newest first.
pub fn timeline(store: &dyn DocumentStore, query: &TimelineQuery) -> AppResult<Vec<TimelineEntry>> {
    if let (Some(since), Some(until)) = (query.since, query.until) {
        if since > until {
            return Err(AppError::Journal(format!(
                "--since {} is after --until {}",
                since, until
            )));
        }
    }

    let mut dates: Vec<NaiveDate> = store
        .list()?
        .into_iter()
        .filter_map(|doc| match doc {
            DocRef::Entry(date) => Some(date),
            _ => None,
        })
        .filter(|date| query.since.map_or(true, |since| *date >= since))
        .filter(|date| query.until.map_or(true, |until| *date <= until))
        .collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    if let Some(limit) = query.limit {
        dates.truncate(limit);
    }

    dates
        .into_iter()
        .map(|date| -> AppResult<TimelineEntry> {
            let doc = DocRef::Entry(date);
            let text = store.read(&doc)?;
            Ok(TimelineEntry {
                date,
                path: store.path_of(&doc),
                title: document_title(&text),
                tags: parse_tags(&text),
                section_count: sections::split(&text).len(),
            })
        })
        .collect()
}
