//! Core journal functionality without I/O operations.
//!
//! This module contains pure logic for date specifications, entry headers and
//! the tag convention. Nothing here touches the filesystem.

pub mod tags;

use crate::constants;
use chrono::{Duration, NaiveDate};

/// Represents the ways a dated journal entry can be referred to.
///
/// # Examples
///
/// ```
/// use quill::journal_core::DateSpecifier;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
///
/// let date_spec = DateSpecifier::parse("yesterday").unwrap();
/// assert_eq!(date_spec.resolve(today), NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
///
/// let date_spec = DateSpecifier::parse("20230115").unwrap();
/// assert_eq!(date_spec, DateSpecifier::Specific(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DateSpecifier {
    /// Today's journal entry.
    Today,

    /// The entry for the day before today.
    Yesterday,

    /// A specific date's journal entry.
    Specific(NaiveDate),
}

impl DateSpecifier {
    /// Parses `today`, `yesterday`, `YYYY-MM-DD` or `YYYYMMDD`.
    ///
    /// Returns `None` when the string is not a date key, so callers can fall
    /// back to other kinds of reference.
    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "today" => Some(DateSpecifier::Today),
            "yesterday" => Some(DateSpecifier::Yesterday),
            other => parse_date_string(other).map(DateSpecifier::Specific),
        }
    }

    /// Resolves this specifier against the reference date (normally today).
    pub fn resolve(&self, reference_date: NaiveDate) -> NaiveDate {
        match self {
            DateSpecifier::Today => reference_date,
            DateSpecifier::Yesterday => reference_date - Duration::days(1),
            DateSpecifier::Specific(date) => *date,
        }
    }
}

/// Parse a date string in YYYY-MM-DD or YYYYMMDD format
pub fn parse_date_string(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();
    NaiveDate::parse_from_str(date_str, constants::DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(date_str, constants::DATE_FORMAT_COMPACT))
        .ok()
}

/// File stem used for a dated entry (YYYYMMDD).
pub fn entry_file_stem(date: NaiveDate) -> String {
    date.format(constants::DATE_FORMAT_COMPACT).to_string()
}

/// Heading written into a newly created dated entry.
///
/// ```
/// use quill::journal_core::entry_header;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// assert_eq!(entry_header(date), "# January 15, 2023: Sunday\n\n");
/// ```
pub fn entry_header(date: NaiveDate) -> String {
    format!(
        "# {}\n\n",
        date.format(constants::JOURNAL_HEADER_DATE_FORMAT)
    )
}

/// Heading written into a newly created note.
pub fn note_header(slug: &str) -> String {
    format!("# {}\n\n", slug)
}

/// Checks that a slug can name a note file: ASCII letters, digits, `-` and `_`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
