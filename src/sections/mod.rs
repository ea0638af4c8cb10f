//! Section splitting for journal documents.
//!
//! A document is cut into sections at boundary lines: blank lines and
//! separator lines (`---`, `***`, `___` or longer runs of one of those
//! characters). Boundaries belong to no section. This works for freeform
//! writing that never uses headings as well as for visually separated entries.
//!
//! Splitting is pure. Section records are recomputed on every call and never
//! cached.

pub mod extract;

pub use extract::{extract, BlankLinePolicy, ExtractionResult};

use crate::constants::{EMPTY_SECTION_TITLE, MIN_SEPARATOR_RUN};
use serde::Serialize;

/// A contiguous run of content lines within a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// 1-based ordinal among sections in document order.
    pub index: usize,
    /// 1-based line number of the first line.
    pub start_line: usize,
    /// 1-based line number of the last line (inclusive).
    pub end_line: usize,
    /// First line with heading markers stripped.
    pub title: String,
    /// Whitespace-normalized text of the whole section.
    pub preview: String,
    /// The literal source lines, used verbatim when extracting.
    #[serde(skip)]
    pub raw_lines: Vec<String>,
}

impl Section {
    fn from_lines(index: usize, start_line: usize, raw_lines: Vec<String>) -> Self {
        let end_line = start_line + raw_lines.len() - 1;
        let title = derive_title(&raw_lines);
        let preview = derive_preview(&raw_lines);
        Section {
            index,
            start_line,
            end_line,
            title,
            preview,
            raw_lines,
        }
    }

    /// Number of lines in the section.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Returns true for `---`, `***`, `___` and longer runs of a single one of those characters.
pub fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let first = match chars.next() {
        Some(c @ ('-' | '*' | '_')) => c,
        _ => return false,
    };
    trimmed.chars().count() >= MIN_SEPARATOR_RUN && chars.all(|c| c == first)
}

/// Returns true for empty or whitespace-only lines.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Returns true if the line separates sections.
pub fn is_boundary(line: &str) -> bool {
    is_blank(line) || is_separator(line)
}

/// Line terminator used by `text`: `"\r\n"` when any line ends that way.
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Splits a markdown document into its sections.
///
/// A document with no content lines yields an empty list.
///
/// # Examples
///
/// ```
/// use quill::sections::split;
///
/// let sections = split("Line A\n\n---\n\nLine B");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].title, "Line A");
/// assert_eq!(sections[1].title, "Line B");
/// assert_eq!(sections[1].start_line, 5);
/// ```
pub fn split(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_start = 0;

    for (offset, line) in text.lines().enumerate() {
        if is_boundary(line) {
            if !current.is_empty() {
                let index = sections.len() + 1;
                sections.push(Section::from_lines(
                    index,
                    current_start,
                    std::mem::take(&mut current),
                ));
            }
            continue;
        }

        if current.is_empty() {
            current_start = offset + 1;
        }
        current.push(line.to_string());
    }

    if !current.is_empty() {
        let index = sections.len() + 1;
        sections.push(Section::from_lines(index, current_start, current));
    }

    tracing::debug!("Split document into {} sections", sections.len());
    sections
}

fn derive_title(raw_lines: &[String]) -> String {
    let title = raw_lines
        .first()
        .map(|line| line.trim().trim_start_matches('#').trim())
        .unwrap_or_default();

    if title.is_empty() {
        EMPTY_SECTION_TITLE.to_string()
    } else {
        title.to_string()
    }
}

fn derive_preview(raw_lines: &[String]) -> String {
    raw_lines
        .iter()
        .flat_map(|line| line.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}
