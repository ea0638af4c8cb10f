//! Rendering of operation reports.
//!
//! Every command produces one `Report`. In JSON mode it is printed as a
//! single object tagged with the command name; in text mode it is rendered
//! through `Display` for a terminal.

use crate::constants::TEXT_PREVIEW_CHARS;
use crate::errors::AppResult;
use crate::ops::{
    DocumentSummary, ExtractReport, OpenReport, RecentDocument, ResolvedReport, SearchReport,
    SectionsReport, TagCount, TagUpdateReport, TaggedReport, TimelineEntry,
};
use serde::Serialize;
use std::fmt;

/// The result of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Report {
    /// A document was opened in the editor.
    Opened(OpenReport),
    /// A reference was resolved.
    Resolved(ResolvedReport),
    /// Document listing.
    Listing {
        /// Listed documents
        documents: Vec<DocumentSummary>,
    },
    /// Sections of a document.
    Sections(SectionsReport),
    /// Sections were moved into a note.
    Extracted(ExtractReport),
    /// Tag usage counts.
    Tags {
        /// Tags, most used first
        tags: Vec<TagCount>,
    },
    /// Documents carrying a tag.
    Tagged(TaggedReport),
    /// Tags were added to a document.
    TagsUpdated(TagUpdateReport),
    /// Search hits.
    Search(SearchReport),
    /// Dated entries, newest first.
    Timeline {
        /// Entries in the requested range
        entries: Vec<TimelineEntry>,
    },
    /// Recently opened documents.
    Recent {
        /// Most recent first
        documents: Vec<RecentDocument>,
    },
    /// The user dismissed the picker.
    Cancelled,
}

impl Report {
    /// Compact single-line JSON.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

fn hashtags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_summaries(f: &mut fmt::Formatter<'_>, documents: &[DocumentSummary]) -> fmt::Result {
    if documents.is_empty() {
        return writeln!(f, "No documents found.");
    }
    for doc in documents {
        if doc.tags.is_empty() {
            writeln!(f, "{:<12} {}", doc.key, doc.title)?;
        } else {
            writeln!(f, "{:<12} {}  {}", doc.key, doc.title, hashtags(&doc.tags))?;
        }
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Opened(report) => {
                let note = if report.created { " (new)" } else { "" };
                writeln!(f, "Opened {}{}", report.path.display(), note)
            }
            Report::Resolved(report) => {
                if report.exists {
                    writeln!(f, "{}", report.path.display())
                } else {
                    writeln!(f, "{} (does not exist yet)", report.path.display())
                }
            }
            Report::Listing { documents } => write_summaries(f, documents),
            Report::Sections(report) => {
                if report.sections.is_empty() {
                    return writeln!(f, "{} has no sections.", report.source.display());
                }
                for section in &report.sections {
                    writeln!(
                        f,
                        "{:>3}  lines {}-{}  {}",
                        section.index, section.start_line, section.end_line, section.title
                    )?;
                    writeln!(f, "     {}", truncate(&section.preview, TEXT_PREVIEW_CHARS))?;
                }
                Ok(())
            }
            Report::Extracted(report) => {
                let indices = report
                    .sections
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(
                    f,
                    "Moved section(s) {} from {} to {}",
                    indices,
                    report.source.display(),
                    report.destination.display()
                )?;
                writeln!(f, "{} section(s) remain in the source.", report.remaining_sections)
            }
            Report::Tags { tags } => {
                if tags.is_empty() {
                    return writeln!(f, "No tags found.");
                }
                for tag in tags {
                    writeln!(f, "#{:<20} {}", tag.tag, tag.count)?;
                }
                Ok(())
            }
            Report::Tagged(report) => {
                writeln!(f, "#{}", report.tag)?;
                write_summaries(f, &report.documents)
            }
            Report::TagsUpdated(report) => {
                if report.added.is_empty() {
                    writeln!(f, "{}: no new tags", report.path.display())
                } else {
                    writeln!(
                        f,
                        "{}: added {}",
                        report.path.display(),
                        hashtags(&report.added)
                    )
                }
            }
            Report::Search(report) => {
                if report.hits.is_empty() {
                    return writeln!(f, "No matches for '{}'.", report.query);
                }
                for hit in &report.hits {
                    writeln!(
                        f,
                        "{}:{}: {}",
                        hit.path.display(),
                        hit.line,
                        truncate(&hit.text, TEXT_PREVIEW_CHARS)
                    )?;
                }
                Ok(())
            }
            Report::Timeline { entries } => {
                if entries.is_empty() {
                    return writeln!(f, "No entries in range.");
                }
                for entry in entries {
                    write!(
                        f,
                        "{}  {}  [{} section(s)]",
                        entry.date, entry.title, entry.section_count
                    )?;
                    if !entry.tags.is_empty() {
                        write!(f, "  {}", hashtags(&entry.tags))?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
            Report::Recent { documents } => {
                if documents.is_empty() {
                    return writeln!(f, "Nothing opened yet.");
                }
                for doc in documents {
                    let missing = if doc.exists { "" } else { " (missing)" };
                    writeln!(
                        f,
                        "{}  {}{}",
                        doc.opened_at.format("%Y-%m-%d %H:%M"),
                        doc.path.display(),
                        missing
                    )?;
                }
                Ok(())
            }
            Report::Cancelled => writeln!(f, "Cancelled."),
        }
    }
}
