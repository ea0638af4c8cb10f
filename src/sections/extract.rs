//! Moving sections out of a document.
//!
//! Extraction is computed entirely in memory. The caller persists the two
//! outputs, destination first.

use super::{is_blank, is_boundary, line_ending, Section};
use crate::constants::DEFAULT_MAX_BLANK_RUN;
use crate::errors::ExtractError;
use std::collections::BTreeSet;

/// Whitespace normalization applied to the source after sections are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankLinePolicy {
    /// Longest run of consecutive blank lines left untouched. Longer runs
    /// collapse to a single blank line.
    pub max_blank_run: usize,
    /// Drop one blank line left at the very end of the document.
    pub trim_trailing_blank: bool,
}

impl Default for BlankLinePolicy {
    fn default() -> Self {
        BlankLinePolicy {
            max_blank_run: DEFAULT_MAX_BLANK_RUN,
            trim_trailing_blank: true,
        }
    }
}

impl BlankLinePolicy {
    fn normalize<'a>(&self, lines: Vec<&'a str>) -> Vec<&'a str> {
        let mut normalized = Vec::with_capacity(lines.len());
        let mut run: Vec<&'a str> = Vec::new();

        for line in lines {
            if is_blank(line) {
                run.push(line);
                continue;
            }
            self.flush_run(&mut run, &mut normalized);
            normalized.push(line);
        }
        self.flush_run(&mut run, &mut normalized);

        if self.trim_trailing_blank && normalized.last().is_some_and(|line| is_blank(line)) {
            normalized.pop();
        }
        normalized
    }

    fn flush_run<'a>(&self, run: &mut Vec<&'a str>, out: &mut Vec<&'a str>) {
        if run.len() > self.max_blank_run {
            out.push(run[0]);
        } else {
            out.extend(run.iter().copied());
        }
        run.clear();
    }
}

/// The two replacement texts produced by an extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Full new content of the source document.
    pub remaining_source_text: String,
    /// Extracted sections, in document order, separated by one blank line.
    pub new_note_text: String,
    /// Indices that were extracted, ascending and deduplicated.
    pub extracted: Vec<usize>,
}

/// Removes the sections named by `indices` from `document_text`.
///
/// `sections` must be the result of splitting `document_text`. The request is
/// validated in full before anything is computed, so an invalid index never
/// yields a partial result. Index order and duplicates in `indices` do not
/// matter.
///
/// # Errors
///
/// - `ExtractError::EmptySectionList` when `indices` is empty
/// - `ExtractError::InvalidSectionIndex` for the smallest index with no section
///
/// # Examples
///
/// ```
/// use quill::sections::{extract, split, BlankLinePolicy};
///
/// let text = "one\n\ntwo\n\nthree\n";
/// let sections = split(text);
/// let result = extract(text, &[2], &sections, &BlankLinePolicy::default()).unwrap();
///
/// assert_eq!(result.new_note_text, "two\n");
/// assert_eq!(result.remaining_source_text, "one\n\nthree\n");
/// ```
pub fn extract(
    document_text: &str,
    indices: &[usize],
    sections: &[Section],
    policy: &BlankLinePolicy,
) -> Result<ExtractionResult, ExtractError> {
    if indices.is_empty() {
        return Err(ExtractError::EmptySectionList);
    }

    let wanted: BTreeSet<usize> = indices.iter().copied().collect();
    if let Some(&index) = wanted
        .iter()
        .find(|&&index| !sections.iter().any(|s| s.index == index))
    {
        return Err(ExtractError::InvalidSectionIndex {
            index,
            available: sections.len(),
        });
    }

    let mut resolved: Vec<&Section> = sections
        .iter()
        .filter(|s| wanted.contains(&s.index))
        .collect();
    resolved.sort_by_key(|s| s.index);

    let new_note_text = build_note_text(&resolved, line_ending(document_text));
    let remaining_source_text = build_remaining_text(document_text, &resolved, policy);

    tracing::debug!(
        "Extracted {} sections, {} bytes remain in source",
        resolved.len(),
        remaining_source_text.len()
    );

    Ok(ExtractionResult {
        remaining_source_text,
        new_note_text,
        extracted: resolved.iter().map(|s| s.index).collect(),
    })
}

fn build_note_text(resolved: &[&Section], newline: &str) -> String {
    let mut text = resolved
        .iter()
        .map(|section| section.raw_lines.join(newline))
        .collect::<Vec<_>>()
        .join(newline.repeat(2).as_str());
    text.push_str(newline);
    text
}

fn build_remaining_text(
    document_text: &str,
    resolved: &[&Section],
    policy: &BlankLinePolicy,
) -> String {
    let kept: Vec<&str> = document_text
        .lines()
        .enumerate()
        .filter(|(offset, _)| {
            let line_number = offset + 1;
            !resolved
                .iter()
                .any(|s| (s.start_line..=s.end_line).contains(&line_number))
        })
        .map(|(_, line)| line)
        .collect();

    let kept = policy.normalize(kept);

    // Nothing but blank lines and separators left.
    if kept.iter().all(|line| is_boundary(line)) {
        return String::new();
    }

    let newline = line_ending(document_text);
    let mut text = kept.join(newline);
    if document_text.ends_with('\n') {
        text.push_str(newline);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::split;

    fn run(text: &str, indices: &[usize]) -> Result<ExtractionResult, ExtractError> {
        let sections = split(text);
        extract(text, indices, &sections, &BlankLinePolicy::default())
    }

    #[test]
    fn test_extract_middle_section_leaves_single_blank_line() {
        let result = run("alpha\n\nbeta\n\ngamma", &[2]).unwrap();

        assert_eq!(result.new_note_text, "beta\n");
        assert_eq!(result.remaining_source_text, "alpha\n\ngamma");
        assert!(!result.remaining_source_text.contains("\n\n\n"));
    }

    #[test]
    fn test_index_order_does_not_matter() {
        let text = "one\n\ntwo\n\nthree\n";
        let forward = run(text, &[1, 2]).unwrap();
        let backward = run(text, &[2, 1]).unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.new_note_text, "one\n\ntwo\n");
        assert_eq!(forward.extracted, vec![1, 2]);
    }

    #[test]
    fn test_duplicate_indices_are_ignored() {
        let result = run("one\n\ntwo", &[2, 2, 2]).unwrap();
        assert_eq!(result.new_note_text, "two\n");
        assert_eq!(result.extracted, vec![2]);
    }

    #[test]
    fn test_invalid_index_is_rejected() {
        let error = run("one\n\ntwo\n\nthree", &[1, 5]).unwrap_err();
        match error {
            ExtractError::InvalidSectionIndex { index, available } => {
                assert_eq!(index, 5);
                assert_eq!(available, 3);
            }
            other => panic!("Expected InvalidSectionIndex, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_index_is_rejected() {
        assert!(matches!(
            run("one", &[0]),
            Err(ExtractError::InvalidSectionIndex { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_request_is_rejected() {
        assert!(matches!(run("one", &[]), Err(ExtractError::EmptySectionList)));
    }

    #[test]
    fn test_extracting_everything_leaves_empty_source() {
        let text = "# Title\n\nfirst\n\n---\n\nsecond\n";
        let result = run(text, &[1, 2, 3]).unwrap();

        assert_eq!(result.remaining_source_text, "");
        assert_eq!(result.new_note_text, "# Title\n\nfirst\n\nsecond\n");
    }

    #[test]
    fn test_full_extraction_round_trips_content() {
        let text = "# Day\nmorning notes\n\n\n\nafternoon\n---\nevening\n";
        let sections = split(text);
        let all: Vec<usize> = sections.iter().map(|s| s.index).collect();
        let result = extract(text, &all, &sections, &BlankLinePolicy::default()).unwrap();

        let rebuilt = format!("{}{}", result.remaining_source_text, result.new_note_text);
        let original_previews: Vec<_> = sections.iter().map(|s| s.preview.clone()).collect();
        let rebuilt_previews: Vec<_> = split(&rebuilt).iter().map(|s| s.preview.clone()).collect();
        assert_eq!(original_previews, rebuilt_previews);
    }

    #[test]
    fn test_single_section_extraction_is_idempotent() {
        let text = "intro\n\n## Idea\n  keep   this\nand this\n\noutro";
        let sections = split(text);
        let result = extract(text, &[2], &sections, &BlankLinePolicy::default()).unwrap();

        let resplit = split(&result.new_note_text);
        assert_eq!(resplit.len(), 1);
        assert_eq!(resplit[0].preview, sections[1].preview);
        assert_eq!(resplit[0].title, "Idea");
    }

    #[test]
    fn test_raw_formatting_is_preserved() {
        let text = "keep\n\n  - indented item  \n\tcode";
        let result = run(text, &[2]).unwrap();
        assert_eq!(result.new_note_text, "  - indented item  \n\tcode\n");
    }

    #[test]
    fn test_trailing_blank_is_trimmed() {
        let result = run("alpha\n\nbeta\n", &[2]).unwrap();
        assert_eq!(result.remaining_source_text, "alpha\n");
    }

    #[test]
    fn test_separators_survive_extraction() {
        let result = run("alpha\n\n---\n\nbeta\n\n---\n\ngamma\n", &[2]).unwrap();
        assert_eq!(result.remaining_source_text, "alpha\n\n---\n\n---\n\ngamma\n");
    }

    #[test]
    fn test_policy_can_keep_longer_blank_runs() {
        let text = "alpha\n\nbeta\n\ngamma";
        let sections = split(text);
        let policy = BlankLinePolicy {
            max_blank_run: 2,
            trim_trailing_blank: true,
        };
        let result = extract(text, &[2], &sections, &policy).unwrap();
        assert_eq!(result.remaining_source_text, "alpha\n\n\ngamma");
    }

    #[test]
    fn test_policy_can_keep_trailing_blank() {
        let text = "alpha\n\nbeta";
        let sections = split(text);
        let policy = BlankLinePolicy {
            max_blank_run: 1,
            trim_trailing_blank: false,
        };
        let result = extract(text, &[2], &sections, &policy).unwrap();
        assert_eq!(result.remaining_source_text, "alpha\n");
    }
}
