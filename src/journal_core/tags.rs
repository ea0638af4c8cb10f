//! The two-line tag convention.
//!
//! Tags are `#word` tokens on the first two lines of a document, normally a
//! heading followed by a tag line:
//!
//! ```text
//! # Weekly review
//! #work #planning
//! ```
//!
//! A heading marker followed by a space is not a tag. Tags compare
//! case-insensitively and are stored lower-cased.

use crate::constants::TAG_LINES;

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '/')
}

fn tag_from_token(token: &str) -> Option<String> {
    let word = token
        .strip_prefix('#')?
        .trim_end_matches([',', '.', ';', ':']);
    if word.is_empty() || !word.chars().all(is_tag_char) {
        return None;
    }
    Some(word.to_lowercase())
}

fn tags_on_line(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split_whitespace().filter_map(tag_from_token)
}

/// Normalizes user input such as `#Work` or `work` into a stored tag.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let with_marker = if raw.starts_with('#') {
        raw.to_string()
    } else {
        format!("#{}", raw)
    };
    tag_from_token(&with_marker)
}

/// Returns the tags of a document in order of first appearance.
///
/// # Examples
///
/// ```
/// use quill::journal_core::tags::parse_tags;
///
/// let tags = parse_tags("# Standup\n#Work #team\n\n#ignored on line four");
/// assert_eq!(tags, vec!["work", "team"]);
/// ```
pub fn parse_tags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in text.lines().take(TAG_LINES).flat_map(|line| tags_on_line(line)) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn is_heading(line: &str) -> bool {
    let rest = line.trim_start().trim_start_matches('#');
    line.trim_start().starts_with('#') && (rest.is_empty() || rest.starts_with(' '))
}

/// Adds tags that are not already present, returning the new document text.
///
/// New tags are appended to the existing tag line. Without one, a tag line is
/// inserted after a leading heading, or at the top of the document.
pub fn add_tags(text: &str, new_tags: &[String]) -> String {
    let existing = parse_tags(text);
    let mut missing: Vec<&String> = Vec::new();
    for tag in new_tags {
        if !existing.contains(tag) && !missing.contains(&tag) {
            missing.push(tag);
        }
    }
    if missing.is_empty() {
        return text.to_string();
    }

    let addition = missing
        .iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    let tag_line_index = match lines.first() {
        Some(first) if is_heading(first) => 1,
        _ => 0,
    };

    let has_tag_line = lines
        .get(tag_line_index)
        .is_some_and(|line| tags_on_line(line).next().is_some());

    if has_tag_line {
        let line = &mut lines[tag_line_index];
        line.push(' ');
        line.push_str(&addition);
    } else {
        lines.insert(tag_line_index.min(lines.len()), addition);
    }

    let mut updated = lines.join("\n");
    if text.is_empty() || text.ends_with('\n') {
        updated.push('\n');
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_heading_is_not_a_tag() {
        assert!(parse_tags("# Title\nbody").is_empty());
        assert!(parse_tags("## Title\n").is_empty());
    }

    #[test]
    fn test_tags_from_first_two_lines_only() {
        let text = "#one\n#two\n#three";
        assert_eq!(parse_tags(text), tags(&["one", "two"]));
    }

    #[test]
    fn test_tags_are_lowercased_and_deduplicated() {
        assert_eq!(parse_tags("# T\n#Work #work #WORK"), tags(&["work"]));
    }

    #[test]
    fn test_trailing_punctuation_is_ignored() {
        assert_eq!(parse_tags("#a, #b."), tags(&["a", "b"]));
    }

    #[test]
    fn test_nested_tags_are_allowed() {
        assert_eq!(parse_tags("#project/quill"), tags(&["project/quill"]));
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("Work"), Some("work".to_string()));
        assert_eq!(normalize_tag("#work"), Some("work".to_string()));
        assert_eq!(normalize_tag("two words"), None);
        assert_eq!(normalize_tag("#"), None);
    }

    #[test]
    fn test_add_tags_after_heading() {
        let updated = add_tags("# Title\n\nbody\n", &tags(&["work"]));
        assert_eq!(updated, "# Title\n#work\n\nbody\n");
        assert_eq!(parse_tags(&updated), tags(&["work"]));
    }

    #[test]
    fn test_add_tags_extends_existing_line() {
        let updated = add_tags("# Title\n#work\nbody", &tags(&["work", "home"]));
        assert_eq!(updated, "# Title\n#work #home\nbody");
    }

    #[test]
    fn test_add_tags_without_heading() {
        let updated = add_tags("just text\n", &tags(&["misc"]));
        assert_eq!(updated, "#misc\njust text\n");
    }

    #[test]
    fn test_add_tags_to_empty_document() {
        assert_eq!(add_tags("", &tags(&["misc"])), "#misc\n");
    }

    #[test]
    fn test_add_existing_tags_is_a_no_op() {
        let text = "# Title\n#work\n";
        assert_eq!(add_tags(text, &tags(&["work"])), text);
    }
}
