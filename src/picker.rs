//! Interactive selection and preview.
//!
//! Selection is an external capability: quill hands a list of candidates to a
//! picker process and reads back the choice. The preview shown next to each
//! candidate is produced by a command the picker runs itself.

use crate::errors::{AppError, AppResult};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// One selectable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Text shown in the picker.
    pub label: String,
    /// Document path, passed to the previewer.
    pub path: PathBuf,
}

/// Produces the shell command a picker runs to preview a candidate.
pub trait Previewer {
    /// Command line with `placeholder` standing for the candidate's path.
    fn command_for(&self, placeholder: &str) -> String;
}

/// Previews with an external command such as `cat` or `bat`.
pub struct CommandPreviewer {
    /// The preview command.
    pub command: String,
}

impl Previewer for CommandPreviewer {
    fn command_for(&self, placeholder: &str) -> String {
        format!("{} {}", self.command, placeholder)
    }
}

/// Lets the user choose among candidates.
pub trait Picker {
    /// Returns the index of the chosen candidate, or `None` when the user
    /// cancelled.
    fn pick(&self, candidates: &[Candidate], previewer: &dyn Previewer) -> AppResult<Option<usize>>;
}

/// A `Picker` backed by an fzf-compatible command.
///
/// Candidates are written to the picker's stdin as `label<TAB>path`; only the
/// label is displayed and the path is handed to the preview command.
pub struct CommandPicker {
    /// The picker command (e.g., "fzf", "sk").
    pub command: String,
}

/// Exit codes fzf uses for "no match" and "interrupted".
const CANCEL_EXIT_CODES: &[i32] = &[1, 130];

impl Picker for CommandPicker {
    fn pick(&self, candidates: &[Candidate], previewer: &dyn Previewer) -> AppResult<Option<usize>> {
        if candidates.is_empty() {
            return Ok(None);
        }

        let input = candidates
            .iter()
            .map(|c| format!("{}\t{}", c.label, c.path.display()))
            .collect::<Vec<_>>()
            .join("\n");

        debug!("Launching picker with {} candidates", candidates.len());
        let mut child = Command::new(&self.command)
            .args(["--delimiter", "\t", "--with-nth", "1", "--preview"])
            .arg(previewer.command_for("{2}"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| AppError::Picker(format!("Failed to launch '{}': {}", self.command, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return match output.status.code() {
                Some(code) if CANCEL_EXIT_CODES.contains(&code) => Ok(None),
                code => Err(AppError::Picker(format!(
                    "'{}' exited with status {:?}",
                    self.command, code
                ))),
            };
        }

        let selected = String::from_utf8_lossy(&output.stdout);
        Ok(parse_selection(selected.trim_end(), candidates))
    }
}

fn parse_selection(line: &str, candidates: &[Candidate]) -> Option<usize> {
    let path = line.split('\t').nth(1)?;
    candidates
        .iter()
        .position(|c| c.path.to_string_lossy() == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate {
                label: "2024-01-15  Monday".to_string(),
                path: PathBuf::from("/journal/20240115.md"),
            },
            Candidate {
                label: "ideas".to_string(),
                path: PathBuf::from("/journal/notes/ideas.md"),
            },
        ]
    }

    #[test]
    fn test_preview_command() {
        let previewer = CommandPreviewer {
            command: "bat".to_string(),
        };
        assert_eq!(previewer.command_for("{2}"), "bat {2}");
    }

    #[test]
    fn test_parse_selection() {
        let candidates = candidates();
        assert_eq!(
            parse_selection("ideas\t/journal/notes/ideas.md", &candidates),
            Some(1)
        );
        assert_eq!(parse_selection("unknown\t/elsewhere.md", &candidates), None);
        assert_eq!(parse_selection("", &candidates), None);
    }

    #[test]
    fn test_empty_candidates_are_cancelled() {
        let picker = CommandPicker {
            command: "quill-picker-that-does-not-exist".to_string(),
        };
        let previewer = CommandPreviewer {
            command: "cat".to_string(),
        };
        assert_eq!(picker.pick(&[], &previewer).unwrap(), None);
    }

    #[test]
    fn test_missing_picker_command() {
        let picker = CommandPicker {
            command: "quill-picker-that-does-not-exist".to_string(),
        };
        let previewer = CommandPreviewer {
            command: "cat".to_string(),
        };
        assert!(matches!(
            picker.pick(&candidates(), &previewer),
            Err(AppError::Picker(_))
        ));
    }
}
