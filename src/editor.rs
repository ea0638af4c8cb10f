//! Editor abstraction for opening journal documents.
//!
//! Operations receive an `Editor` instead of spawning processes themselves,
//! which keeps them testable with a recording mock.

use crate::errors::{AppResult, EditorError};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Opens files for the user to edit.
///
/// # Examples
///
/// ```
/// use quill::editor::Editor;
/// use quill::errors::AppResult;
/// use std::path::PathBuf;
///
/// struct DummyEditor;
///
/// impl Editor for DummyEditor {
///     fn open_files(&self, paths: &[PathBuf]) -> AppResult<()> {
///         println!("Would open files: {:?}", paths);
///         Ok(())
///     }
/// }
///
/// DummyEditor.open_files(&[PathBuf::from("20240115.md")]).unwrap();
/// ```
pub trait Editor {
    /// Opens one or more files and returns once the user is done with them.
    ///
    /// # Errors
    ///
    /// Implementations return `AppError::Editor` when the files cannot be opened.
    fn open_files(&self, paths: &[PathBuf]) -> AppResult<()>;
}

/// An `Editor` that launches an external command with the paths as arguments.
pub struct SystemEditor {
    /// The command to use for opening files (e.g., "vim", "code", "nano").
    pub editor_cmd: String,
}

impl Editor for SystemEditor {
    /// Launches the editor and waits for it to exit.
    ///
    /// An empty path list returns immediately.
    ///
    /// # Errors
    ///
    /// - `EditorError::CommandNotFound` if the editor command doesn't exist
    /// - `EditorError::PermissionDenied` if permission is denied to execute the editor
    /// - `EditorError::ExecutionFailed` for other I/O errors during execution
    /// - `EditorError::NonZeroExit` if the editor exits with a non-zero status code
    fn open_files(&self, paths: &[PathBuf]) -> AppResult<()> {
        if paths.is_empty() {
            return Ok(());
        }

        debug!("Launching editor with {} files", paths.len());
        let status = Command::new(&self.editor_cmd)
            .args(paths)
            .status()
            .map_err(|e| EditorError::from_spawn_error(&self.editor_cmd, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(EditorError::NonZeroExit {
                command: self.editor_cmd.clone(),
                status_code: status.code().unwrap_or(-1),
            }
            .into())
        }
    }
}
