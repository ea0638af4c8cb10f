//! Error handling utilities for the quill application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, the
//! domain-specific error enums it wraps, and the convenience type alias
//! `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with external editors.
///
/// Each variant captures the editor command and, where available, the
/// underlying I/O error.
///
/// # Examples
///
/// ```
/// use quill::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}. This may indicate an issue with editor configuration or the file being edited.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

impl EditorError {
    /// Maps a spawn failure to the matching variant based on the I/O error kind.
    pub fn from_spawn_error(command: &str, source: io::Error) -> Self {
        let command = command.to_string();
        match source.kind() {
            io::ErrorKind::NotFound => EditorError::CommandNotFound { command, source },
            io::ErrorKind::PermissionDenied => EditorError::PermissionDenied { command, source },
            _ => EditorError::ExecutionFailed { command, source },
        }
    }
}

/// Errors raised by the document store.
///
/// # Examples
///
/// ```
/// use quill::errors::StoreError;
/// use std::path::PathBuf;
///
/// let error = StoreError::NotFound { path: PathBuf::from("/journal/notes/ideas.md") };
/// assert!(format!("{}", error).contains("ideas.md"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document does not exist.
    #[error("Document not found: {path}")]
    NotFound {
        /// Resolved path of the missing document
        path: PathBuf,
    },

    /// Reading or writing the document failed.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Errors raised while extracting sections into a note.
///
/// Every variant except `SourceWriteFailed` guarantees that nothing on disk
/// changed.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A requested section index does not exist in the source document.
    #[error("Section {index} does not exist (document has {available} sections)")]
    InvalidSectionIndex {
        /// The requested index
        index: usize,
        /// Number of sections in the document
        available: usize,
    },

    /// No section indices were requested.
    #[error("No sections requested for extraction")]
    EmptySectionList,

    /// The destination slug is empty.
    #[error("Destination slug cannot be empty")]
    EmptySlug,

    /// The destination slug contains characters not allowed in note names.
    #[error("Invalid slug '{0}': use letters, digits, '-' or '_'")]
    InvalidSlug(String),

    /// The source document could not be resolved or read.
    #[error("Source document '{reference}' not found")]
    SourceNotFound {
        /// The reference as given by the caller
        reference: String,
    },

    /// The destination note is the source document itself.
    #[error("Cannot extract sections of {path} into itself")]
    SameDocument {
        /// Path shared by source and destination
        path: PathBuf,
    },

    /// Writing the destination note failed; the source was not touched.
    #[error("Failed to write destination note {path}: {source}. The source document was not modified.")]
    DestinationWriteFailed {
        /// Destination path
        path: PathBuf,
        /// The underlying store error
        #[source]
        source: StoreError,
    },

    /// The destination note was written but rewriting the source failed.
    #[error("Extracted sections were written to {destination} but updating the source {path} failed: {source}. The sections now exist in both files.")]
    SourceWriteFailed {
        /// Source path
        path: PathBuf,
        /// Destination path that already holds the sections
        destination: PathBuf,
        /// The underlying store error
        #[source]
        source: StoreError,
    },
}

/// Represents all possible errors that can occur in the quill application.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use quill::errors::AppError;
///
/// let error = AppError::Config("Missing journal directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing journal directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use quill::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal logic (e.g., invalid date formats or references).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Errors from the interactive picker.
    #[error("Picker error: {0}")]
    Picker(String),

    /// Errors from the document store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Errors from section extraction.
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Errors serializing reports or the state file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this error.
    ///
    /// `5` is reserved for the partial extraction state, where the sections
    /// were written to the destination but the source still holds them.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) => 2,
            AppError::Store(StoreError::NotFound { .. }) => 3,
            AppError::Extract(ExtractError::SourceNotFound { .. }) => 3,
            AppError::Extract(ExtractError::SourceWriteFailed { .. }) => 5,
            AppError::Extract(ExtractError::DestinationWriteFailed { .. }) => 1,
            AppError::Extract(_) | AppError::Journal(_) => 4,
            AppError::Editor(_) | AppError::Picker(_) => 6,
            AppError::Io(_) | AppError::Store(_) | AppError::Json(_) => 1,
        }
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
