//! Document storage over the journal directory.
//!
//! Documents are addressed by logical reference: a date key for dated
//! entries, a slug for notes, or a plain path. The store resolves references,
//! reads whole documents and replaces them atomically. It is the only code
//! that writes journal documents.

use crate::constants::{JOURNAL_FILE_EXTENSION, NOTES_SUBDIR};
use crate::errors::{AppError, AppResult, StoreError};
use crate::journal_core::{self, DateSpecifier};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::{self, Permissions};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use walkdir::WalkDir;

/// A resolved document reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocRef {
    /// A dated journal entry.
    Entry(NaiveDate),
    /// A freeform note named by its slug.
    Note(String),
    /// Any other markdown file.
    Path(PathBuf),
}

/// Kind of document, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    /// Dated entry
    Entry,
    /// Slug-named note
    Note,
    /// Plain file
    File,
}

impl DocRef {
    /// The kind of this document.
    pub fn kind(&self) -> DocKind {
        match self {
            DocRef::Entry(_) => DocKind::Entry,
            DocRef::Note(_) => DocKind::Note,
            DocRef::Path(_) => DocKind::File,
        }
    }

    /// Short human-facing key: ISO date, slug, or the path itself.
    pub fn key(&self) -> String {
        match self {
            DocRef::Entry(date) => date.format(crate::constants::DATE_FORMAT_ISO).to_string(),
            DocRef::Note(slug) => slug.clone(),
            DocRef::Path(path) => path.display().to_string(),
        }
    }
}

/// Storage capability used by every journal operation.
///
/// Reads return the full content or fail, writes replace the full content or
/// fail. Implementations must never leave a half-written document behind.
pub trait DocumentStore {
    /// Resolves a logical reference. Date keys take precedence over slugs,
    /// and slugs over paths.
    fn resolve(&self, reference: &str) -> AppResult<DocRef>;

    /// On-disk location of a document.
    fn path_of(&self, doc: &DocRef) -> PathBuf;

    /// Reads a whole document.
    fn read(&self, doc: &DocRef) -> Result<String, StoreError>;

    /// Replaces a whole document, creating it if needed.
    fn write(&self, doc: &DocRef, text: &str) -> Result<(), StoreError>;

    /// Whether the document exists.
    fn exists(&self, doc: &DocRef) -> bool;

    /// Every entry, note and markdown file in the journal, sorted.
    fn list(&self) -> Result<Vec<DocRef>, StoreError>;

    /// Whether two references name the same file on disk.
    ///
    /// Distinct references can alias one file through symlinks or `..`
    /// components, so existing paths are compared after canonicalization.
    fn same_document(&self, a: &DocRef, b: &DocRef) -> bool {
        if a == b {
            return true;
        }
        let identity = |doc: &DocRef| {
            let path = self.path_of(doc);
            fs::canonicalize(&path).unwrap_or(path)
        };
        identity(a) == identity(b)
    }
}

/// `DocumentStore` over a journal directory on the local filesystem.
///
/// Entries live at `<dir>/YYYYMMDD.md`, notes at `<dir>/notes/<slug>.md`.
#[derive(Debug, Clone)]
pub struct FileStore {
    journal_dir: PathBuf,
    today: NaiveDate,
}

impl FileStore {
    /// Creates a store rooted at `journal_dir`. `today` anchors relative date
    /// keys such as `yesterday`.
    pub fn new(journal_dir: impl Into<PathBuf>, today: NaiveDate) -> Self {
        FileStore {
            journal_dir: journal_dir.into(),
            today,
        }
    }

    /// The journal directory.
    pub fn journal_dir(&self) -> &Path {
        &self.journal_dir
    }

    fn notes_dir(&self) -> PathBuf {
        self.journal_dir.join(NOTES_SUBDIR)
    }

    /// Maps a path back to an entry or note when it sits where one would.
    pub fn classify_path(&self, path: &Path) -> DocRef {
        let is_markdown = path
            .extension()
            .is_some_and(|ext| ext == JOURNAL_FILE_EXTENSION);
        let stem = path.file_stem().and_then(|s| s.to_str());

        if let (true, Some(stem), Some(parent)) = (is_markdown, stem, path.parent()) {
            if parent == self.journal_dir && stem.len() == 8 {
                if let Some(date) = journal_core::parse_date_string(stem) {
                    return DocRef::Entry(date);
                }
            }
            if parent == self.notes_dir() && journal_core::is_valid_slug(stem) {
                return DocRef::Note(stem.to_string());
            }
        }
        DocRef::Path(path.to_path_buf())
    }
}

impl DocumentStore for FileStore {
    fn resolve(&self, reference: &str) -> AppResult<DocRef> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(AppError::Journal("Document reference is empty".to_string()));
        }

        if let Some(date_spec) = DateSpecifier::parse(reference) {
            return Ok(DocRef::Entry(date_spec.resolve(self.today)));
        }

        if journal_core::is_valid_slug(reference) {
            return Ok(DocRef::Note(reference.to_string()));
        }

        let path = PathBuf::from(reference);
        let path = if path.is_absolute() {
            path
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(self.classify_path(&path))
    }

    fn path_of(&self, doc: &DocRef) -> PathBuf {
        match doc {
            DocRef::Entry(date) => self.journal_dir.join(format!(
                "{}.{}",
                journal_core::entry_file_stem(*date),
                JOURNAL_FILE_EXTENSION
            )),
            DocRef::Note(slug) => self
                .notes_dir()
                .join(format!("{}.{}", slug, JOURNAL_FILE_EXTENSION)),
            DocRef::Path(path) => path.clone(),
        }
    }

    fn read(&self, doc: &DocRef) -> Result<String, StoreError> {
        let path = self.path_of(doc);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => StoreError::NotFound { path: path.clone() },
            _ => StoreError::Io {
                path: path.clone(),
                source,
            },
        })
    }

    fn write(&self, doc: &DocRef, text: &str) -> Result<(), StoreError> {
        let path = self.path_of(doc);
        let io_error = |source: std::io::Error| StoreError::Io {
            path: path.clone(),
            source,
        };

        let parent = path.parent().unwrap_or(&self.journal_dir).to_path_buf();
        ensure_directory(&parent).map_err(io_error)?;

        // Temp file in the same directory so the rename stays on one filesystem.
        let mut staged = NamedTempFile::new_in(&parent).map_err(io_error)?;
        staged.write_all(text.as_bytes()).map_err(io_error)?;
        staged.as_file().sync_all().map_err(io_error)?;
        #[cfg(unix)]
        staged
            .as_file()
            .set_permissions(Permissions::from_mode(
                crate::constants::DEFAULT_FILE_PERMISSIONS,
            ))
            .map_err(io_error)?;
        staged.persist(&path).map_err(|e| io_error(e.error))?;

        debug!("Wrote {} bytes to {:?}", text.len(), path);
        Ok(())
    }

    fn exists(&self, doc: &DocRef) -> bool {
        self.path_of(doc).is_file()
    }

    fn list(&self) -> Result<Vec<DocRef>, StoreError> {
        if !self.journal_dir.exists() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();
        let walker = WalkDir::new(&self.journal_dir)
            .follow_links(false)
            .max_depth(2)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.')
            });

        for entry in walker {
            let entry = entry.map_err(|e| StoreError::Io {
                path: self.journal_dir.clone(),
                source: e.into(),
            })?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext == JOURNAL_FILE_EXTENSION)
            {
                docs.push(self.classify_path(path));
            }
        }

        docs.sort();
        debug!("Listed {} documents", docs.len());
        Ok(docs)
    }
}

fn ensure_directory(dir: &Path) -> std::io::Result<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    #[cfg(unix)]
    fs::set_permissions(
        dir,
        Permissions::from_mode(crate::constants::DEFAULT_DIR_PERMISSIONS),
    )?;
    Ok(())
}

/// Ensures the journal directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns:
/// - `AppError::Journal` if the provided path is not an absolute path
/// - `AppError::Io` if the directory creation fails
pub fn ensure_journal_directory_exists(journal_dir: &Path) -> AppResult<()> {
    if !journal_dir.is_absolute() {
        return Err(AppError::Journal(format!(
            "Journal directory path must be absolute: {}",
            journal_dir.display()
        )));
    }

    ensure_directory(journal_dir).map_err(|e| {
        AppError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create journal directory: {}", e),
        ))
    })
}
