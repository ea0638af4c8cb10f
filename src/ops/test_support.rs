//! In-memory collaborators shared by the operation tests.

use crate::errors::{AppError, AppResult, StoreError};
use crate::journal_core::{self, DateSpecifier};
use crate::picker::{Candidate, Picker, Previewer};
use crate::state::{State, StateStore};
use crate::store::{DocRef, DocumentStore};
use chrono::NaiveDate;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

pub(crate) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

/// A `DocumentStore` held in memory, rooted at `/journal`.
///
/// Counts writes and can be told to fail writes to one document.
pub(crate) struct MemoryStore {
    docs: RefCell<BTreeMap<DocRef, String>>,
    writes: Cell<usize>,
    failing: RefCell<Option<DocRef>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        MemoryStore {
            docs: RefCell::new(BTreeMap::new()),
            writes: Cell::new(0),
            failing: RefCell::new(None),
        }
    }

    pub(crate) fn insert(&self, doc: DocRef, text: &str) {
        self.docs.borrow_mut().insert(doc, text.to_string());
    }

    pub(crate) fn get(&self, doc: &DocRef) -> Option<String> {
        self.docs.borrow().get(doc).cloned()
    }

    pub(crate) fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub(crate) fn fail_writes_to(&self, doc: DocRef) {
        *self.failing.borrow_mut() = Some(doc);
    }
}

impl DocumentStore for MemoryStore {
    fn resolve(&self, reference: &str) -> AppResult<DocRef> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(AppError::Journal("Document reference is empty".to_string()));
        }
        if let Some(date_spec) = DateSpecifier::parse(reference) {
            return Ok(DocRef::Entry(date_spec.resolve(today())));
        }
        if journal_core::is_valid_slug(reference) {
            return Ok(DocRef::Note(reference.to_string()));
        }
        Ok(DocRef::Path(PathBuf::from(reference)))
    }

    fn path_of(&self, doc: &DocRef) -> PathBuf {
        match doc {
            DocRef::Entry(date) => Path::new("/journal")
                .join(format!("{}.md", journal_core::entry_file_stem(*date))),
            DocRef::Note(slug) => Path::new("/journal/notes").join(format!("{}.md", slug)),
            DocRef::Path(path) => path.clone(),
        }
    }

    fn read(&self, doc: &DocRef) -> Result<String, StoreError> {
        self.get(doc).ok_or_else(|| StoreError::NotFound {
            path: self.path_of(doc),
        })
    }

    fn write(&self, doc: &DocRef, text: &str) -> Result<(), StoreError> {
        self.writes.set(self.writes.get() + 1);
        if self.failing.borrow().as_ref() == Some(doc) {
            return Err(StoreError::Io {
                path: self.path_of(doc),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.insert(doc.clone(), text);
        Ok(())
    }

    fn exists(&self, doc: &DocRef) -> bool {
        self.docs.borrow().contains_key(doc)
    }

    fn list(&self) -> Result<Vec<DocRef>, StoreError> {
        Ok(self.docs.borrow().keys().cloned().collect())
    }
}

/// A `StateStore` held in memory.
#[derive(Default)]
pub(crate) struct MemoryStateStore {
    pub(crate) state: RefCell<State>,
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> AppResult<State> {
        Ok(self.state.borrow().clone())
    }

    fn save(&self, state: &State) -> AppResult<()> {
        *self.state.borrow_mut() = state.clone();
        Ok(())
    }
}

/// A `Picker` that always makes the same choice and remembers what it saw.
pub(crate) struct ScriptedPicker {
    pub(crate) choice: Option<usize>,
    pub(crate) seen: RefCell<Vec<Candidate>>,
    pub(crate) preview_command: RefCell<Option<String>>,
}

impl ScriptedPicker {
    pub(crate) fn choosing(choice: Option<usize>) -> Self {
        ScriptedPicker {
            choice,
            seen: RefCell::new(Vec::new()),
            preview_command: RefCell::new(None),
        }
    }
}

impl Picker for ScriptedPicker {
    fn pick(&self, candidates: &[Candidate], previewer: &dyn Previewer) -> AppResult<Option<usize>> {
        *self.seen.borrow_mut() = candidates.to_vec();
        *self.preview_command.borrow_mut() = Some(previewer.command_for("{2}"));
        Ok(self.choice)
    }
}
