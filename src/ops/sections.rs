//! Listing the sections of a document.

use crate::errors::AppResult;
use crate::sections::{self, Section};
use crate::store::DocumentStore;
use serde::Serialize;
use std::path::PathBuf;

/// Sections of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionsReport {
    /// Path of the split document
    pub source: PathBuf,
    /// Sections in document order
    pub sections: Vec<Section>,
}

/// Splits the document named by `reference` into sections.
///
/// # Errors
///
/// `AppError::Store` with `StoreError::NotFound` if the document does not exist.
pub fn list_sections(store: &dyn DocumentStore, reference: &str) -> AppResult<SectionsReport> {
    let doc = store.resolve(reference)?;
    let text = store.read(&doc)?;
    Ok(SectionsReport {
        source: store.path_of(&doc),
        sections: sections::split(&text),
    })
}
