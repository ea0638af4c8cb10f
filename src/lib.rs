/*!
# quill

quill keeps a directory of dated markdown entries and freeform notes. Besides
opening, listing, tagging, searching and browsing documents, it can split a
document into sections and move chosen sections into a note.

## Architecture

- `sections`: pure section splitting and extraction
- `journal_core`: date keys, entry headers and the tag convention
- `store`: the `DocumentStore` trait and its filesystem implementation
- `ops`: one module per user-facing operation, each returning a typed report
- `output`: JSON and text rendering of reports
- `editor`, `picker`, `search`, `state`: collaborators injected into operations
- `cli`, `config`, `constants`, `errors`: the command-line shell around it all

## Usage Example

```rust,no_run
use quill::sections::{extract, split, BlankLinePolicy};

let text = std::fs::read_to_string("20240115.md")?;
let sections = split(&text);
for section in &sections {
    println!("{} {}", section.index, section.title);
}

let result = extract(&text, &[2], &sections, &BlankLinePolicy::default())?;
println!("{}", result.new_note_text);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

/// Command-line interface definitions using clap
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Launching the user's editor
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// Date and tag logic without I/O
pub mod journal_core;
/// User-facing operations
pub mod ops;
/// Report rendering
pub mod output;
/// Interactive selection
pub mod picker;
/// Full-text search
pub mod search;
/// Section splitting and extraction
pub mod sections;
/// Recently opened documents
pub mod state;
/// Document storage
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::DateSpecifier;
pub use output::Report;
pub use store::{DocRef, DocumentStore, FileStore};
