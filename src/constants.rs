//! Constants used throughout the application.
//!
//! This module contains all constants used in quill, organized into logical
//! groups. Having constants centralized makes them easier to find, modify, and
//! reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "quill";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A journal of dated entries and notes, with section extraction";

// CLI Arguments & Defaults
/// Default command for the editor if not specified otherwise.
pub const DEFAULT_EDITOR_COMMAND: &str = "vim";
/// Default command for the interactive picker.
pub const DEFAULT_PICKER_COMMAND: &str = "fzf";
/// Default command used by the picker to preview a candidate file.
pub const DEFAULT_PREVIEW_COMMAND: &str = "cat";
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default number of search hits returned.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;
/// Default number of recently opened documents listed.
pub const DEFAULT_RECENT_LIMIT: usize = 20;
/// Number of recently opened documents kept in the state file.
pub const MAX_RECENT_ENTRIES: usize = 100;
/// Preview length used when rendering sections as text.
pub const TEXT_PREVIEW_CHARS: usize = 80;

// Configuration Keys & Environment Variables
/// Environment variable for specifying the journal directory.
pub const ENV_VAR_QUILL_DIR: &str = "QUILL_DIR";
/// Environment variable for specifying the preferred editor.
pub const ENV_VAR_QUILL_EDITOR: &str = "QUILL_EDITOR";
/// Standard environment variable for specifying the default editor.
pub const ENV_VAR_EDITOR: &str = "EDITOR";
/// Environment variable for the interactive picker command.
pub const ENV_VAR_QUILL_PICKER: &str = "QUILL_PICKER";
/// Environment variable for the preview command handed to the picker.
pub const ENV_VAR_QUILL_PREVIEW: &str = "QUILL_PREVIEW";
/// Environment variable overriding the state file location.
pub const ENV_VAR_QUILL_STATE_FILE: &str = "QUILL_STATE_FILE";
/// Environment variable for the longest blank-line run kept after extraction.
pub const ENV_VAR_QUILL_MAX_BLANK_RUN: &str = "QUILL_MAX_BLANK_RUN";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for the journal within the user's home directory.
pub const DEFAULT_JOURNAL_SUBDIR: &str = "Documents/quill";

// Validation
/// Characters forbidden in external commands for security reasons.
pub const EDITOR_FORBIDDEN_CHARS: &[char] =
    &['|', '&', ';', '$', '(', ')', '`', '\\', '<', '>', '\'', '"'];
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// File extension for journal documents, without the dot.
pub const JOURNAL_FILE_EXTENSION: &str = "md";
/// Sub-directory holding freeform notes.
pub const NOTES_SUBDIR: &str = "notes";
/// Sub-directory holding quill's own bookkeeping.
pub const STATE_SUBDIR: &str = ".quill";
/// File name of the state file inside `STATE_SUBDIR`.
pub const STATE_FILE_NAME: &str = "state.json";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Sections
/// Title given to a section whose first line has no text once heading markers are removed.
pub const EMPTY_SECTION_TITLE: &str = "(empty section)";
/// Minimum run length of a separator line (`---`, `***`, `___`).
pub const MIN_SEPARATOR_RUN: usize = 3;
/// Default longest run of blank lines left in a document after extraction.
pub const DEFAULT_MAX_BLANK_RUN: usize = 1;

// Tags
/// Number of leading lines scanned for tags.
pub const TAG_LINES: usize = 2;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Date format used in journal headers.
pub const JOURNAL_HEADER_DATE_FORMAT: &str = "%B %d, %Y: %A";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "quill";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
