//! Configuration management for the quill application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `QUILL_DIR`: Path to the journal directory (defaults to ~/Documents/quill)
//! - `QUILL_EDITOR`: Editor to use for journal documents
//! - `EDITOR`: Fallback editor if QUILL_EDITOR is not set (defaults to "vim")
//! - `QUILL_PICKER`: Interactive picker command (defaults to "fzf")
//! - `QUILL_PREVIEW`: Command the picker runs to preview a file (defaults to "cat")
//! - `QUILL_STATE_FILE`: Location of the recently-opened state file
//!   (defaults to `<journal dir>/.quill/state.json`)
//! - `QUILL_MAX_BLANK_RUN`: Longest run of blank lines left in a document after
//!   sections are extracted from it (defaults to 1)
//! - `HOME`: Used for expanding the default journal directory path

use crate::constants::{
    DEFAULT_EDITOR_COMMAND, DEFAULT_JOURNAL_SUBDIR, DEFAULT_PICKER_COMMAND,
    DEFAULT_PREVIEW_COMMAND, EDITOR_FORBIDDEN_CHARS, ENV_VAR_EDITOR, ENV_VAR_HOME,
    ENV_VAR_QUILL_DIR, ENV_VAR_QUILL_EDITOR, ENV_VAR_QUILL_MAX_BLANK_RUN, ENV_VAR_QUILL_PICKER,
    ENV_VAR_QUILL_PREVIEW, ENV_VAR_QUILL_STATE_FILE, REDACTED_PLACEHOLDER, STATE_FILE_NAME,
    STATE_SUBDIR,
};
use crate::errors::{AppError, AppResult};
use crate::sections::BlankLinePolicy;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the quill application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use quill::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     editor: "nano".to_string(),
///     journal_dir: PathBuf::from("/path/to/journal"),
///     ..Config::default()
/// };
/// assert_eq!(config.picker, "fzf");
/// ```
#[derive(Clone)]
pub struct Config {
    /// Editor command used to open documents.
    ///
    /// Loaded from `QUILL_EDITOR`, then `EDITOR`, then defaults to "vim".
    pub editor: String,

    /// Directory holding dated entries and the `notes/` sub-directory.
    pub journal_dir: PathBuf,

    /// Interactive picker command used by `browse`.
    pub picker: String,

    /// Preview command the picker runs for the highlighted candidate.
    pub preview: String,

    /// File recording recently opened documents. Derived from the journal
    /// directory when `None`.
    pub state_file: Option<PathBuf>,

    /// Whitespace normalization applied to a source after extraction.
    pub blank_policy: BlankLinePolicy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("editor", &REDACTED_PLACEHOLDER)
            .field("journal_dir", &REDACTED_PLACEHOLDER)
            .field("picker", &self.picker)
            .field("preview", &self.preview)
            .field("state_file", &self.state_file.as_ref().map(|_| REDACTED_PLACEHOLDER))
            .field("blank_policy", &self.blank_policy)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: DEFAULT_EDITOR_COMMAND.to_string(),
            journal_dir: PathBuf::from(""),
            picker: DEFAULT_PICKER_COMMAND.to_string(),
            preview: DEFAULT_PREVIEW_COMMAND.to_string(),
            state_file: None,
            blank_policy: BlankLinePolicy::default(),
        }
    }
}

impl Config {
    /// Validates an external command string for security.
    ///
    /// The command must be non-empty and contain neither spaces nor shell
    /// metacharacters. `kind` names the command in error messages.
    fn validate_command<'a>(kind: &str, command: &'a str) -> AppResult<&'a str> {
        if command.is_empty() {
            return Err(AppError::Config(format!("{} command cannot be empty", kind)));
        }

        if command.contains(' ') {
            return Err(AppError::Config(format!(
                "{} command cannot contain spaces. Use a wrapper script or shell alias for commands requiring arguments",
                kind
            )));
        }

        if let Some(ch) = EDITOR_FORBIDDEN_CHARS.iter().find(|&&ch| command.contains(ch)) {
            return Err(AppError::Config(format!(
                "{} command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                kind, ch
            )));
        }

        Ok(command)
    }

    fn command_from_env(kind: &str, vars: &[&str], default: &str) -> AppResult<String> {
        let raw = vars
            .iter()
            .find_map(|var| env::var(var).ok())
            .unwrap_or_else(|| default.to_string());
        Config::validate_command(kind, &raw).map(str::to_string)
    }

    fn expand_path(raw: &str) -> AppResult<PathBuf> {
        let expanded = shellexpand::full(raw)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        Ok(PathBuf::from(expanded.into_owned()))
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - Path expansion fails
    /// - A command fails validation (empty, contains spaces or shell metacharacters)
    /// - `QUILL_MAX_BLANK_RUN` is not a non-negative integer
    pub fn load() -> AppResult<Self> {
        let editor = Config::command_from_env(
            "Editor",
            &[ENV_VAR_QUILL_EDITOR, ENV_VAR_EDITOR],
            DEFAULT_EDITOR_COMMAND,
        )?;
        let picker =
            Config::command_from_env("Picker", &[ENV_VAR_QUILL_PICKER], DEFAULT_PICKER_COMMAND)?;
        let preview =
            Config::command_from_env("Preview", &[ENV_VAR_QUILL_PREVIEW], DEFAULT_PREVIEW_COMMAND)?;

        let journal_dir_str = env::var(ENV_VAR_QUILL_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_JOURNAL_SUBDIR)
        });
        let journal_dir = Config::expand_path(&journal_dir_str)?;

        if journal_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Journal directory path is empty".to_string(),
            ));
        }

        let state_file = match env::var(ENV_VAR_QUILL_STATE_FILE) {
            Ok(raw) if !raw.is_empty() => Some(Config::expand_path(&raw)?),
            _ => None,
        };

        let mut blank_policy = BlankLinePolicy::default();
        if let Ok(raw) = env::var(ENV_VAR_QUILL_MAX_BLANK_RUN) {
            blank_policy.max_blank_run = raw.trim().parse().map_err(|_| {
                AppError::Config(format!(
                    "{} must be a non-negative integer, got '{}'",
                    ENV_VAR_QUILL_MAX_BLANK_RUN, raw
                ))
            })?;
        }

        Ok(Config {
            editor,
            journal_dir,
            picker,
            preview,
            state_file,
            blank_policy,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Journal directory path is empty"
    /// - "Editor command is empty"
    /// - "Journal directory must be an absolute path"
    ///
    /// # Examples
    ///
    /// ```
    /// use quill::Config;
    /// use std::path::PathBuf;
    ///
    /// let valid_config = Config {
    ///     journal_dir: PathBuf::from("/absolute/path"),
    ///     ..Config::default()
    /// };
    /// assert!(valid_config.validate().is_ok());
    ///
    /// let invalid_config = Config {
    ///     editor: "".to_string(),
    ///     journal_dir: PathBuf::from("/absolute/path"),
    ///     ..Config::default()
    /// };
    /// assert!(invalid_config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.journal_dir.as_os_str().is_empty() {
            return Err(AppError::Config(
                "Journal directory path is empty".to_string(),
            ));
        }

        if self.editor.is_empty() {
            return Err(AppError::Config("Editor command is empty".to_string()));
        }

        if !self.journal_dir.is_absolute() {
            return Err(AppError::Config(
                "Journal directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }

    /// Effective location of the state file.
    pub fn state_file_path(&self) -> PathBuf {
        self.state_file.clone().unwrap_or_else(|| {
            self.journal_dir
                .join(STATE_SUBDIR)
                .join(STATE_FILE_NAME)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    const VARS: &[&str] = &[
        ENV_VAR_QUILL_EDITOR,
        ENV_VAR_EDITOR,
        ENV_VAR_QUILL_DIR,
        ENV_VAR_QUILL_PICKER,
        ENV_VAR_QUILL_PREVIEW,
        ENV_VAR_QUILL_STATE_FILE,
        ENV_VAR_QUILL_MAX_BLANK_RUN,
    ];

    /// Clears every quill variable, runs `test`, then restores the originals.
    fn with_clean_env<F: FnOnce()>(test: F) {
        let saved: Vec<(&str, Option<String>)> =
            VARS.iter().map(|var| (*var, env::var(var).ok())).collect();
        for var in VARS {
            env::remove_var(var);
        }

        test();

        for (var, value) in saved {
            match value {
                Some(value) => env::set_var(var, value),
                None => env::remove_var(var),
            }
        }
    }

    #[test]
    fn test_debug_impl_redacts_sensitive_info() {
        let config = Config {
            editor: "vim".to_string(),
            journal_dir: PathBuf::from("/home/username/private/journal"),
            state_file: Some(PathBuf::from("/home/username/private/state.json")),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("vim"));
        assert!(!debug_output.contains("/home/username/private"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor, "vim");
        assert_eq!(config.picker, "fzf");
        assert_eq!(config.preview, "cat");
        assert_eq!(config.journal_dir, PathBuf::from(""));
        assert_eq!(config.blank_policy, BlankLinePolicy::default());
    }

    #[test]
    #[serial]
    fn test_load_editor_precedence() {
        with_clean_env(|| {
            env::set_var(ENV_VAR_QUILL_DIR, "/tmp/journal");

            let config = Config::load().unwrap();
            assert_eq!(config.editor, "vim");

            env::set_var(ENV_VAR_EDITOR, "nano");
            let config = Config::load().unwrap();
            assert_eq!(config.editor, "nano");

            env::set_var(ENV_VAR_QUILL_EDITOR, "code");
            let config = Config::load().unwrap();
            assert_eq!(config.editor, "code");
        });
    }

    #[test]
    #[serial]
    fn test_load_with_custom_dir_and_state_file() {
        with_clean_env(|| {
            let temp_dir = tempdir().unwrap();
            let dir_path = temp_dir.path().to_string_lossy().to_string();
            env::set_var(ENV_VAR_QUILL_DIR, &dir_path);

            let config = Config::load().unwrap();
            assert_eq!(config.journal_dir, PathBuf::from(&dir_path));
            assert_eq!(
                config.state_file_path(),
                PathBuf::from(&dir_path).join(".quill").join("state.json")
            );

            env::set_var(ENV_VAR_QUILL_STATE_FILE, "/tmp/quill-state.json");
            let config = Config::load().unwrap();
            assert_eq!(
                config.state_file_path(),
                PathBuf::from("/tmp/quill-state.json")
            );
        });
    }

    #[test]
    #[serial]
    fn test_load_blank_run_policy() {
        with_clean_env(|| {
            env::set_var(ENV_VAR_QUILL_DIR, "/tmp/journal");
            env::set_var(ENV_VAR_QUILL_MAX_BLANK_RUN, "2");
            let config = Config::load().unwrap();
            assert_eq!(config.blank_policy.max_blank_run, 2);

            env::set_var(ENV_VAR_QUILL_MAX_BLANK_RUN, "lots");
            match Config::load() {
                Err(AppError::Config(msg)) => assert!(msg.contains(ENV_VAR_QUILL_MAX_BLANK_RUN)),
                _ => panic!("Expected Config error for invalid blank run"),
            }
        });
    }

    #[test]
    #[serial]
    fn test_load_config_with_invalid_editor() {
        with_clean_env(|| {
            env::set_var(ENV_VAR_QUILL_DIR, "/tmp");
            env::set_var(ENV_VAR_QUILL_EDITOR, "vim --noplugin");

            match Config::load() {
                Err(AppError::Config(msg)) => assert!(msg.contains("cannot contain spaces")),
                _ => panic!("Expected Config error for invalid editor"),
            }

            env::set_var(ENV_VAR_QUILL_EDITOR, "echo>/tmp/pwned");
            match Config::load() {
                Err(AppError::Config(msg)) => {
                    assert!(msg.contains("Editor command cannot contain shell metacharacters"))
                }
                _ => panic!("Expected Config error for metacharacters"),
            }
        });
    }

    #[test]
    #[serial]
    fn test_load_config_with_invalid_picker() {
        with_clean_env(|| {
            env::set_var(ENV_VAR_QUILL_DIR, "/tmp");
            env::set_var(ENV_VAR_QUILL_PICKER, "fzf|sh");

            match Config::load() {
                Err(AppError::Config(msg)) => assert!(msg.starts_with("Picker command")),
                _ => panic!("Expected Config error for invalid picker"),
            }
        });
    }

    #[test]
    fn test_validate_valid_config() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            journal_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_editor() {
        let config = Config {
            editor: "".to_string(),
            journal_dir: PathBuf::from("/some/path"),
            ..Config::default()
        };

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Editor command is empty"));
            }
            _ => panic!("Expected Config error about empty editor"),
        }
    }

    #[test]
    fn test_validate_empty_journal_dir() {
        let config = Config::default();

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("Journal directory path is empty"));
            }
            _ => panic!("Expected Config error about empty journal directory"),
        }
    }

    #[test]
    fn test_validate_relative_journal_dir() {
        let config = Config {
            journal_dir: PathBuf::from("relative/path"),
            ..Config::default()
        };

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("must be an absolute path"));
            }
            _ => panic!("Expected Config error about relative path"),
        }
    }

    #[test]
    fn test_validate_command_valid() {
        assert_eq!(Config::validate_command("Editor", "vim").unwrap(), "vim");
        assert_eq!(
            Config::validate_command("Editor", "/usr/bin/code").unwrap(),
            "/usr/bin/code"
        );
        assert_eq!(
            Config::validate_command("Editor", "./my-editor").unwrap(),
            "./my-editor"
        );
    }

    #[test]
    fn test_validate_command_empty() {
        match Config::validate_command("Editor", "") {
            Err(AppError::Config(msg)) => assert!(msg.contains("cannot be empty")),
            _ => panic!("Expected Config error for empty command"),
        }
    }

    #[test]
    fn test_validate_command_with_metacharacters() {
        let test_cases = [
            ("echo>/tmp/file", '>'),
            ("echo|cat", '|'),
            ("vim;echo", ';'),
            ("$(echo)", '$'),
            ("`echo`", '`'),
            ("vim&", '&'),
            ("vim'~/test'", '\''),
            ("vim\"test\"", '"'),
            ("vim)test", ')'),
            ("vim\\test", '\\'),
            ("vim<file", '<'),
        ];

        for (cmd, char) in test_cases.iter() {
            match Config::validate_command("Editor", cmd) {
                Err(AppError::Config(msg)) => {
                    assert!(msg.contains("Editor command cannot contain shell metacharacters"));
                    assert!(msg.contains(&char.to_string()));
                }
                _ => panic!("Expected Config error for metacharacter '{}'", char),
            }
        }
    }
}
