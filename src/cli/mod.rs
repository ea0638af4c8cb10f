//! Command-line interface definitions.

use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DEFAULT_RECENT_LIMIT, DEFAULT_SEARCH_LIMIT, LOG_FORMAT_JSON,
    LOG_FORMAT_TEXT,
};
use crate::journal_core;
use crate::store::DocKind;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// A journal of dated entries and notes
#[derive(Parser, Debug)]
#[command(name = APP_NAME, about = APP_DESCRIPTION, version, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON (implied when stdout is not a terminal)
    #[arg(long, global = true)]
    pub json: bool,

    /// Print verbose (debug) logs
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log format for stderr
    #[arg(
        long,
        global = true,
        default_value = LOG_FORMAT_TEXT,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON]
    )]
    pub log_format: String,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Open a dated entry, note or file in the editor (default: today)
    Open {
        /// today, yesterday, YYYY-MM-DD, YYYYMMDD, a note slug or a path
        reference: Option<String>,
    },

    /// Open or create a note
    Note {
        /// Note name: letters, digits, '-' or '_'
        slug: String,
    },

    /// Print where a reference points
    Path {
        /// Date key, note slug or path
        reference: String,
    },

    /// List documents
    List {
        /// Only list one kind of document
        #[arg(long, value_enum)]
        kind: Option<DocKind>,
    },

    /// List the sections of a document
    Sections {
        /// Date key, note slug or path
        reference: String,
    },

    /// Move sections of a document into a note
    Extract {
        /// Source document: date key, note slug or path
        source: String,

        /// Section indices, comma separated (e.g. 1,3)
        #[arg(long, value_delimiter = ',')]
        sections: Vec<usize>,

        /// Destination note
        #[arg(long)]
        slug: String,
    },

    /// Show tag counts, or the documents carrying TAG
    Tags {
        /// Tag, with or without '#'
        tag: Option<String>,
    },

    /// Add tags to a document
    Tag {
        /// Date key, note slug or path
        reference: String,

        /// Tags to add, with or without '#'
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Search every document for text
    Search {
        /// Text to look for (case-insensitive)
        query: String,

        /// Maximum number of hits
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },

    /// Show dated entries, newest first
    Timeline {
        /// Earliest date (YYYY-MM-DD or YYYYMMDD)
        #[arg(long, value_parser = parse_date_arg)]
        since: Option<NaiveDate>,

        /// Latest date (YYYY-MM-DD or YYYYMMDD)
        #[arg(long, value_parser = parse_date_arg)]
        until: Option<NaiveDate>,

        /// Maximum number of entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show recently opened documents
    Recent {
        /// Maximum number of documents
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },

    /// Pick a document interactively and open it
    Browse,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    journal_core::parse_date_string(raw)
        .ok_or_else(|| format!("'{}' is not a date (use YYYY-MM-DD or YYYYMMDD)", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let args = CliArgs::parse_from(vec!["quill", "open"]);
        assert!(!args.json);
        assert!(!args.verbose);
        assert_eq!(args.log_format, "text");
        assert_eq!(args.command, Commands::Open { reference: None });
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(vec![
            "quill",
            "sections",
            "today",
            "--json",
            "-v",
            "--log-format",
            "json",
        ]);
        assert!(args.json);
        assert!(args.verbose);
        assert_eq!(args.log_format, "json");
        assert_eq!(
            args.command,
            Commands::Sections {
                reference: "today".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_log_format() {
        assert!(CliArgs::try_parse_from(vec!["quill", "--log-format", "xml", "browse"]).is_err());
    }

    #[test]
    fn test_extract_arguments() {
        let args = CliArgs::parse_from(vec![
            "quill",
            "extract",
            "2024-01-15",
            "--sections",
            "3,1",
            "--slug",
            "ideas",
        ]);
        assert_eq!(
            args.command,
            Commands::Extract {
                source: "2024-01-15".to_string(),
                sections: vec![3, 1],
                slug: "ideas".to_string(),
            }
        );

        assert!(CliArgs::try_parse_from(vec![
            "quill",
            "extract",
            "today",
            "--sections",
            "one",
            "--slug",
            "ideas"
        ])
        .is_err());
    }

    #[test]
    fn test_list_kind() {
        let args = CliArgs::parse_from(vec!["quill", "list", "--kind", "note"]);
        assert_eq!(
            args.command,
            Commands::List {
                kind: Some(DocKind::Note)
            }
        );
    }

    #[test]
    fn test_tag_requires_tags() {
        assert!(CliArgs::try_parse_from(vec!["quill", "tag", "today"]).is_err());

        let args = CliArgs::parse_from(vec!["quill", "tag", "today", "#work", "health"]);
        assert_eq!(
            args.command,
            Commands::Tag {
                reference: "today".to_string(),
                tags: vec!["#work".to_string(), "health".to_string()],
            }
        );
    }

    #[test]
    fn test_timeline_dates() {
        let args = CliArgs::parse_from(vec![
            "quill", "timeline", "--since", "20240101", "--until", "2024-01-31",
        ]);
        assert_eq!(
            args.command,
            Commands::Timeline {
                since: NaiveDate::from_ymd_opt(2024, 1, 1),
                until: NaiveDate::from_ymd_opt(2024, 1, 31),
                limit: None,
            }
        );

        assert!(CliArgs::try_parse_from(vec!["quill", "timeline", "--since", "soon"]).is_err());
    }

    #[test]
    fn test_limits_default() {
        let args = CliArgs::parse_from(vec!["quill", "search", "coffee"]);
        assert_eq!(
            args.command,
            Commands::Search {
                query: "coffee".to_string(),
                limit: DEFAULT_SEARCH_LIMIT
            }
        );

        let args = CliArgs::parse_from(vec!["quill", "recent"]);
        assert_eq!(
            args.command,
            Commands::Recent {
                limit: DEFAULT_RECENT_LIMIT
            }
        );
    }
}
