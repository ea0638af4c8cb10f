/*!
# quill

Command-line entry point. Parses arguments, sets up logging, builds the
collaborators from configuration, runs one operation and prints its report.

## Configuration

- `QUILL_DIR`: journal directory (defaults to `~/Documents/quill`)
- `QUILL_EDITOR` or `EDITOR`: editor command (defaults to `vim`)
- `QUILL_PICKER`: fzf-compatible picker for `browse` (defaults to `fzf`)
- `QUILL_PREVIEW`: preview command used by the picker (defaults to `cat`)
- `QUILL_STATE_FILE`: recent-documents file (defaults to `<dir>/.quill/state.json`)
- `QUILL_MAX_BLANK_RUN`: longest blank run kept in a source after extraction
- `RUST_LOG`: log filter, overriding `--verbose`
*/

use chrono::Local;
use clap::Parser;
use quill::cli::{CliArgs, Commands};
use quill::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use quill::editor::SystemEditor;
use quill::errors::AppResult;
use quill::ops::{self, BrowseOutcome, TimelineQuery};
use quill::output::Report;
use quill::picker::{CommandPicker, CommandPreviewer};
use quill::search::ScanSearch;
use quill::state::JsonStateStore;
use quill::store::{self, FileStore};
use quill::Config;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose, &args.log_format);

    let correlation_id = Uuid::new_v4();
    let root_span = tracing::span!(
        Level::INFO,
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    // JSON when asked for, or when another program is reading stdout.
    let json = args.json || !std::io::stdout().is_terminal();

    match run(&args).and_then(|report| print_report(&report, json)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool, log_format: &str) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log_format == LOG_FORMAT_JSON {
        builder.json().with_current_span(true).init();
    } else {
        builder.with_target(false).init();
    }
}

fn print_report(report: &Report, json: bool) -> AppResult<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn run(args: &CliArgs) -> AppResult<Report> {
    let now = Local::now();

    let config = Config::load()?;
    config.validate()?;
    debug!("Loaded configuration: {:?}", config);
    store::ensure_journal_directory_exists(&config.journal_dir)?;

    let store = FileStore::new(&config.journal_dir, now.date_naive());
    let editor = SystemEditor {
        editor_cmd: config.editor.clone(),
    };
    let state = JsonStateStore::new(config.state_file_path());

    info!("Running {:?}", args.command);
    let report = match &args.command {
        Commands::Open { reference } => Report::Opened(ops::open_document(
            &store,
            &editor,
            &state,
            reference.as_deref().unwrap_or("today"),
            now,
        )?),
        Commands::Note { slug } => {
            Report::Opened(ops::open_note(&store, &editor, &state, slug, now)?)
        }
        Commands::Path { reference } => {
            Report::Resolved(ops::resolve_reference(&store, reference)?)
        }
        Commands::List { kind } => Report::Listing {
            documents: ops::list_documents(&store, *kind)?,
        },
        Commands::Sections { reference } => {
            Report::Sections(ops::list_sections(&store, reference)?)
        }
        Commands::Extract {
            source,
            sections,
            slug,
        } => Report::Extracted(ops::extract_sections(
            &store,
            source,
            sections,
            slug,
            &config.blank_policy,
        )?),
        Commands::Tags { tag: None } => Report::Tags {
            tags: ops::tag_counts(&store)?,
        },
        Commands::Tags { tag: Some(tag) } => {
            Report::Tagged(ops::documents_with_tag(&store, tag)?)
        }
        Commands::Tag { reference, tags } => {
            Report::TagsUpdated(ops::tag_document(&store, reference, tags)?)
        }
        Commands::Search { query, limit } => Report::Search(ops::search_documents(
            &store,
            &ScanSearch,
            query,
            *limit,
        )?),
        Commands::Timeline {
            since,
            until,
            limit,
        } => Report::Timeline {
            entries: ops::timeline(
                &store,
                &TimelineQuery {
                    since: *since,
                    until: *until,
                    limit: *limit,
                },
            )?,
        },
        Commands::Recent { limit } => Report::Recent {
            documents: ops::recent_documents(&state, *limit)?,
        },
        Commands::Browse => {
            let picker = CommandPicker {
                command: config.picker.clone(),
            };
            let previewer = CommandPreviewer {
                command: config.preview.clone(),
            };
            match ops::browse(&store, &editor, &state, &picker, &previewer, now)? {
                BrowseOutcome::Opened(report) => Report::Opened(report),
                BrowseOutcome::Cancelled => Report::Cancelled,
            }
        }
    };

    Ok(report)
}
