//! lexarc-review - document review queue driver
//!
//! Drives the post-upload review queue stored in the file-backed session
//! store. Each invocation hydrates the queue, applies one action, persists
//! the result and prints the page the reviewer should open next.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lexarc_common::config::{load_config, LoggingConfig, SessionFolderResolver};
use lexarc_common::FileStore;
use lexarc_review::{
    Destination, DocumentId, QueueNavigationView, QueueTracker, ReviewFlow, ReviewStep, Routes,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for lexarc-review
#[derive(Parser, Debug)]
#[command(name = "lexarc-review")]
#[command(about = "Review queue for bulk-uploaded legal documents")]
#[command(version)]
struct Args {
    /// Folder backing the session store
    #[arg(short, long, global = true)]
    session_folder: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "LEXARC_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a queue from uploaded document ids
    Init {
        #[arg(required = true)]
        document_ids: Vec<DocumentId>,
    },
    /// Open the processing screen, optionally for a specific document
    Open {
        #[arg(long)]
        doc_id: Option<DocumentId>,
    },
    /// Show the current position
    Status,
    /// Move to the next document without saving
    Next,
    /// Move to the previous document
    Prev,
    /// Drop the current document and continue
    Remove,
    /// Current document saved
    Saved,
    /// Current document deleted
    Deleted,
    /// Cancel all remaining documents
    CancelAll,
    /// Clear the queue
    Clear,
}

fn init_tracing(logging: &LoggingConfig, override_level: Option<&str>) -> Result<()> {
    let level = override_level.unwrap_or(&logging.level);
    let filter = EnvFilter::from_default_env().add_directive(
        level
            .parse::<Directive>()
            .with_context(|| format!("Invalid log level: {}", level))?,
    );

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_tracing(&config.logging, args.log_level.as_deref())?;

    info!(
        "Starting lexarc-review v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let session_folder = SessionFolderResolver::new()
        .with_cli_arg(args.session_folder)
        .with_toml(&config)
        .resolve();
    info!("Session folder: {}", session_folder.display());

    let store = FileStore::open(&session_folder)
        .with_context(|| format!("Failed to open session store {}", session_folder.display()))?;
    let routes = Routes::new(&config.routes);

    let current_doc_id = match &args.command {
        Command::Open { doc_id } => *doc_id,
        _ => None,
    };
    let mut flow = ReviewFlow::new(QueueTracker::hydrate(store, current_doc_id));

    match args.command {
        Command::Init { document_ids } => {
            let first = *document_ids.first().context("No document ids given")?;
            flow.tracker_mut().initialize_queue(document_ids)?;
            report(&flow, &routes, Destination::Processing { doc_id: first });
        }
        Command::Open { .. } | Command::Status => {
            let destination = match flow.tracker().current_document() {
                Some(doc_id) => Destination::Processing { doc_id },
                None => Destination::DocumentListing,
            };
            report(&flow, &routes, destination);
        }
        Command::Next => {
            let destination = flow.skip();
            report(&flow, &routes, destination);
        }
        Command::Prev => match flow.previous() {
            Some(destination) => report(&flow, &routes, destination),
            None => println!("Already at the first document"),
        },
        Command::Remove => {
            let destination = flow.tracker_mut().remove_current_and_continue().into();
            report(&flow, &routes, destination);
        }
        Command::Saved => {
            let step = flow.document_saved();
            report_step(&flow, &routes, step);
        }
        Command::Deleted => {
            let step = flow.document_deleted();
            report_step(&flow, &routes, step);
        }
        Command::CancelAll => {
            let step = flow.cancel_all();
            report_step(&flow, &routes, step);
        }
        Command::Clear => {
            flow.tracker_mut().clear_queue();
            println!("Queue cleared");
        }
    }

    Ok(())
}

fn report_step(flow: &ReviewFlow<FileStore>, routes: &Routes, step: ReviewStep) {
    println!("{}", step.notice);
    report(flow, routes, step.destination);
}

fn report(flow: &ReviewFlow<FileStore>, routes: &Routes, destination: Destination) {
    println!("-> {} ({})", routes.path(destination), destination);
    if let Some(view) = QueueNavigationView::from_tracker(flow.tracker()) {
        println!("{}", view);
    }
}
