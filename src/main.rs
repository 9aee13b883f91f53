//! Task Tracker - Main Entry Point
//!
//! The actual implementation is in the `task_tracker` library.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use task_tracker::config::{self, StoreOverrides};
use task_tracker::{Shell, Storage, TaskCommand, TaskService};
use tracing_subscriber::EnvFilter;

/// Task Tracker - manage tasks stored in a local document store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store root directory
    #[arg(long, global = true, env = "TASK_TRACKER_ENDPOINT")]
    endpoint: Option<PathBuf>,

    /// Database name inside the store
    #[arg(long, global = true, env = "TASK_TRACKER_DATABASE")]
    database: Option<String>,

    /// Collection name inside the database
    #[arg(long, global = true, env = "TASK_TRACKER_COLLECTION")]
    collection: Option<String>,

    /// Commit every change to git and push on exit
    #[arg(long, global = true)]
    sync_git: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Task(TaskCommand),

    /// Start the interactive shell (the default)
    Shell,
}

fn main() -> Result<()> {
    // Default to WARN level for quiet CLI output
    // Use RUST_LOG=info or RUST_LOG=debug for verbose output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let overrides = StoreOverrides {
        endpoint: args.endpoint,
        database: args.database,
        collection: args.collection,
        sync_git: args.sync_git,
    };
    let cfg = config::load_config(args.config.as_deref(), overrides)?;

    let storage = Storage::connect(cfg.store).context("Failed to open the task store")?;
    let service = TaskService::new(storage);

    let stdin = io::stdin();
    let mut shell = Shell::new(&service, stdin.lock(), io::stdout());
    let outcome = match args.command {
        Some(Command::Task(command)) => shell.execute(command),
        Some(Command::Shell) | None => shell.run(),
    };
    drop(shell);

    let closed = service.close();
    outcome?;
    closed?;
    Ok(())
}
