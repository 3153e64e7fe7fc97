//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for trellis using
//! clap's derive API. Each command has its own argument struct.
//!
//! # Commands
//!
//! - `layout`: Compute a positioned dependency graph from a snapshot
//! - `deps`: List the transitive prerequisites of one task
//! - `stats`: Summarize a snapshot (statuses, edges, isolates, warnings)
//! - `export`: Write a filtered copy of a snapshot
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! trellis layout tasks.jsonl --orientation lr --select task-42
//! trellis deps tasks.jsonl task-42
//! trellis stats tasks.jsonl --json
//! trellis export tasks.jsonl open.jsonl --status open,in_progress
//! ```

mod args;
mod execute;
mod types;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{DepsArgs, ExportArgs, LayoutArgs, StatsArgs};

// Re-export types
pub use types::{OrientationArg, TaskStatusArg};

/// Trellis - dependency graph views over task snapshots
///
/// Reads a JSONL task snapshot and turns the dependency links between
/// tasks into a positioned, styled graph ready for rendering.
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute a positioned dependency graph
    ///
    /// Builds the full graph view: nodes with layered positions, styled
    /// edges, and metadata. The result is emitted as JSON, to stdout or
    /// to a file with `--output`.
    Layout(LayoutArgs),

    /// List what a task transitively depends on
    ///
    /// Follows `blocks` links from the given task and reports every
    /// prerequisite, flagging the ones that are not closed yet.
    Deps(DepsArgs),

    /// Summarize a snapshot
    ///
    /// Shows task counts by status, visible edge counts by type, the
    /// number of isolated tasks, and any warnings from loading.
    Stats(StatsArgs),

    /// Write a filtered copy of a snapshot
    ///
    /// Applies the status and query filters and writes the surviving
    /// tasks to a new JSONL file, replacing it atomically.
    Export(ExportArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns a clap error when the arguments do not parse.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error when the command fails; parse errors are
    /// handled before this point.
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Layout(args)) => execute::execute_layout(args).await,
            Some(Commands::Deps(args)) => execute::execute_deps(args, output_mode).await,
            Some(Commands::Stats(args)) => execute::execute_stats(args, output_mode).await,
            Some(Commands::Export(args)) => execute::execute_export(args, output_mode).await,
            None => {
                println!("Trellis dependency graph toolkit");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
