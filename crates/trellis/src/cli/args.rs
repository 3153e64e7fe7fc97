//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::types::{OrientationArg, TaskStatusArg};

/// Arguments for the `layout` command
#[derive(Parser, Debug, Clone)]
pub struct LayoutArgs {
    /// Path to the JSONL task snapshot
    pub snapshot: PathBuf,

    /// Flow orientation
    ///
    /// Overrides the orientation from the options file. Prerequisites
    /// come first along the flow axis.
    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,

    /// Highlight the dependency closure of this task
    ///
    /// The task itself, its transitive prerequisites, and everything
    /// else is marked selected, blocking/ancestor, or dimmed.
    #[arg(long, value_name = "ID")]
    pub select: Option<String>,

    /// Point arrows from dependent to prerequisite
    #[arg(long)]
    pub invert: bool,

    /// Leave `related` edges out of the graph
    #[arg(long)]
    pub hide_related: bool,

    /// Leave `parent-child` edges out of the graph
    #[arg(long)]
    pub hide_parent_child: bool,

    /// Include `discovered-from` edges (hidden by default)
    #[arg(long)]
    pub show_discovered_from: bool,

    /// Ignore `related` edges when ranking nodes
    #[arg(long)]
    pub no_nudge: bool,

    /// Keep edge-less tasks as individual nodes
    #[arg(long)]
    pub no_group_isolates: bool,

    /// Also emit grid positions for the tasks inside the isolate bucket
    #[arg(long)]
    pub expand_isolates: bool,

    /// Layout cell width in pixels
    #[arg(long, value_name = "PX")]
    pub node_width: Option<f64>,

    /// Layout cell height in pixels
    #[arg(long, value_name = "PX")]
    pub node_height: Option<f64>,

    /// Gap between siblings on the cross axis
    #[arg(long = "node-sep", value_name = "PX")]
    pub node_separation: Option<f64>,

    /// Gap between ranks on the primary axis
    #[arg(long = "rank-sep", value_name = "PX")]
    pub rank_separation: Option<f64>,

    /// Options file (default: ./trellis.yaml when present)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the graph to this file instead of stdout
    ///
    /// The file is replaced atomically, so a crash mid-write leaves any
    /// previous version intact.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep only tasks with these statuses (comma-separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub status: Vec<TaskStatusArg>,

    /// Keep only tasks matching this substring (id, title, or assignee)
    #[arg(short = 'q', long)]
    pub query: Option<String>,
}

/// Arguments for the `deps` command
#[derive(Parser, Debug, Clone)]
pub struct DepsArgs {
    /// Path to the JSONL task snapshot
    pub snapshot: PathBuf,

    /// Task whose prerequisites to list
    #[arg(value_name = "ID")]
    pub task_id: String,
}

/// Arguments for the `stats` command
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the JSONL task snapshot
    pub snapshot: PathBuf,
}

/// Arguments for the `export` command
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    /// Path to the JSONL task snapshot
    pub snapshot: PathBuf,

    /// Destination JSONL file (replaced atomically)
    pub output: PathBuf,

    /// Keep only tasks with these statuses (comma-separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub status: Vec<TaskStatusArg>,

    /// Keep only tasks matching this substring (id, title, or assignee)
    #[arg(short = 'q', long)]
    pub query: Option<String>,
}
