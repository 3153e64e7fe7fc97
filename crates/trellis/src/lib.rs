//! Trellis - dependency graph views over task snapshots.
//!
//! This crate provides both a CLI application and a library for turning
//! flat task records with typed dependencies into positioned, styled
//! graphs. The core entry point is [`graph::compute_graph`], a pure
//! function from tasks and options to a [`graph::GraphView`]; loading
//! snapshots from JSONL files sits behind the async
//! [`source::SnapshotSource`] boundary.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod source;

// Public CLI module (needed by binary)
pub mod cli;

// Output formatting for CLI commands
pub mod output;

pub use config::{GraphOptions, Orientation};
pub use error::{Error, Result};
pub use graph::{compute_graph, GraphView};
