//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands. Each
//! command loads a snapshot through [`JsonlFileSource`], runs the part
//! of the pipeline it needs, and hands the result to the output layer.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use super::args::{DepsArgs, ExportArgs, LayoutArgs, StatsArgs};
use super::types::TaskStatusArg;
use crate::config::GraphOptions;
use crate::domain::{DependencyType, TaskFilter, TaskId, TaskStatus};
use crate::graph::{compute_graph, expand_bucket, GraphNode, GraphView};
use crate::output::{self, DepsReport, EdgeTypeCount, OutputMode, StatsReport, StatusCount};
use crate::source::{JsonlFileSource, Snapshot, SnapshotSource};

/// Options file picked up from the working directory when `--config`
/// is not given.
const DEFAULT_OPTIONS_FILE: &str = "trellis.yaml";

/// What the `layout` command emits: the graph view, plus grid
/// positions for bucketed isolates when `--expand-isolates` is set.
#[derive(Debug, Serialize)]
struct LayoutReport<'a> {
    #[serde(flatten)]
    view: &'a GraphView,
    #[serde(skip_serializing_if = "Option::is_none")]
    fanout: Option<Vec<GraphNode>>,
}

/// Execute the layout command.
///
/// Output is always JSON; the global `--json` flag changes nothing
/// here.
pub async fn execute_layout(args: &LayoutArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot).await?;
    let options = layout_options(args).await?;
    let tasks = build_filter(&args.status, args.query.as_deref()).apply(&snapshot.tasks);

    let selection: Option<TaskId> = args.select.clone().map(TaskId::new);
    let view = compute_graph(&tasks, &options, selection.as_ref());

    let fanout = if args.expand_isolates {
        view.nodes
            .iter()
            .find(|node| node.is_bucket())
            .map(|bucket| expand_bucket(bucket, options.orientation, &options))
    } else {
        None
    };
    let report = LayoutReport {
        view: &view,
        fanout,
    };

    match &args.output {
        Some(path) => {
            trellis_jsonl::write_json_atomic(path, &report).await?;
            output::print_message(&format!(
                "Wrote {} node(s) and {} edge(s) to {}",
                view.nodes.len(),
                view.edges.len(),
                path.display()
            ))?;
        }
        None => output::print_json(&report)?,
    }
    Ok(())
}

/// Execute the deps command.
pub async fn execute_deps(args: &DepsArgs, output_mode: OutputMode) -> Result<()> {
    use crate::graph::{blocking_deps, transitive_deps};

    let snapshot = load_snapshot(&args.snapshot).await?;
    let task_id = TaskId::new(args.task_id.clone());
    if !snapshot.tasks.iter().any(|task| task.id == task_id) {
        return Err(crate::error::Error::TaskNotFound(task_id).into());
    }

    let mut transitive: Vec<TaskId> = transitive_deps(&snapshot.tasks, &task_id)
        .into_iter()
        .collect();
    transitive.sort();
    let mut blocking: Vec<TaskId> = blocking_deps(&snapshot.tasks, &task_id)
        .into_iter()
        .collect();
    blocking.sort();

    let report = DepsReport {
        task_id,
        transitive_deps: transitive,
        blocking_deps: blocking,
    };
    output::print_deps(&report, &snapshot.tasks, output_mode)?;
    Ok(())
}

/// Execute the stats command.
pub async fn execute_stats(args: &StatsArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot).await?;

    // Stats describe the snapshot, not one view of it, so every edge
    // type counts as visible here.
    let options = GraphOptions {
        show_discovered_from: true,
        ..GraphOptions::default()
    };
    let view = compute_graph(&snapshot.tasks, &options, None);

    let by_status = [
        TaskStatus::Open,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Closed,
    ]
    .into_iter()
    .map(|status| StatusCount {
        status,
        count: snapshot
            .tasks
            .iter()
            .filter(|task| task.status == status)
            .count(),
    })
    .collect();

    let edges_by_type = [
        DependencyType::Blocks,
        DependencyType::Related,
        DependencyType::ParentChild,
        DependencyType::DiscoveredFrom,
    ]
    .into_iter()
    .map(|dep_type| EdgeTypeCount {
        dep_type,
        count: view
            .edges
            .iter()
            .filter(|edge| edge.dep_type == dep_type)
            .count(),
    })
    .filter(|row| row.count > 0)
    .collect();

    let report = StatsReport {
        tasks: snapshot.tasks.len(),
        isolates: view.meta.isolates.len(),
        by_status,
        edges_by_type,
        warnings: snapshot.warnings,
    };
    output::print_stats(&report, output_mode)?;
    Ok(())
}

/// Execute the export command.
pub async fn execute_export(args: &ExportArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot).await?;
    let tasks = build_filter(&args.status, args.query.as_deref()).apply(&snapshot.tasks);

    trellis_jsonl::write_jsonl_atomic(&args.output, &tasks).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "exported": tasks.len(),
            "path": args.output.display().to_string(),
        }))?,
        OutputMode::Text => output::print_message(&format!(
            "Exported {} task(s) to {}",
            tasks.len(),
            args.output.display()
        ))?,
    }
    Ok(())
}

async fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let source = JsonlFileSource::new(path);
    Ok(source.fetch().await?)
}

async fn layout_options(args: &LayoutArgs) -> Result<GraphOptions> {
    let base = match &args.config {
        Some(path) => GraphOptions::from_yaml_file(path).await?,
        None => {
            let default_path = Path::new(DEFAULT_OPTIONS_FILE);
            if tokio::fs::try_exists(default_path).await.unwrap_or(false) {
                GraphOptions::from_yaml_file(default_path).await?
            } else {
                GraphOptions::default()
            }
        }
    };
    let options = merge_options(base, args);
    options.validate()?;
    Ok(options)
}

/// Layer CLI flags over the options loaded from file. Boolean flags
/// only force their own direction; an absent flag leaves the file
/// value in place.
fn merge_options(base: GraphOptions, args: &LayoutArgs) -> GraphOptions {
    let mut options = base;
    if let Some(orientation) = args.orientation {
        options.orientation = orientation.into();
    }
    if args.invert {
        options.invert_direction = true;
    }
    if args.hide_related {
        options.show_related = false;
    }
    if args.hide_parent_child {
        options.show_parent_child = false;
    }
    if args.show_discovered_from {
        options.show_discovered_from = true;
    }
    if args.no_nudge {
        options.allow_related_nudge = false;
    }
    if args.no_group_isolates {
        options.group_isolates = false;
    }
    if let Some(width) = args.node_width {
        options.node_width = width;
    }
    if let Some(height) = args.node_height {
        options.node_height = height;
    }
    if let Some(separation) = args.node_separation {
        options.node_separation = separation;
    }
    if let Some(separation) = args.rank_separation {
        options.rank_separation = separation;
    }
    options
}

fn build_filter(statuses: &[TaskStatusArg], query: Option<&str>) -> TaskFilter {
    TaskFilter {
        statuses: if statuses.is_empty() {
            None
        } else {
            Some(statuses.iter().map(|s| (*s).into()).collect())
        },
        query: query.map(str::to_string),
    }
}
