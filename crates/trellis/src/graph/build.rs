//! Graph construction from task records.
//!
//! Builds the unpositioned node list and the styled edge list that the
//! rest of the pipeline works on. Nodes come out in snapshot order; edges
//! come out in snapshot order of their owning task, then dependency
//! order. Both are fully deterministic.

use crate::config::{GraphOptions, Orientation};
use crate::domain::{DependencyType, Task, TaskId};
use crate::graph::model::{GraphEdge, GraphNode, Highlight, NodeData, NodeKind, Point, PortSide};
use crate::graph::style::edge_style;
use std::collections::HashSet;

/// One node per task, in input order.
///
/// Display fields are copied verbatim from the task; rank and position
/// are placeholders until layout runs. Port sides are fixed by the
/// orientation so every node attaches its edges consistently.
#[must_use]
pub fn build_nodes(tasks: &[Task], options: &GraphOptions) -> Vec<GraphNode> {
    let (source_port, target_port) = port_sides(options.orientation);

    tasks
        .iter()
        .map(|task| GraphNode {
            id: task.id.clone(),
            kind: NodeKind::Task(NodeData {
                title: task.title.clone(),
                status: task.status,
                issue_type: task.issue_type,
                priority: task.priority,
                assignee: task.assignee.clone(),
                description: task.description.clone(),
                updated_at: task.updated_at,
            }),
            rank: 0,
            position: Point::default(),
            width: options.node_width,
            height: options.node_height,
            source_port,
            target_port,
            highlight: Highlight::None,
        })
        .collect()
}

/// Materialize the visible dependency edges.
///
/// For each dependency of each task, in order:
///
/// 1. the type-visibility toggles are applied (`blocks` is always
///    visible);
/// 2. references to ids absent from the snapshot are skipped silently;
/// 3. the edge runs prerequisite -> dependent, or the reverse when
///    `invert_direction` is set;
/// 4. the stroke style is attached per the type table;
/// 5. an exact duplicate of an already-emitted edge is dropped, so edge
///    ids stay unique.
#[must_use]
pub fn build_edges(tasks: &[Task], options: &GraphOptions) -> Vec<GraphEdge> {
    let known_ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for task in tasks {
        for dep in &task.dependencies {
            if !edge_visible(dep.dep_type, options) {
                continue;
            }
            if !known_ids.contains(dep.depends_on_id.as_str()) {
                continue;
            }

            let (source, target) = if options.invert_direction {
                (task.id.clone(), dep.depends_on_id.clone())
            } else {
                (dep.depends_on_id.clone(), task.id.clone())
            };

            let id = edge_id(&source, &target, dep.dep_type);
            if !seen.insert(id.clone()) {
                continue;
            }

            edges.push(GraphEdge {
                id,
                source,
                target,
                dep_type: dep.dep_type,
                style: edge_style(dep.dep_type),
                highlighted: false,
            });
        }
    }

    edges
}

/// Stable edge identity for a (source, target, type) triple.
#[must_use]
pub fn edge_id(source: &TaskId, target: &TaskId, dep_type: DependencyType) -> String {
    format!("{source}->{target}:{dep_type}")
}

/// Edge attachment sides for an orientation.
///
/// Returned as `(source_port, target_port)`: under `TB` edges leave the
/// bottom of the prerequisite and enter the top of the dependent, and so
/// on around the compass.
#[must_use]
pub fn port_sides(orientation: Orientation) -> (PortSide, PortSide) {
    match orientation {
        Orientation::TopBottom => (PortSide::Bottom, PortSide::Top),
        Orientation::BottomTop => (PortSide::Top, PortSide::Bottom),
        Orientation::LeftRight => (PortSide::Right, PortSide::Left),
        Orientation::RightLeft => (PortSide::Left, PortSide::Right),
    }
}

fn edge_visible(dep_type: DependencyType, options: &GraphOptions) -> bool {
    match dep_type {
        DependencyType::Blocks => true,
        DependencyType::Related => options.show_related,
        DependencyType::ParentChild => options.show_parent_child,
        DependencyType::DiscoveredFrom => options.show_discovered_from,
    }
}
