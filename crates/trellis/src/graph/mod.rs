//! Dependency graph computation.
//!
//! Turns a flat task snapshot into a render-ready view in five stages:
//!
//! 1. node and edge construction ([`build`])
//! 2. isolate bucketing ([`isolates`])
//! 3. layered layout ([`layout`])
//! 4. selection traversal ([`traverse`])
//! 5. highlight and metadata assembly ([`compute_graph`])
//!
//! Every stage is a pure function of its inputs. Recomputing with equal
//! inputs yields an identical view, and changing only the selection
//! changes only highlights and metadata.

pub mod build;
pub mod isolates;
pub mod layout;
pub mod model;
pub mod style;
pub mod traverse;

pub use isolates::{expand_bucket, ISOLATES_BUCKET_ID};
pub use layout::apply_layout;
pub use model::{
    BucketData, EdgeStyle, GraphEdge, GraphMeta, GraphNode, GraphView, Highlight, NodeData,
    NodeKind, Point, PortSide,
};
pub use style::{edge_style, status_palette, StatusPalette};
pub use traverse::{blocking_deps, transitive_deps};

use crate::config::GraphOptions;
use crate::domain::{Task, TaskId};

/// Compute the full graph view for a task snapshot.
///
/// Runs the whole pipeline: build nodes and edges, bucket isolates, lay
/// everything out, then annotate highlights and metadata for the
/// selection. Pure and deterministic; the same inputs always produce
/// the same view.
///
/// # Examples
///
/// ```
/// use trellis::config::GraphOptions;
/// use trellis::domain::{Dependency, DependencyType, Task};
/// use trellis::graph::compute_graph;
///
/// let tasks = vec![
///     Task::new("core", "Build the core"),
///     Task {
///         dependencies: vec![Dependency::new("core", DependencyType::Blocks)],
///         ..Task::new("ui", "Wire up the UI")
///     },
/// ];
/// let view = compute_graph(&tasks, &GraphOptions::default(), None);
/// assert_eq!(view.nodes.len(), 2);
/// assert_eq!(view.edges.len(), 1);
/// ```
#[must_use]
pub fn compute_graph(
    tasks: &[Task],
    options: &GraphOptions,
    selection: Option<&TaskId>,
) -> GraphView {
    let nodes = build::build_nodes(tasks, options);
    let mut edges = build::build_edges(tasks, options);
    let (mut nodes, isolates) = isolates::bucket_isolates(nodes, &edges, options);
    layout::apply_layout(&mut nodes, &edges, options);

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        isolates = isolates.len(),
        "computed graph view"
    );

    let mut meta = GraphMeta {
        isolates,
        ..GraphMeta::default()
    };
    if let Some(selected) = selection {
        annotate_selection(&mut nodes, &mut edges, &mut meta, tasks, options, selected);
    }

    GraphView { nodes, edges, meta }
}

/// Stamp highlight classes and traversal metadata for a selection.
///
/// Node classes by precedence: the selection itself, then still-open
/// prerequisites, then the rest of the transitive closure, then dimmed.
/// An edge lights up when it lies on a path from a prerequisite toward
/// the selection; the test reads endpoints in prerequisite-to-dependent
/// order, so render inversion does not move the highlight.
fn annotate_selection(
    nodes: &mut [GraphNode],
    edges: &mut [GraphEdge],
    meta: &mut GraphMeta,
    tasks: &[Task],
    options: &GraphOptions,
    selected: &TaskId,
) {
    let transitive = traverse::transitive_deps(tasks, selected);
    let blocking = traverse::blocking_deps(tasks, selected);

    for node in nodes.iter_mut() {
        node.highlight = if node.id == *selected {
            Highlight::Selected
        } else if blocking.contains(&node.id) {
            Highlight::Blocking
        } else if transitive.contains(&node.id) {
            Highlight::Ancestor
        } else {
            Highlight::Dimmed
        };
    }

    for edge in edges.iter_mut() {
        let (prereq, dependent) = if options.invert_direction {
            (&edge.target, &edge.source)
        } else {
            (&edge.source, &edge.target)
        };
        edge.highlighted = transitive.contains(prereq)
            && (transitive.contains(dependent) || dependent == selected);
    }

    meta.selected = Some(selected.clone());
    meta.transitive_deps = transitive.into_iter().collect();
    meta.blocking_deps = blocking.into_iter().collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dependency, DependencyType, TaskStatus};

    fn pipeline_tasks() -> Vec<Task> {
        vec![
            Task {
                status: TaskStatus::Closed,
                ..Task::new("a", "A")
            },
            Task {
                dependencies: vec![Dependency::new("a", DependencyType::Blocks)],
                ..Task::new("b", "B")
            },
            Task {
                dependencies: vec![Dependency::new("b", DependencyType::Blocks)],
                ..Task::new("c", "C")
            },
            Task::new("lone", "Lone"),
        ]
    }

    fn highlight_of(view: &GraphView, id: &str) -> Highlight {
        view.node(id).unwrap().highlight
    }

    #[test]
    fn selection_classes_nodes_by_precedence() {
        let tasks = pipeline_tasks();
        let options = GraphOptions {
            group_isolates: false,
            ..GraphOptions::default()
        };
        let view = compute_graph(&tasks, &options, Some(&TaskId::new("c")));

        assert_eq!(highlight_of(&view, "c"), Highlight::Selected);
        assert_eq!(highlight_of(&view, "b"), Highlight::Blocking);
        // Closed prerequisite stays an ancestor, not a blocker.
        assert_eq!(highlight_of(&view, "a"), Highlight::Ancestor);
        assert_eq!(highlight_of(&view, "lone"), Highlight::Dimmed);
    }

    #[test]
    fn bucket_dims_like_any_unrelated_node() {
        let tasks = pipeline_tasks();
        let view = compute_graph(&tasks, &GraphOptions::default(), Some(&TaskId::new("c")));
        let bucket = view.nodes.iter().find(|n| n.is_bucket()).unwrap();
        assert_eq!(bucket.highlight, Highlight::Dimmed);
    }

    #[test]
    fn edges_light_up_along_the_selected_path() {
        let tasks = pipeline_tasks();
        let view = compute_graph(&tasks, &GraphOptions::default(), Some(&TaskId::new("c")));
        assert!(view.edge("a->b:blocks").unwrap().highlighted);
        assert!(view.edge("b->c:blocks").unwrap().highlighted);
    }

    #[test]
    fn edges_off_the_path_stay_plain() {
        let mut tasks = pipeline_tasks();
        tasks.push(Task {
            dependencies: vec![Dependency::new("lone", DependencyType::Blocks)],
            ..Task::new("other", "Other")
        });
        let view = compute_graph(&tasks, &GraphOptions::default(), Some(&TaskId::new("c")));
        assert!(!view.edge("lone->other:blocks").unwrap().highlighted);
    }

    #[test]
    fn render_inversion_keeps_the_same_edges_highlighted() {
        let tasks = pipeline_tasks();
        let options = GraphOptions {
            invert_direction: true,
            ..GraphOptions::default()
        };
        let view = compute_graph(&tasks, &options, Some(&TaskId::new("c")));
        assert!(view.edge("b->a:blocks").unwrap().highlighted);
        assert!(view.edge("c->b:blocks").unwrap().highlighted);
    }

    #[test]
    fn no_selection_means_no_annotations() {
        let tasks = pipeline_tasks();
        let view = compute_graph(&tasks, &GraphOptions::default(), None);
        assert!(view.nodes.iter().all(|n| n.highlight == Highlight::None));
        assert!(view.edges.iter().all(|e| !e.highlighted));
        assert!(view.meta.selected.is_none());
        assert!(view.meta.transitive_deps.is_empty());
    }

    #[test]
    fn unknown_selection_dims_everything() {
        let tasks = pipeline_tasks();
        let options = GraphOptions {
            group_isolates: false,
            ..GraphOptions::default()
        };
        let view = compute_graph(&tasks, &options, Some(&TaskId::new("nope")));
        assert!(view.nodes.iter().all(|n| n.highlight == Highlight::Dimmed));
        assert!(view.meta.transitive_deps.is_empty());
        assert_eq!(view.meta.selected, Some(TaskId::new("nope")));
    }

    #[test]
    fn selection_change_is_annotation_only() {
        let tasks = pipeline_tasks();
        let options = GraphOptions::default();
        let plain = compute_graph(&tasks, &options, None);
        let selected = compute_graph(&tasks, &options, Some(&TaskId::new("c")));

        for (a, b) in plain.nodes.iter().zip(&selected.nodes) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.position, b.position);
            assert_eq!(a.rank, b.rank);
        }
        for (a, b) in plain.edges.iter().zip(&selected.edges) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.style, b.style);
        }
    }

    #[test]
    fn meta_reports_sorted_traversal_sets() {
        let tasks = pipeline_tasks();
        let view = compute_graph(&tasks, &GraphOptions::default(), Some(&TaskId::new("c")));
        let listed: Vec<&str> = view.meta.transitive_deps.iter().map(TaskId::as_str).collect();
        assert_eq!(listed, vec!["a", "b"]);
        let blocking: Vec<&str> = view.meta.blocking_deps.iter().map(TaskId::as_str).collect();
        assert_eq!(blocking, vec!["b"]);
    }
}
