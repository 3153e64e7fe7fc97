//! Output types of the graph pipeline.
//!
//! Everything here is plain data designed for serialization toward a
//! rendering layer: positioned nodes, styled edges, and derived metadata.
//! No type in this module holds behavior beyond small accessors; the
//! pipeline in the sibling modules fills them in.

use crate::domain::{IssueType, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Top-left corner position of a node, in layout pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Construct a point.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Side of a node where edges attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortSide {
    /// Top edge of the node box
    Top,
    /// Bottom edge of the node box
    Bottom,
    /// Left edge of the node box
    Left,
    /// Right edge of the node box
    Right,
}

/// Selection-derived display class of a node.
///
/// Classes are mutually exclusive and listed in precedence order: a node
/// that is both an ancestor and unresolved reports [`Highlight::Blocking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    /// No selection is active, or highlighting does not apply
    #[default]
    None,
    /// The selected node itself
    Selected,
    /// Transitive prerequisite of the selection that is still unresolved
    Blocking,
    /// Transitive prerequisite of the selection
    Ancestor,
    /// Unrelated to the selection while a selection is active
    Dimmed,
}

/// Display payload copied verbatim from a task record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
    /// Task title
    pub title: String,
    /// Task status
    pub status: TaskStatus,
    /// Task type, carried as plain data for the renderer
    pub issue_type: IssueType,
    /// Priority level (0 = highest)
    pub priority: i64,
    /// Assignee, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Description, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Last update timestamp, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload of the synthetic isolate bucket node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketData {
    /// Display label, e.g. `Isolated tasks (7)`
    pub label: String,
    /// Titles of the first few members
    pub preview: Vec<String>,
    /// How many members are beyond the preview
    pub hidden: usize,
    /// The bucketed nodes, in snapshot order
    pub members: Vec<GraphNode>,
}

/// What a graph node represents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum NodeKind {
    /// An ordinary task node
    Task(NodeData),
    /// The synthetic bucket that stands in for all isolated tasks
    Bucket(BucketData),
}

/// A positioned node of the computed graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    /// Node identity; equals the task id, or the reserved bucket id
    pub id: TaskId,

    /// Task payload or bucket payload
    #[serde(flatten)]
    pub kind: NodeKind,

    /// Layer index assigned by layout (0 = first rank along the flow)
    pub rank: usize,

    /// Top-left corner position assigned by layout
    pub position: Point,

    /// Rendered box width
    pub width: f64,

    /// Rendered box height
    pub height: f64,

    /// Side where outgoing edges leave this node
    pub source_port: PortSide,

    /// Side where incoming edges enter this node
    pub target_port: PortSide,

    /// Selection-derived display class
    pub highlight: Highlight,
}

impl GraphNode {
    /// The display title of this node.
    #[must_use]
    pub fn title(&self) -> &str {
        match &self.kind {
            NodeKind::Task(data) => &data.title,
            NodeKind::Bucket(data) => &data.label,
        }
    }

    /// Whether this node is the synthetic isolate bucket.
    #[must_use]
    pub fn is_bucket(&self) -> bool {
        matches!(self.kind, NodeKind::Bucket(_))
    }
}

/// Visual attributes of an edge, a pure function of its dependency type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeStyle {
    /// Stroke color as a hex string
    pub color: &'static str,
    /// SVG-style dash pattern; `None` means a solid stroke
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<&'static str>,
    /// Stroke width
    pub width: f64,
    /// Whether the edge carries an arrowhead at its target
    pub arrowhead: bool,
}

/// A styled edge of the computed graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    /// Stable identity: `{source}->{target}:{dep_type}`
    pub id: String,

    /// Node the edge leaves from
    pub source: TaskId,

    /// Node the edge points at
    pub target: TaskId,

    /// The dependency type this edge materializes
    pub dep_type: crate::domain::DependencyType,

    /// Visual attributes derived from the dependency type
    pub style: EdgeStyle,

    /// Whether the edge lies on a highlighted dependency path
    pub highlighted: bool,
}

/// Derived metadata accompanying the node and edge lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GraphMeta {
    /// Ids of tasks with no visible edges, sorted
    pub isolates: Vec<TaskId>,

    /// The active selection, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<TaskId>,

    /// Every task the selection transitively depends on (blocks links)
    pub transitive_deps: BTreeSet<TaskId>,

    /// The unresolved subset of `transitive_deps`
    pub blocking_deps: BTreeSet<TaskId>,
}

/// The complete computed graph: nodes, edges, and metadata.
///
/// Serializing a `GraphView` twice for the same input produces identical
/// bytes; every set-like field is kept in a deterministic order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphView {
    /// Positioned nodes, bucket node last when grouping applied
    pub nodes: Vec<GraphNode>,

    /// Styled edges between the nodes
    pub edges: Vec<GraphEdge>,

    /// Derived metadata
    pub meta: GraphMeta,
}

impl GraphView {
    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Look up an edge by its stable id.
    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_serializes_with_flattened_tag() {
        let node = GraphNode {
            id: TaskId::new("a"),
            kind: NodeKind::Task(NodeData {
                title: "A".to_string(),
                status: TaskStatus::Open,
                issue_type: IssueType::Task,
                priority: 0,
                assignee: None,
                description: None,
                updated_at: None,
            }),
            rank: 0,
            position: Point::new(0.0, 0.0),
            width: 240.0,
            height: 72.0,
            source_port: PortSide::Bottom,
            target_port: PortSide::Top,
            highlight: Highlight::None,
        };

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], "task");
        assert_eq!(value["data"]["title"], "A");
        assert_eq!(value["source_port"], "bottom");
        assert_eq!(value["highlight"], "none");
    }

    #[test]
    fn bucket_title_is_its_label() {
        let bucket = GraphNode {
            id: TaskId::new("__isolates__"),
            kind: NodeKind::Bucket(BucketData {
                label: "Isolated tasks (2)".to_string(),
                preview: vec!["One".to_string(), "Two".to_string()],
                hidden: 0,
                members: vec![],
            }),
            rank: 0,
            position: Point::default(),
            width: 260.0,
            height: 72.0,
            source_port: PortSide::Bottom,
            target_port: PortSide::Top,
            highlight: Highlight::None,
        };

        assert!(bucket.is_bucket());
        assert_eq!(bucket.title(), "Isolated tasks (2)");
    }
}
