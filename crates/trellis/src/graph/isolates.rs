//! Bucketing of tasks that no visible edge touches.
//!
//! Dense boards bury the connected structure under a carpet of solitary
//! nodes. When grouping is enabled the solitary nodes collapse into one
//! synthetic bucket that rides through layout like any other node and is
//! pushed out of the way afterwards. The bucket keeps its full member
//! nodes so a renderer can fan them back out without recomputing the
//! graph.

use crate::config::{GraphOptions, Orientation};
use crate::domain::TaskId;
use crate::graph::build::port_sides;
use crate::graph::model::{BucketData, GraphEdge, GraphNode, Highlight, NodeKind, Point};
use std::collections::HashSet;

/// Reserved id of the synthetic bucket node.
pub const ISOLATES_BUCKET_ID: &str = "__isolates__";

/// Member titles shown on the bucket face before "+N more" takes over.
const PREVIEW_LEN: usize = 5;

/// The bucket renders wider than a regular node to fit its preview list.
const BUCKET_WIDTH: f64 = 260.0;

const FANOUT_COLUMNS: usize = 3;
const FANOUT_GAP: f64 = 16.0;
const FANOUT_OFFSET_X: f64 = 280.0;
const FANOUT_OFFSET_Y: f64 = 200.0;

/// Ids of nodes incident to no edge, sorted ascending.
#[must_use]
pub fn isolate_ids(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<TaskId> {
    let connected: HashSet<&TaskId> = edges
        .iter()
        .flat_map(|e| [&e.source, &e.target])
        .collect();

    let mut ids: Vec<TaskId> = nodes
        .iter()
        .filter(|n| !connected.contains(&n.id))
        .map(|n| n.id.clone())
        .collect();
    ids.sort();
    ids
}

/// Collapse isolated nodes into a single bucket when grouping is on.
///
/// Returns the possibly rewritten node list together with the sorted
/// isolate ids, which metadata reports whether or not grouping ran.
/// With grouping off, no isolates, or an empty input the node list
/// passes through untouched.
#[must_use]
pub fn bucket_isolates(
    nodes: Vec<GraphNode>,
    edges: &[GraphEdge],
    options: &GraphOptions,
) -> (Vec<GraphNode>, Vec<TaskId>) {
    let isolates = isolate_ids(&nodes, edges);
    if !options.group_isolates || isolates.is_empty() {
        return (nodes, isolates);
    }

    let isolate_set: HashSet<&TaskId> = isolates.iter().collect();
    let mut kept = Vec::with_capacity(nodes.len() - isolates.len() + 1);
    let mut members = Vec::with_capacity(isolates.len());
    for node in nodes {
        if isolate_set.contains(&node.id) {
            members.push(node);
        } else {
            kept.push(node);
        }
    }

    kept.push(make_bucket(members, options));
    (kept, isolates)
}

/// Lay the bucket's members out beside it in a three-column grid.
///
/// Display-only: the returned nodes never join the laid-out node set and
/// are recomputed on demand. Vertical orientations fan out to the right
/// of the bucket, horizontal ones below it. A non-bucket node expands to
/// nothing.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn expand_bucket(
    bucket: &GraphNode,
    orientation: Orientation,
    options: &GraphOptions,
) -> Vec<GraphNode> {
    let NodeKind::Bucket(data) = &bucket.kind else {
        return Vec::new();
    };

    let (anchor_x, anchor_y) = if orientation.is_vertical() {
        (bucket.position.x + FANOUT_OFFSET_X, bucket.position.y)
    } else {
        (bucket.position.x, bucket.position.y + FANOUT_OFFSET_Y)
    };

    data.members
        .iter()
        .enumerate()
        .map(|(i, member)| {
            let col = (i % FANOUT_COLUMNS) as f64;
            let row = (i / FANOUT_COLUMNS) as f64;
            let mut node = member.clone();
            node.rank = bucket.rank;
            node.position = Point::new(
                anchor_x + col * (options.node_width + FANOUT_GAP),
                anchor_y + row * (options.node_height + FANOUT_GAP),
            );
            node
        })
        .collect()
}

fn make_bucket(members: Vec<GraphNode>, options: &GraphOptions) -> GraphNode {
    let (source_port, target_port) = port_sides(options.orientation);
    let preview: Vec<String> = members
        .iter()
        .take(PREVIEW_LEN)
        .map(|n| n.title().to_string())
        .collect();

    GraphNode {
        id: TaskId::new(ISOLATES_BUCKET_ID),
        kind: NodeKind::Bucket(BucketData {
            label: format!("Isolated tasks ({})", members.len()),
            preview,
            hidden: members.len().saturating_sub(PREVIEW_LEN),
            members,
        }),
        rank: 0,
        position: Point::default(),
        width: BUCKET_WIDTH,
        height: options.node_height,
        source_port,
        target_port,
        highlight: Highlight::None,
    }
}
