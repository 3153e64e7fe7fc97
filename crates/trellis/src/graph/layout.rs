//! Self-contained layered layout.
//!
//! Places nodes with a compact Sugiyama-style pipeline: break cycles
//! with a greedy feedback ordering, assign ranks by longest path over
//! the hard constraints, nudge weakly linked nodes toward their
//! partners, reduce crossings with weighted barycenter sweeps, then map
//! ranks and slots onto coordinates for the requested orientation.
//!
//! Only `blocks` edges constrain ranks. `related` edges become weak
//! constraints when nudging is allowed: they influence ordering and may
//! pull a node that no hard edge pins, but never move a pinned node.
//! Other edge types render without constraining anything.
//!
//! The pipeline never panics. If an internal step reports failure the
//! nodes land on a plain grid instead and a warning is logged.

use crate::config::GraphOptions;
use crate::domain::{DependencyType, TaskId};
use crate::graph::model::{GraphEdge, GraphNode, Point};
use std::collections::HashMap;
use thiserror::Error;

/// Barycenter weight of a `blocks` constraint.
const STRICT_WEIGHT: f64 = 2.0;
/// Barycenter weight of a `related` constraint.
const WEAK_WEIGHT: f64 = 0.2;
/// Down-up sweep pairs attempted during crossing reduction.
const ORDERING_PASSES: usize = 4;

const FALLBACK_COLUMNS: usize = 4;
const FALLBACK_GAP_X: f64 = 40.0;
const FALLBACK_GAP_Y: f64 = 30.0;

/// Clearance between the layered nodes and the relocated bucket.
const BUCKET_CLEARANCE_X: f64 = 360.0;
const BUCKET_CLEARANCE_Y: f64 = 200.0;

#[derive(Debug, Error)]
enum LayoutError {
    #[error("rank relaxation did not settle after {0} passes")]
    RankDivergence(usize),
    #[error("non-finite coordinate for node slot {0}")]
    NonFiniteCoordinate(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConstraintKind {
    Strict,
    Weak,
}

/// A layout constraint between two node slots, in rendered direction.
#[derive(Debug, Clone, Copy)]
struct Constraint {
    source: usize,
    target: usize,
    kind: ConstraintKind,
}

/// Position every node in place and stamp its rank.
///
/// Nodes keep their slot order; only `position` and `rank` change. The
/// isolate bucket, when present, is moved clear of the others at the
/// end.
pub fn apply_layout(nodes: &mut [GraphNode], edges: &[GraphEdge], options: &GraphOptions) {
    if nodes.is_empty() {
        return;
    }

    let constraints = build_constraints(nodes, edges, options);
    match layered_positions(nodes.len(), &constraints, options) {
        Ok(placements) => {
            for (node, placement) in nodes.iter_mut().zip(placements) {
                node.rank = placement.rank;
                node.position = placement.position;
            }
        }
        Err(error) => {
            tracing::warn!(%error, "layered layout failed, using grid placement");
            grid_positions(nodes, options);
        }
    }

    reposition_bucket(nodes, options);
}

// ===== Constraint graph =====

fn build_constraints(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    options: &GraphOptions,
) -> Vec<Constraint> {
    let index_of: HashMap<&TaskId, usize> =
        nodes.iter().enumerate().map(|(i, n)| (&n.id, i)).collect();

    let mut constraints = Vec::new();
    for edge in edges {
        let kind = match edge.dep_type {
            DependencyType::Blocks => ConstraintKind::Strict,
            DependencyType::Related if options.allow_related_nudge => ConstraintKind::Weak,
            _ => continue,
        };
        let (Some(&source), Some(&target)) =
            (index_of.get(&edge.source), index_of.get(&edge.target))
        else {
            continue;
        };
        if source == target {
            continue;
        }
        constraints.push(Constraint {
            source,
            target,
            kind,
        });
    }
    constraints
}

// ===== Layered pipeline =====

struct Placement {
    rank: usize,
    position: Point,
}

fn layered_positions(
    n: usize,
    constraints: &[Constraint],
    options: &GraphOptions,
) -> Result<Vec<Placement>, LayoutError> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let ordering = greedy_feedback_order(n, constraints);
    let mut ord_pos = vec![0usize; n];
    for (i, &v) in ordering.iter().enumerate() {
        ord_pos[v] = i;
    }

    // Strict arcs with back edges flipped so ranking sees an acyclic
    // graph. Rendering keeps the original direction.
    let arcs: Vec<(usize, usize)> = constraints
        .iter()
        .filter(|c| c.kind == ConstraintKind::Strict)
        .map(|c| {
            if ord_pos[c.source] <= ord_pos[c.target] {
                (c.source, c.target)
            } else {
                (c.target, c.source)
            }
        })
        .collect();

    let mut rank = longest_path_ranks(n, &arcs)?;

    let mut strict_pinned = vec![false; n];
    for c in constraints.iter().filter(|c| c.kind == ConstraintKind::Strict) {
        strict_pinned[c.source] = true;
        strict_pinned[c.target] = true;
    }
    nudge_weak_ranks(&mut rank, constraints, &strict_pinned)?;

    let max_rank = rank.iter().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for v in 0..n {
        layers[rank[v]].push(v);
    }
    let mut pos = vec![0usize; n];
    for layer in &layers {
        for (slot, &v) in layer.iter().enumerate() {
            pos[v] = slot;
        }
    }

    order_layers(&mut layers, &mut pos, constraints, &rank, n);

    let points = assign_coordinates(n, &layers, options)?;
    Ok(points
        .into_iter()
        .zip(rank)
        .map(|(position, rank)| Placement { rank, position })
        .collect())
}

// ===== Cycle handling =====

/// Greedy feedback ordering: peel sinks to the back and sources to the
/// front, otherwise take the node with the largest out-minus-in degree.
/// Ties break on the lowest slot index, so the result is deterministic.
#[allow(clippy::cast_possible_wrap)]
fn greedy_feedback_order(n: usize, constraints: &[Constraint]) -> Vec<usize> {
    let mut out_neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut in_neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut out_deg = vec![0usize; n];
    let mut in_deg = vec![0usize; n];
    for c in constraints.iter().filter(|c| c.kind == ConstraintKind::Strict) {
        out_neighbors[c.source].push(c.target);
        in_neighbors[c.target].push(c.source);
        out_deg[c.source] += 1;
        in_deg[c.target] += 1;
    }

    fn detach(
        v: usize,
        active: &mut [bool],
        out_neighbors: &[Vec<usize>],
        in_neighbors: &[Vec<usize>],
        out_deg: &mut [usize],
        in_deg: &mut [usize],
    ) {
        active[v] = false;
        for &w in &out_neighbors[v] {
            if active[w] {
                in_deg[w] -= 1;
            }
        }
        for &u in &in_neighbors[v] {
            if active[u] {
                out_deg[u] -= 1;
            }
        }
    }

    let mut active = vec![true; n];
    let mut remaining = n;
    let mut head = Vec::new();
    let mut tail = Vec::new();

    while remaining > 0 {
        loop {
            let mut peeled = false;
            for v in 0..n {
                if active[v] && out_deg[v] == 0 {
                    detach(v, &mut active, &out_neighbors, &in_neighbors, &mut out_deg, &mut in_deg);
                    remaining -= 1;
                    tail.push(v);
                    peeled = true;
                }
            }
            if !peeled {
                break;
            }
        }
        loop {
            let mut peeled = false;
            for v in 0..n {
                if active[v] && in_deg[v] == 0 {
                    detach(v, &mut active, &out_neighbors, &in_neighbors, &mut out_deg, &mut in_deg);
                    remaining -= 1;
                    head.push(v);
                    peeled = true;
                }
            }
            if !peeled {
                break;
            }
        }
        if remaining > 0 {
            let mut best = None;
            let mut best_delta = i64::MIN;
            for v in 0..n {
                if active[v] {
                    let delta = out_deg[v] as i64 - in_deg[v] as i64;
                    if delta > best_delta {
                        best_delta = delta;
                        best = Some(v);
                    }
                }
            }
            if let Some(v) = best {
                detach(v, &mut active, &out_neighbors, &in_neighbors, &mut out_deg, &mut in_deg);
                remaining -= 1;
                head.push(v);
            }
        }
    }

    tail.reverse();
    head.extend(tail);
    head
}

// ===== Rank assignment =====

fn longest_path_ranks(n: usize, arcs: &[(usize, usize)]) -> Result<Vec<usize>, LayoutError> {
    let mut rank = vec![0usize; n];
    let mut passes = 0;
    loop {
        let mut changed = false;
        for &(source, target) in arcs {
            if rank[target] < rank[source] + 1 {
                rank[target] = rank[source] + 1;
                changed = true;
            }
        }
        if !changed {
            return Ok(rank);
        }
        passes += 1;
        // The longest path has fewer than n arcs, so n passes settle
        // any acyclic input. More means the arcs still hold a cycle.
        if passes > n {
            return Err(LayoutError::RankDivergence(passes));
        }
    }
}

/// Pull nodes that no strict edge pins up to their highest weak
/// partner. Ranks only ever rise, so the fixpoint exists; the pass
/// guard matches the strict relaxation.
fn nudge_weak_ranks(
    rank: &mut [usize],
    constraints: &[Constraint],
    strict_pinned: &[bool],
) -> Result<(), LayoutError> {
    let n = rank.len();
    let mut passes = 0;
    loop {
        let mut changed = false;
        for c in constraints.iter().filter(|c| c.kind == ConstraintKind::Weak) {
            if !strict_pinned[c.source] && rank[c.source] < rank[c.target] {
                rank[c.source] = rank[c.target];
                changed = true;
            }
            if !strict_pinned[c.target] && rank[c.target] < rank[c.source] {
                rank[c.target] = rank[c.source];
                changed = true;
            }
        }
        if !changed {
            return Ok(());
        }
        passes += 1;
        if passes > n {
            return Err(LayoutError::RankDivergence(passes));
        }
    }
}

// ===== Crossing reduction =====

fn order_layers(
    layers: &mut [Vec<usize>],
    pos: &mut [usize],
    constraints: &[Constraint],
    rank: &[usize],
    n: usize,
) {
    let mut best = count_crossings(constraints, rank, pos);
    if best == 0 {
        return;
    }

    let mut neighbors: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for c in constraints {
        let weight = match c.kind {
            ConstraintKind::Strict => STRICT_WEIGHT,
            ConstraintKind::Weak => WEAK_WEIGHT,
        };
        neighbors[c.source].push((c.target, weight));
        neighbors[c.target].push((c.source, weight));
    }

    let mut best_layers = layers.to_vec();
    for _ in 0..ORDERING_PASSES {
        sweep_once(layers, pos, &neighbors, rank, true);
        sweep_once(layers, pos, &neighbors, rank, false);
        let crossings = count_crossings(constraints, rank, pos);
        if crossings < best {
            best = crossings;
            best_layers = layers.to_vec();
            if best == 0 {
                break;
            }
        } else {
            break;
        }
    }

    for (layer, best_layer) in layers.iter_mut().zip(best_layers) {
        *layer = best_layer;
        for (slot, &v) in layer.iter().enumerate() {
            pos[v] = slot;
        }
    }
}

/// One barycenter sweep. Downward passes order each layer by the mean
/// slot of partners in lower ranks, upward passes by partners in higher
/// ranks. Nodes without partners in that direction keep their slot; the
/// sort is stable, so ties preserve the current order.
#[allow(clippy::cast_precision_loss)]
fn sweep_once(
    layers: &mut [Vec<usize>],
    pos: &mut [usize],
    neighbors: &[Vec<(usize, f64)>],
    rank: &[usize],
    downward: bool,
) {
    let order: Vec<usize> = if downward {
        (0..layers.len()).collect()
    } else {
        (0..layers.len()).rev().collect()
    };

    for r in order {
        let keys: Vec<f64> = layers[r]
            .iter()
            .map(|&v| {
                let mut numerator = 0.0;
                let mut denominator = 0.0;
                for &(u, weight) in &neighbors[v] {
                    let counts = if downward {
                        rank[u] < rank[v]
                    } else {
                        rank[u] > rank[v]
                    };
                    if counts {
                        numerator += weight * pos[u] as f64;
                        denominator += weight;
                    }
                }
                if denominator > 0.0 {
                    numerator / denominator
                } else {
                    pos[v] as f64
                }
            })
            .collect();

        let mut keyed: Vec<(f64, usize)> = keys
            .into_iter()
            .zip(layers[r].iter().copied())
            .collect();
        keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        layers[r] = keyed.into_iter().map(|(_, v)| v).collect();
        for (slot, &v) in layers[r].iter().enumerate() {
            pos[v] = slot;
        }
    }
}

/// Count slot-order inversions among constraints joining the same pair
/// of ranks. Same-rank constraints cannot cross and are skipped.
fn count_crossings(constraints: &[Constraint], rank: &[usize], pos: &[usize]) -> usize {
    let mut spans: Vec<(usize, usize, usize, usize)> = Vec::new();
    for c in constraints {
        if rank[c.source] == rank[c.target] {
            continue;
        }
        let (low, high) = if rank[c.source] < rank[c.target] {
            (c.source, c.target)
        } else {
            (c.target, c.source)
        };
        spans.push((rank[low], rank[high], pos[low], pos[high]));
    }

    let mut crossings = 0;
    for i in 0..spans.len() {
        for j in (i + 1)..spans.len() {
            let (a, b) = (spans[i], spans[j]);
            if a.0 == b.0 && a.1 == b.1 {
                let inverted = (a.2 < b.2 && a.3 > b.3) || (a.2 > b.2 && a.3 < b.3);
                if inverted {
                    crossings += 1;
                }
            }
        }
    }
    crossings
}

// ===== Coordinates =====

/// Rank index runs along the primary axis, slot index along the cross
/// axis. Each layer is centered against the widest one. Reversed
/// orientations mirror the primary axis. Positions are top-left corners.
#[allow(clippy::cast_precision_loss)]
fn assign_coordinates(
    n: usize,
    layers: &[Vec<usize>],
    options: &GraphOptions,
) -> Result<Vec<Point>, LayoutError> {
    let vertical = options.orientation.is_vertical();
    let (primary_extent, cross_extent) = if vertical {
        (options.node_height, options.node_width)
    } else {
        (options.node_width, options.node_height)
    };

    let span = |len: usize| -> f64 {
        if len == 0 {
            0.0
        } else {
            len as f64 * cross_extent + (len - 1) as f64 * options.node_separation
        }
    };
    let max_span = layers.iter().map(|l| span(l.len())).fold(0.0_f64, f64::max);
    let last_layer = layers.len() - 1;

    let mut points = vec![Point::default(); n];
    for (r, layer) in layers.iter().enumerate() {
        let offset = (max_span - span(layer.len())) / 2.0;
        let step = if options.orientation.is_reversed() {
            last_layer - r
        } else {
            r
        };
        let primary = step as f64 * (primary_extent + options.rank_separation);
        for (slot, &v) in layer.iter().enumerate() {
            let cross = offset + slot as f64 * (cross_extent + options.node_separation);
            points[v] = if vertical {
                Point::new(cross, primary)
            } else {
                Point::new(primary, cross)
            };
        }
    }

    for (v, point) in points.iter().enumerate() {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(LayoutError::NonFiniteCoordinate(v));
        }
    }
    Ok(points)
}

// ===== Fallback and bucket placement =====

#[allow(clippy::cast_precision_loss)]
fn grid_positions(nodes: &mut [GraphNode], options: &GraphOptions) {
    for (i, node) in nodes.iter_mut().enumerate() {
        let col = (i % FALLBACK_COLUMNS) as f64;
        let row = i / FALLBACK_COLUMNS;
        node.rank = row;
        node.position = Point::new(
            col * (options.node_width + FALLBACK_GAP_X),
            row as f64 * (options.node_height + FALLBACK_GAP_Y),
        );
    }
}

/// Move the isolate bucket clear of the laid-out nodes: past the right
/// edge for vertical orientations, below the bottom edge for horizontal
/// ones. A bucket with no companions stays where layout put it.
fn reposition_bucket(nodes: &mut [GraphNode], options: &GraphOptions) {
    if nodes.len() < 2 {
        return;
    }
    let Some(bucket_idx) = nodes.iter().position(GraphNode::is_bucket) else {
        return;
    };

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for (i, node) in nodes.iter().enumerate() {
        if i == bucket_idx {
            continue;
        }
        min_x = min_x.min(node.position.x);
        min_y = min_y.min(node.position.y);
        max_x = max_x.max(node.position.x);
        max_y = max_y.max(node.position.y);
    }

    nodes[bucket_idx].position = if options.orientation.is_vertical() {
        Point::new(max_x + BUCKET_CLEARANCE_X, min_y)
    } else {
        Point::new(min_x, max_y + BUCKET_CLEARANCE_Y)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Orientation;
    use crate::domain::{Dependency, Task};
    use crate::graph::build::{build_edges, build_nodes};
    use crate::graph::isolates::bucket_isolates;
    use rstest::rstest;

    /// Each task blocks on the one before it.
    fn chain(ids: &[&str]) -> Vec<Task> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| {
                let mut task = Task::new(*id, id.to_uppercase());
                if i > 0 {
                    task.dependencies = vec![Dependency::new(ids[i - 1], DependencyType::Blocks)];
                }
                task
            })
            .collect()
    }

    fn laid_out(tasks: &[Task], options: &GraphOptions) -> Vec<GraphNode> {
        let mut nodes = build_nodes(tasks, options);
        let edges = build_edges(tasks, options);
        apply_layout(&mut nodes, &edges, options);
        nodes
    }

    fn by_id<'a>(nodes: &'a [GraphNode], id: &str) -> &'a GraphNode {
        nodes.iter().find(|n| n.id.as_str() == id).unwrap()
    }

    #[test]
    fn chain_ranks_follow_dependency_order() {
        let nodes = laid_out(&chain(&["a", "b", "c"]), &GraphOptions::default());
        assert_eq!(by_id(&nodes, "a").rank, 0);
        assert_eq!(by_id(&nodes, "b").rank, 1);
        assert_eq!(by_id(&nodes, "c").rank, 2);
        assert!(by_id(&nodes, "a").position.y < by_id(&nodes, "b").position.y);
        assert!(by_id(&nodes, "b").position.y < by_id(&nodes, "c").position.y);
    }

    #[rstest]
    #[case::top_bottom(Orientation::TopBottom)]
    #[case::bottom_top(Orientation::BottomTop)]
    #[case::left_right(Orientation::LeftRight)]
    #[case::right_left(Orientation::RightLeft)]
    fn orientation_maps_the_primary_axis(#[case] orientation: Orientation) {
        let options = GraphOptions {
            orientation,
            ..GraphOptions::default()
        };
        let nodes = laid_out(&chain(&["a", "b", "c"]), &options);
        let (a, c) = (by_id(&nodes, "a"), by_id(&nodes, "c"));
        match orientation {
            Orientation::TopBottom => assert!(a.position.y < c.position.y),
            Orientation::BottomTop => assert!(a.position.y > c.position.y),
            Orientation::LeftRight => assert!(a.position.x < c.position.x),
            Orientation::RightLeft => assert!(a.position.x > c.position.x),
        }
        // Ranks are orientation-independent.
        assert_eq!(a.rank, 0);
        assert_eq!(c.rank, 2);
    }

    #[test]
    fn cycles_terminate_with_every_node_ranked() {
        let mut tasks = chain(&["a", "b", "c"]);
        tasks[0].dependencies = vec![Dependency::new("c", DependencyType::Blocks)];
        let nodes = laid_out(&tasks, &GraphOptions::default());
        // The back edge is absorbed; the remaining chain still stacks.
        assert_eq!(by_id(&nodes, "a").rank, 0);
        assert_eq!(by_id(&nodes, "b").rank, 1);
        assert_eq!(by_id(&nodes, "c").rank, 2);
        assert!(nodes
            .iter()
            .all(|n| n.position.x.is_finite() && n.position.y.is_finite()));
    }

    #[test]
    fn weak_nudge_pulls_unpinned_node_to_its_partner() {
        let mut tasks = chain(&["a", "b"]);
        tasks.push(Task {
            dependencies: vec![Dependency::new("b", DependencyType::Related)],
            ..Task::new("c", "C")
        });

        let nudged = laid_out(&tasks, &GraphOptions::default());
        assert_eq!(by_id(&nudged, "c").rank, by_id(&nudged, "b").rank);
        assert_eq!(
            by_id(&nudged, "c").position.y,
            by_id(&nudged, "b").position.y
        );

        let options = GraphOptions {
            allow_related_nudge: false,
            ..GraphOptions::default()
        };
        let plain = laid_out(&tasks, &options);
        assert_eq!(by_id(&plain, "c").rank, 0);
    }

    #[test]
    fn weak_nudge_never_moves_a_pinned_node() {
        // b is pinned at rank 1 by its blocks edge; the related link to
        // f (rank 2 in the other chain) must not pull it.
        let mut tasks = chain(&["a", "b"]);
        tasks.extend(chain(&["d", "e", "f"]));
        tasks[1]
            .dependencies
            .push(Dependency::new("f", DependencyType::Related));

        let nodes = laid_out(&tasks, &GraphOptions::default());
        assert_eq!(by_id(&nodes, "b").rank, 1);
        assert_eq!(by_id(&nodes, "f").rank, 2);
    }

    #[test]
    fn unconstrained_nodes_share_rank_zero_in_input_order() {
        let options = GraphOptions {
            group_isolates: false,
            ..GraphOptions::default()
        };
        let tasks = vec![Task::new("x", "X"), Task::new("y", "Y")];
        let nodes = laid_out(&tasks, &options);
        assert_eq!(nodes[0].rank, 0);
        assert_eq!(nodes[1].rank, 0);
        assert_eq!(nodes[0].position.y, nodes[1].position.y);
        assert!(nodes[0].position.x < nodes[1].position.x);
    }

    #[test]
    fn barycenter_sweeps_remove_an_avoidable_crossing() {
        // Input order puts c before d in the second layer, crossing the
        // a->d and b->c edges. One sweep untangles them.
        let tasks = vec![
            Task::new("a", "A"),
            Task::new("b", "B"),
            Task {
                dependencies: vec![Dependency::new("b", DependencyType::Blocks)],
                ..Task::new("c", "C")
            },
            Task {
                dependencies: vec![Dependency::new("a", DependencyType::Blocks)],
                ..Task::new("d", "D")
            },
        ];
        let nodes = laid_out(&tasks, &GraphOptions::default());
        assert!(by_id(&nodes, "d").position.x < by_id(&nodes, "c").position.x);
        assert_eq!(by_id(&nodes, "a").position.x, by_id(&nodes, "d").position.x);
        assert_eq!(by_id(&nodes, "b").position.x, by_id(&nodes, "c").position.x);
    }

    #[test]
    fn layers_center_against_the_widest() {
        // Two prerequisites converge on one dependent; the singleton
        // layer sits midway between the two columns above it.
        let tasks = vec![
            Task::new("a", "A"),
            Task::new("b", "B"),
            Task {
                dependencies: vec![
                    Dependency::new("a", DependencyType::Blocks),
                    Dependency::new("b", DependencyType::Blocks),
                ],
                ..Task::new("c", "C")
            },
        ];
        let options = GraphOptions::default();
        let nodes = laid_out(&tasks, &options);
        let expected = (options.node_width + options.node_separation) / 2.0;
        assert_eq!(by_id(&nodes, "c").position.x, expected);
    }

    #[test]
    fn identical_input_produces_identical_output() {
        let mut tasks = chain(&["a", "b", "c"]);
        tasks.push(Task::new("lone", "Lone"));
        let options = GraphOptions::default();

        let first = laid_out(&tasks, &options);
        let second = laid_out(&tasks, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn grid_fallback_fills_rows_of_four() {
        let tasks: Vec<Task> = (0..5)
            .map(|i| Task::new(format!("t{i}"), format!("T{i}")))
            .collect();
        let options = GraphOptions::default();
        let mut nodes = build_nodes(&tasks, &options);
        grid_positions(&mut nodes, &options);

        assert_eq!(nodes[0].position, Point::new(0.0, 0.0));
        assert_eq!(nodes[1].position, Point::new(280.0, 0.0));
        assert_eq!(nodes[3].position, Point::new(840.0, 0.0));
        assert_eq!(nodes[4].position, Point::new(0.0, 102.0));
        assert_eq!(nodes[4].rank, 1);
    }

    #[test]
    fn bucket_lands_right_of_the_layered_nodes() {
        let mut tasks = chain(&["a", "b"]);
        tasks.push(Task::new("lone", "Lone"));
        let options = GraphOptions::default();
        let nodes = build_nodes(&tasks, &options);
        let edges = build_edges(&tasks, &options);
        let (mut nodes, _) = bucket_isolates(nodes, &edges, &options);
        apply_layout(&mut nodes, &edges, &options);

        let bucket = nodes.iter().find(|n| n.is_bucket()).unwrap();
        let others_max_x = nodes
            .iter()
            .filter(|n| !n.is_bucket())
            .map(|n| n.position.x + n.width)
            .fold(f64::NEG_INFINITY, f64::max);
        let others_min_y = nodes
            .iter()
            .filter(|n| !n.is_bucket())
            .map(|n| n.position.y)
            .fold(f64::INFINITY, f64::min);
        assert!(bucket.position.x > others_max_x);
        assert_eq!(bucket.position.y, others_min_y);
    }

    #[test]
    fn bucket_lands_below_for_horizontal_orientations() {
        let mut tasks = chain(&["a", "b"]);
        tasks.push(Task::new("lone", "Lone"));
        let options = GraphOptions {
            orientation: Orientation::LeftRight,
            ..GraphOptions::default()
        };
        let nodes = build_nodes(&tasks, &options);
        let edges = build_edges(&tasks, &options);
        let (mut nodes, _) = bucket_isolates(nodes, &edges, &options);
        apply_layout(&mut nodes, &edges, &options);

        let bucket = nodes.iter().find(|n| n.is_bucket()).unwrap();
        let others_max_y = nodes
            .iter()
            .filter(|n| !n.is_bucket())
            .map(|n| n.position.y + n.height)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(bucket.position.y > others_max_y);
    }

    #[test]
    fn lone_bucket_stays_at_the_origin() {
        let tasks = vec![Task::new("a", "A")];
        let options = GraphOptions::default();
        let nodes = build_nodes(&tasks, &options);
        let (mut nodes, _) = bucket_isolates(nodes, &[], &options);
        apply_layout(&mut nodes, &[], &options);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].position, Point::new(0.0, 0.0));
    }

    #[test]
    fn empty_node_list_is_a_no_op() {
        let mut nodes: Vec<GraphNode> = Vec::new();
        apply_layout(&mut nodes, &[], &GraphOptions::default());
        assert!(nodes.is_empty());
    }

    #[test]
    fn single_node_sits_at_the_origin() {
        let options = GraphOptions {
            group_isolates: false,
            ..GraphOptions::default()
        };
        let nodes = laid_out(&[Task::new("only", "Only")], &options);
        assert_eq!(nodes[0].position, Point::new(0.0, 0.0));
        assert_eq!(nodes[0].rank, 0);
    }
}
