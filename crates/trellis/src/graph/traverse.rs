//! Dependency traversal over the task snapshot.
//!
//! Answers "what does this task sit on top of": the transitive closure
//! of `blocks` prerequisites, and the subset of that closure still open.
//! Traversal reads the snapshot directly, so the render-time direction
//! flip never changes these sets.

use crate::domain::{DependencyType, Task, TaskId, TaskStatus};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet, VecDeque};

/// Every task the selected one transitively depends on through `blocks`
/// links.
///
/// Breadth-first from the selection, dependent to prerequisite, until
/// the closure is complete; the visited set is the only bound, so
/// cycles are tolerated and arbitrarily long chains resolve in full.
/// The selected id itself shows up only when a cycle genuinely leads
/// back to it. An id absent from the snapshot yields an empty set. Soft
/// link types (`related` and friends) are never followed.
#[must_use]
pub fn transitive_deps(tasks: &[Task], selected: &TaskId) -> HashSet<TaskId> {
    let (graph, index_of) = dependency_graph(tasks);
    let Some(&start) = index_of.get(selected) else {
        return HashSet::new();
    };

    let mut deps = HashSet::new();
    let mut expanded = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        for edge in graph.edges(node) {
            if *edge.weight() != DependencyType::Blocks {
                continue;
            }
            let prereq = edge.target();
            deps.insert(graph[prereq].clone());
            if expanded.insert(prereq) {
                queue.push_back(prereq);
            }
        }
    }
    deps
}

/// The prerequisites that still hold the selected task up: the
/// transitive set restricted to tasks whose status is not closed.
#[must_use]
pub fn blocking_deps(tasks: &[Task], selected: &TaskId) -> HashSet<TaskId> {
    let mut status_of: HashMap<&TaskId, TaskStatus> = HashMap::with_capacity(tasks.len());
    for task in tasks {
        status_of.entry(&task.id).or_insert(task.status);
    }

    transitive_deps(tasks, selected)
        .into_iter()
        .filter(|id| {
            status_of
                .get(id)
                .is_some_and(|status| *status != TaskStatus::Closed)
        })
        .collect()
}

/// Snapshot as a directed graph: an edge runs from each task to each of
/// its dependencies, weighted by the link type. Dangling references are
/// skipped.
fn dependency_graph(tasks: &[Task]) -> (DiGraph<TaskId, DependencyType>, HashMap<TaskId, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut index_of: HashMap<TaskId, NodeIndex> = HashMap::with_capacity(tasks.len());

    for task in tasks {
        if !index_of.contains_key(&task.id) {
            index_of.insert(task.id.clone(), graph.add_node(task.id.clone()));
        }
    }
    for task in tasks {
        let Some(&from) = index_of.get(&task.id) else {
            continue;
        };
        for dep in &task.dependencies {
            if let Some(&to) = index_of.get(&dep.depends_on_id) {
                graph.add_edge(from, to, dep.dep_type);
            }
        }
    }
    (graph, index_of)
}
