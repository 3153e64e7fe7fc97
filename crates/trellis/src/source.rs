//! Snapshot acquisition.
//!
//! The pipeline itself is synchronous; fetching the task list is the
//! one asynchronous boundary. A source hands back a [`Snapshot`]: the
//! usable tasks plus every non-fatal problem met while loading them.
//! Loading never fails over content. Only I/O level trouble is an
//! error.

use crate::domain::{Task, TaskId};
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use trellis_jsonl::read_jsonl_resilient;

/// Non-fatal problem found while loading a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotWarning {
    /// A line that did not parse into a task, or a record without
    /// usable identity fields. The record is skipped.
    MalformedRecord {
        /// What went wrong, with the line or record position.
        detail: String,
    },
    /// A later record reused an id; the first occurrence wins.
    DuplicateId {
        /// The contested id.
        id: TaskId,
    },
    /// A dependency points at an id absent from the snapshot. The task
    /// is kept; the graph builder drops the edge.
    DanglingDependency {
        /// The task holding the reference.
        task_id: TaskId,
        /// The id that does not exist.
        depends_on: TaskId,
    },
}

impl fmt::Display for SnapshotWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord { detail } => write!(f, "malformed record: {detail}"),
            Self::DuplicateId { id } => {
                write!(f, "duplicate task id {id}, keeping the first occurrence")
            }
            Self::DanglingDependency {
                task_id,
                depends_on,
            } => write!(f, "task {task_id} depends on unknown task {depends_on}"),
        }
    }
}

/// A loaded task list plus the warnings produced while loading it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Sanitized tasks, in file order.
    pub tasks: Vec<Task>,
    /// Everything non-fatal that went wrong.
    pub warnings: Vec<SnapshotWarning>,
}

/// Where task snapshots come from.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Load the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O level failures; content problems
    /// become [`SnapshotWarning`]s on the returned snapshot.
    async fn fetch(&self) -> Result<Snapshot>;
}

/// Snapshot read from a JSONL file, one task per line.
///
/// Malformed lines are skipped with a warning, duplicate ids keep their
/// first record, and dangling dependencies are reported. Every warning
/// is also logged.
#[derive(Debug, Clone)]
pub struct JsonlFileSource {
    path: PathBuf,
}

impl JsonlFileSource {
    /// Create a source reading from the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for JsonlFileSource {
    async fn fetch(&self) -> Result<Snapshot> {
        let (raw, parse_warnings) = read_jsonl_resilient::<Task, _>(&self.path).await?;

        let mut warnings: Vec<SnapshotWarning> = parse_warnings
            .into_iter()
            .map(|w| SnapshotWarning::MalformedRecord {
                detail: w.to_string(),
            })
            .collect();
        let tasks = sanitize_tasks(raw, &mut warnings);

        for warning in &warnings {
            tracing::warn!(%warning, path = %self.path.display(), "snapshot warning");
        }
        tracing::debug!(
            tasks = tasks.len(),
            warnings = warnings.len(),
            path = %self.path.display(),
            "snapshot loaded"
        );
        Ok(Snapshot { tasks, warnings })
    }
}

/// Fixed in-memory snapshot for library consumers and tests.
///
/// The tasks are trusted and pass through unsanitized.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    tasks: Vec<Task>,
}

impl StaticSource {
    /// Wrap an in-memory task list.
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

#[async_trait]
impl SnapshotSource for StaticSource {
    async fn fetch(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            tasks: self.tasks.clone(),
            warnings: Vec::new(),
        })
    }
}

/// Drop records without identity, collapse duplicate ids keeping the
/// first, and report dangling dependency references.
fn sanitize_tasks(raw: Vec<Task>, warnings: &mut Vec<SnapshotWarning>) -> Vec<Task> {
    let mut seen: HashSet<TaskId> = HashSet::with_capacity(raw.len());
    let mut tasks = Vec::with_capacity(raw.len());

    for (index, task) in raw.into_iter().enumerate() {
        if task.id.as_str().trim().is_empty() || task.title.trim().is_empty() {
            warnings.push(SnapshotWarning::MalformedRecord {
                detail: format!("record {index}: empty id or title"),
            });
            continue;
        }
        if !seen.insert(task.id.clone()) {
            warnings.push(SnapshotWarning::DuplicateId { id: task.id });
            continue;
        }
        tasks.push(task);
    }

    let known: HashSet<&TaskId> = tasks.iter().map(|t| &t.id).collect();
    let mut dangling = Vec::new();
    for task in &tasks {
        for dep in &task.dependencies {
            if !known.contains(&dep.depends_on_id) {
                dangling.push(SnapshotWarning::DanglingDependency {
                    task_id: task.id.clone(),
                    depends_on: dep.depends_on_id.clone(),
                });
            }
        }
    }
    warnings.extend(dangling);
    tasks
}
