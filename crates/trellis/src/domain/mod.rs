//! Domain types for task snapshots.
//!
//! A snapshot is a flat list of [`Task`] records as exported by
//! JSONL-based trackers: every record carries its own identity, display
//! fields, and a list of typed dependency links on other task ids. These
//! types mirror that wire format exactly; all graph-specific structure is
//! derived later by the [`crate::graph`] pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a task
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    /// Create a new task ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single task record from a snapshot.
///
/// Only `id` and `title` are required on the wire; every other field has
/// a serde default so sparsely-populated exports still deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Task type
    #[serde(default)]
    pub issue_type: IssueType,

    /// Priority level (0 = highest)
    #[serde(default)]
    pub priority: i64,

    /// Assignee (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Task description (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Dependencies on other tasks
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Task {
    /// Create a task with the given id and title; everything else takes
    /// its default value.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: TaskStatus::default(),
            issue_type: IssueType::default(),
            priority: 0,
            assignee: None,
            description: None,
            created_at: None,
            updated_at: None,
            dependencies: Vec::new(),
        }
    }
}

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Open and ready to work on
    #[default]
    Open,

    /// Currently being worked on
    #[serde(rename = "in_progress")]
    InProgress,

    /// Blocked by dependencies
    Blocked,

    /// Completed
    Closed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Blocked => write!(f, "blocked"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Type of task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueType {
    /// Bug fix
    Bug,

    /// New feature
    Feature,

    /// General task
    #[default]
    Task,

    /// Epic (parent issue)
    Epic,

    /// Maintenance/chore
    Chore,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bug => write!(f, "bug"),
            Self::Feature => write!(f, "feature"),
            Self::Task => write!(f, "task"),
            Self::Epic => write!(f, "epic"),
            Self::Chore => write!(f, "chore"),
        }
    }
}

/// Dependency between tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// ID of the task this depends on
    pub depends_on_id: TaskId,

    /// Type of dependency
    pub dep_type: DependencyType,
}

impl Dependency {
    /// Create a dependency link
    pub fn new(depends_on_id: impl Into<TaskId>, dep_type: DependencyType) -> Self {
        Self {
            depends_on_id: depends_on_id.into(),
            dep_type,
        }
    }
}

/// Type of dependency relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyType {
    /// Hard blocker - prevents work
    Blocks,

    /// Soft link - informational
    Related,

    /// Hierarchical - epic to task
    ParentChild,

    /// Found during work
    DiscoveredFrom,
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocks => write!(f, "blocks"),
            Self::Related => write!(f, "related"),
            Self::ParentChild => write!(f, "parent-child"),
            Self::DiscoveredFrom => write!(f, "discovered-from"),
        }
    }
}

/// Filter for narrowing a snapshot before graph construction
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Keep only tasks with one of these statuses (None keeps all)
    pub statuses: Option<Vec<TaskStatus>>,

    /// Case-insensitive substring match on id, title, or assignee
    pub query: Option<String>,
}

impl TaskFilter {
    /// Whether a task passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&task.status) {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let q = query.trim().to_lowercase();
            if !q.is_empty() {
                let assignee = task.assignee.as_deref().unwrap_or("");
                let hit = task.id.as_str().to_lowercase().contains(&q)
                    || task.title.to_lowercase().contains(&q)
                    || assignee.to_lowercase().contains(&q);
                if !hit {
                    return false;
                }
            }
        }
        true
    }

    /// Apply the filter to a slice of tasks, preserving order.
    #[must_use]
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}
