//! Visual attribute tables.
//!
//! Edge strokes are a pure function of the dependency type; node colors
//! are a pure function of status. Renderers are free to ignore these and
//! dispatch on the plain `status`/`issue_type` data instead.

use crate::domain::{DependencyType, TaskStatus};
use crate::graph::model::EdgeStyle;
use serde::Serialize;

/// Stroke style for each dependency type.
///
/// `blocks` is the only hard link and reads heaviest: solid, dark, and
/// arrowed. The soft link types are dashed and lighter, and `related`
/// drops the arrowhead entirely since it carries no direction of work.
#[must_use]
pub fn edge_style(dep_type: DependencyType) -> EdgeStyle {
    match dep_type {
        DependencyType::Blocks => EdgeStyle {
            color: "#0f172a",
            dash: None,
            width: 2.0,
            arrowhead: true,
        },
        DependencyType::Related => EdgeStyle {
            color: "#64748b",
            dash: Some("2 6"),
            width: 1.0,
            arrowhead: false,
        },
        DependencyType::ParentChild => EdgeStyle {
            color: "#8b5cf6",
            dash: Some("6 6"),
            width: 1.5,
            arrowhead: true,
        },
        DependencyType::DiscoveredFrom => EdgeStyle {
            color: "#0ea5e9",
            dash: Some("3 6"),
            width: 1.0,
            arrowhead: true,
        },
    }
}

/// Background, border, and text colors for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPalette {
    /// Fill color
    pub background: &'static str,
    /// Border color
    pub border: &'static str,
    /// Text color
    pub foreground: &'static str,
}

/// Node color triple for each task status.
///
/// Warm orange for open work, blue for in progress, red for blocked,
/// green for closed.
#[must_use]
pub fn status_palette(status: TaskStatus) -> StatusPalette {
    match status {
        TaskStatus::Open => StatusPalette {
            background: "#FFF7ED",
            border: "#F97316",
            foreground: "#7C2D12",
        },
        TaskStatus::InProgress => StatusPalette {
            background: "#EFF6FF",
            border: "#3B82F6",
            foreground: "#1E3A8A",
        },
        TaskStatus::Blocked => StatusPalette {
            background: "#FEF2F2",
            border: "#EF4444",
            foreground: "#7F1D1D",
        },
        TaskStatus::Closed => StatusPalette {
            background: "#F0FDF4",
            border: "#22C55E",
            foreground: "#064E3B",
        },
    }
}
