//! CLI value enums and domain type conversions.
//!
//! Value enums give clap a closed set of spellings; the `From` impls
//! map them onto the domain types the pipeline understands.

use clap::ValueEnum;

use crate::config::Orientation;
use crate::domain::TaskStatus;

// ============================================================================
// Value Enums
// ============================================================================

/// Flow orientation for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationArg {
    /// Top to bottom (prerequisites above)
    #[default]
    Tb,
    /// Bottom to top
    Bt,
    /// Left to right (prerequisites on the left)
    Lr,
    /// Right to left
    Rl,
}

impl std::fmt::Display for OrientationArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tb => write!(f, "tb"),
            Self::Bt => write!(f, "bt"),
            Self::Lr => write!(f, "lr"),
            Self::Rl => write!(f, "rl"),
        }
    }
}

/// Task status for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatusArg {
    /// Open and ready to work on
    Open,
    /// Currently being worked on
    #[value(name = "in_progress", alias = "in-progress")]
    InProgress,
    /// Blocked by dependencies
    Blocked,
    /// Completed
    Closed,
}

impl std::fmt::Display for TaskStatusArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Blocked => write!(f, "blocked"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

// ============================================================================
// Domain Type Conversions
// ============================================================================

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Tb => Orientation::TopBottom,
            OrientationArg::Bt => Orientation::BottomTop,
            OrientationArg::Lr => Orientation::LeftRight,
            OrientationArg::Rl => Orientation::RightLeft,
        }
    }
}

impl From<Orientation> for OrientationArg {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::TopBottom => OrientationArg::Tb,
            Orientation::BottomTop => OrientationArg::Bt,
            Orientation::LeftRight => OrientationArg::Lr,
            Orientation::RightLeft => OrientationArg::Rl,
        }
    }
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(arg: TaskStatusArg) -> Self {
        match arg {
            TaskStatusArg::Open => TaskStatus::Open,
            TaskStatusArg::InProgress => TaskStatus::InProgress,
            TaskStatusArg::Blocked => TaskStatus::Blocked,
            TaskStatusArg::Closed => TaskStatus::Closed,
        }
    }
}

impl From<TaskStatus> for TaskStatusArg {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Open => TaskStatusArg::Open,
            TaskStatus::InProgress => TaskStatusArg::InProgress,
            TaskStatus::Blocked => TaskStatusArg::Blocked,
            TaskStatus::Closed => TaskStatusArg::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_conversion() {
        assert_eq!(Orientation::from(OrientationArg::Tb), Orientation::TopBottom);
        assert_eq!(Orientation::from(OrientationArg::Bt), Orientation::BottomTop);
        assert_eq!(Orientation::from(OrientationArg::Lr), Orientation::LeftRight);
        assert_eq!(Orientation::from(OrientationArg::Rl), Orientation::RightLeft);

        // Reverse conversion
        assert_eq!(OrientationArg::from(Orientation::TopBottom), OrientationArg::Tb);
        assert_eq!(OrientationArg::from(Orientation::RightLeft), OrientationArg::Rl);
    }

    #[test]
    fn test_status_conversion() {
        assert_eq!(TaskStatus::from(TaskStatusArg::Open), TaskStatus::Open);
        assert_eq!(
            TaskStatus::from(TaskStatusArg::InProgress),
            TaskStatus::InProgress
        );
        assert_eq!(TaskStatus::from(TaskStatusArg::Blocked), TaskStatus::Blocked);
        assert_eq!(TaskStatus::from(TaskStatusArg::Closed), TaskStatus::Closed);

        // Reverse conversion
        assert_eq!(TaskStatusArg::from(TaskStatus::Open), TaskStatusArg::Open);
    }

    #[test]
    fn test_display_implementations() {
        assert_eq!(format!("{}", OrientationArg::Lr), "lr");
        assert_eq!(format!("{}", TaskStatusArg::InProgress), "in_progress");
    }
}
