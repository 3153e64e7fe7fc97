//! Graph pipeline configuration.
//!
//! [`GraphOptions`] is the single knob surface for [`crate::graph::compute_graph`]:
//! flow orientation, edge-type visibility, isolate grouping, and layout
//! geometry. Options can be loaded from a YAML file and overridden field
//! by field, which is how the CLI layers its flags on top.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default layout cell width in pixels.
pub const DEFAULT_NODE_WIDTH: f64 = 240.0;

/// Default layout cell height in pixels.
pub const DEFAULT_NODE_HEIGHT: f64 = 72.0;

/// Default gap between siblings on the cross axis.
pub const DEFAULT_NODE_SEPARATION: f64 = 50.0;

/// Default gap between ranks on the primary axis.
pub const DEFAULT_RANK_SEPARATION: f64 = 110.0;

/// Flow direction of the laid-out graph.
///
/// Prerequisites come first along the flow axis: under `TB` a blocker
/// sits above the task it blocks, under `LR` it sits to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Top to bottom
    #[default]
    #[serde(rename = "TB")]
    TopBottom,

    /// Bottom to top
    #[serde(rename = "BT")]
    BottomTop,

    /// Left to right
    #[serde(rename = "LR")]
    LeftRight,

    /// Right to left
    #[serde(rename = "RL")]
    RightLeft,
}

impl Orientation {
    /// Whether flow runs along the vertical axis.
    #[must_use]
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TopBottom | Self::BottomTop)
    }

    /// Whether flow runs against the natural axis direction.
    #[must_use]
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BottomTop | Self::RightLeft)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopBottom => write!(f, "TB"),
            Self::BottomTop => write!(f, "BT"),
            Self::LeftRight => write!(f, "LR"),
            Self::RightLeft => write!(f, "RL"),
        }
    }
}

/// Options controlling graph construction and layout.
///
/// All fields have defaults, so a YAML options file only needs to name
/// the fields it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Flow direction
    pub orientation: Orientation,

    /// Include `related` edges
    pub show_related: bool,

    /// Include `parent-child` edges
    pub show_parent_child: bool,

    /// Include `discovered-from` edges
    pub show_discovered_from: bool,

    /// Swap rendered edge direction (dependent points at prerequisite)
    pub invert_direction: bool,

    /// Let `related` edges nudge ordering and otherwise-unranked nodes
    pub allow_related_nudge: bool,

    /// Collapse edge-less nodes into a single bucket node
    pub group_isolates: bool,

    /// Layout cell width
    pub node_width: f64,

    /// Layout cell height
    pub node_height: f64,

    /// Gap between siblings on the cross axis
    pub node_separation: f64,

    /// Gap between ranks on the primary axis
    pub rank_separation: f64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::TopBottom,
            show_related: true,
            show_parent_child: true,
            show_discovered_from: false,
            invert_direction: false,
            allow_related_nudge: true,
            group_isolates: true,
            node_width: DEFAULT_NODE_WIDTH,
            node_height: DEFAULT_NODE_HEIGHT,
            node_separation: DEFAULT_NODE_SEPARATION,
            rank_separation: DEFAULT_RANK_SEPARATION,
        }
    }
}

impl GraphOptions {
    /// Load options from a YAML file.
    ///
    /// Missing fields fall back to their defaults; the loaded options are
    /// validated before being returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML for
    /// this shape, or fails [`validate`](Self::validate).
    pub async fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let options: Self =
            serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check that the geometry fields are usable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any size or separation is not a
    /// finite positive number (separations may be zero).
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("node_separation", self.node_separation),
            ("rank_separation", self.rank_separation),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = GraphOptions::default();
        assert_eq!(options.orientation, Orientation::TopBottom);
        assert!(options.show_related);
        assert!(options.show_parent_child);
        assert!(!options.show_discovered_from);
        assert!(!options.invert_direction);
        assert!(options.allow_related_nudge);
        assert!(options.group_isolates);
        assert_eq!(options.node_width, 240.0);
        assert_eq!(options.node_height, 72.0);
        assert_eq!(options.node_separation, 50.0);
        assert_eq!(options.rank_separation, 110.0);
    }

    #[test]
    fn orientation_serde_uses_short_names() {
        assert_eq!(
            serde_json::to_string(&Orientation::LeftRight).unwrap(),
            "\"LR\""
        );
        assert_eq!(
            serde_json::from_str::<Orientation>("\"BT\"").unwrap(),
            Orientation::BottomTop
        );
    }

    #[test]
    fn orientation_axis_helpers() {
        assert!(Orientation::TopBottom.is_vertical());
        assert!(Orientation::BottomTop.is_vertical());
        assert!(!Orientation::LeftRight.is_vertical());
        assert!(Orientation::BottomTop.is_reversed());
        assert!(Orientation::RightLeft.is_reversed());
        assert!(!Orientation::TopBottom.is_reversed());
    }

    #[test]
    fn partial_yaml_uses_defaults_for_the_rest() {
        let options: GraphOptions =
            serde_yaml::from_str("orientation: LR\nshow_related: false\n").unwrap();
        assert_eq!(options.orientation, Orientation::LeftRight);
        assert!(!options.show_related);
        assert!(options.group_isolates);
        assert_eq!(options.node_width, DEFAULT_NODE_WIDTH);
    }

    #[test]
    fn validate_rejects_bad_geometry() {
        let options = GraphOptions {
            node_width: 0.0,
            ..GraphOptions::default()
        };
        assert!(options.validate().is_err());

        let options = GraphOptions {
            node_height: f64::NAN,
            ..GraphOptions::default()
        };
        assert!(options.validate().is_err());

        let options = GraphOptions {
            rank_separation: -1.0,
            ..GraphOptions::default()
        };
        assert!(options.validate().is_err());

        let options = GraphOptions {
            node_separation: 0.0,
            ..GraphOptions::default()
        };
        assert!(options.validate().is_ok());
    }
}
