//! Configuration for the layout and rendering stages

use super::{NetworkError, NetworkResult, NodeId};

/// Default start node of a network
pub const DEFAULT_START_NODE: &str = "0";
/// Default end node of a network
pub const DEFAULT_END_NODE: &str = "1";
/// Default separation between neighbouring nodes on both axes
pub const DEFAULT_AXIS_SEP: f64 = 5.0;

/// Layout configuration
///
/// Names the two terminals the network hangs between and the spacing used
/// when translating levels into coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Node placed at depth 0
    pub start: NodeId,
    /// Node placed alone on the deepest level
    pub end: NodeId,
    /// Separation between nodes on both axes
    pub axis_sep: f64,
    /// Fail instead of warning when the end node is never reached
    pub require_end_reachable: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start: NodeId::from(DEFAULT_START_NODE),
            end: NodeId::from(DEFAULT_END_NODE),
            axis_sep: DEFAULT_AXIS_SEP,
            require_end_reachable: false,
        }
    }
}

impl LayoutConfig {
    /// Create a config for the given terminals with default spacing
    pub fn new(start: impl Into<NodeId>, end: impl Into<NodeId>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            ..Default::default()
        }
    }

    pub fn with_axis_sep(mut self, axis_sep: f64) -> Self {
        self.axis_sep = axis_sep;
        self
    }

    pub fn with_require_end_reachable(mut self, require: bool) -> Self {
        self.require_end_reachable = require;
        self
    }

    /// Check that the spacing can be turned into coordinates
    ///
    /// The axis separation must be finite, greater than zero and at most
    /// [`MAX_AXIS_SEP`].
    pub fn validate(&self) -> NetworkResult<()> {
        validate_axis_sep(self.axis_sep)
    }
}

/// Largest accepted separation between neighbouring nodes
pub const MAX_AXIS_SEP: f64 = 1000.0;

/// Validate an axis separation on its own, e.g. from a command-line flag
pub fn validate_axis_sep(axis_sep: f64) -> NetworkResult<()> {
    if !axis_sep.is_finite() || axis_sep <= 0.0 {
        return Err(NetworkError::invalid_config(format!(
            "axis separation must be a finite number greater than 0, got {}",
            axis_sep
        )));
    }
    if axis_sep > MAX_AXIS_SEP {
        return Err(NetworkError::invalid_config(format!(
            "axis separation must be at most {}, got {}",
            MAX_AXIS_SEP, axis_sep
        )));
    }
    Ok(())
}

/// Rendering configuration shared by the renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Horizontal output units per layout unit
    pub scale_x: f64,
    /// Vertical output units per layout unit
    pub scale_y: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale_x: 2.0,
            scale_y: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn new(scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x, scale_y }
    }
}
