//! Layered layout of a mapped network
//!
//! Two passes: the first walks the adjacency map level by level, giving every
//! node a depth and a breadth index within that depth; the second translates
//! those into 2D coordinates with each level centered on a shared vertical
//! axis. The end node always sits alone on the deepest level.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, span, trace, warn, Level as TraceLevel};

use super::AdjacencyMap;
use crate::core::{Level, LayoutConfig, NetworkError, NetworkResult, NodeId, Position};

/// Horizontal offset added to the center axis
pub const X_OFFSET: f64 = 4.0;
/// Vertical offset of the deepest level
pub const Y_OFFSET: f64 = 2.0;

/// Depth and breadth of every node, before translation to coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelAssignment {
    /// Node → level, in placement order; the end node comes last
    pub levels: IndexMap<NodeId, Level>,
    /// Number of nodes at each depth, indexed by depth
    pub width_by_depth: Vec<usize>,
    /// Number of levels including the end node's
    pub height: usize,
    /// Largest number of nodes on any level
    pub width: usize,
}

/// Layout output containing levels and final positions
#[derive(Debug, Clone, Serialize)]
pub struct NetworkLayout {
    pub levels: IndexMap<NodeId, Level>,
    pub width_by_depth: Vec<usize>,
    pub height: usize,
    pub width: usize,
    /// Shared vertical axis every level is centered on
    pub x_center: f64,
    pub positions: IndexMap<NodeId, Position>,
}

impl NetworkLayout {
    pub fn level(&self, node: &str) -> Option<Level> {
        self.levels.get(node).copied()
    }

    pub fn position(&self, node: &str) -> Option<Position> {
        self.positions.get(node).copied()
    }

    /// Nodes at `depth` in breadth order
    pub fn nodes_at_depth(&self, depth: usize) -> Vec<&NodeId> {
        let mut nodes: Vec<(&NodeId, usize)> = self
            .levels
            .iter()
            .filter(|(_, level)| level.depth == depth)
            .map(|(node, level)| (node, level.breadth))
            .collect();
        nodes.sort_by_key(|(_, breadth)| *breadth);
        nodes.into_iter().map(|(node, _)| node).collect()
    }
}

/// Layered layout engine
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Run both passes over an adjacency map
    pub fn layout(&self, adjacency: &AdjacencyMap) -> NetworkResult<NetworkLayout> {
        let layout_span = span!(
            TraceLevel::INFO,
            "layout_network",
            node_count = adjacency.len(),
            axis_sep = self.config.axis_sep
        );
        let _enter = layout_span.enter();

        self.config.validate()?;
        let assignment = self.assign_levels(adjacency)?;
        let (x_center, positions) = self.translate(&assignment)?;

        info!(
            height = assignment.height,
            width = assignment.width,
            "Layout completed"
        );

        Ok(NetworkLayout {
            levels: assignment.levels,
            width_by_depth: assignment.width_by_depth,
            height: assignment.height,
            width: assignment.width,
            x_center,
            positions,
        })
    }

    /// First pass: depth and breadth for every node
    ///
    /// Buds of one round are expanded in order; their children, minus the end
    /// node, form the next round. A child seen earlier in the round, or
    /// already placed, is not added again, so every node gets exactly one
    /// level even when the network has cycles.
    pub fn assign_levels(&self, adjacency: &AdjacencyMap) -> NetworkResult<LevelAssignment> {
        let start = &self.config.start;
        let end = &self.config.end;

        if start == end {
            return Err(NetworkError::InvalidEndpoints {
                node: start.to_string(),
            });
        }
        let (start_key, _) = adjacency
            .get_key_value(start)
            .ok_or_else(|| NetworkError::missing_key(start.as_str()))?;

        let end_reached = adjacency.values().any(|entries| entries.contains(end));
        if !end_reached {
            if self.config.require_end_reachable {
                return Err(NetworkError::UnreachableEndNode {
                    node: end.to_string(),
                });
            }
            warn!(end = %end, "End node is never reached, placing it below the deepest level");
        }

        let mut levels: IndexMap<NodeId, Level> = IndexMap::with_capacity(adjacency.len() + 1);
        let mut width_by_depth: Vec<usize> = Vec::new();
        let mut remaining: HashSet<&NodeId> = adjacency.keys().collect();
        let mut buds: Vec<&NodeId> = vec![start_key];
        let mut depth = 0;

        while !remaining.is_empty() {
            if buds.is_empty() {
                return Err(NetworkError::Disconnected {
                    remaining: remaining.len(),
                });
            }

            let mut next_buds: Vec<&NodeId> = Vec::new();
            for (breadth, bud) in buds.iter().enumerate() {
                levels.insert((*bud).clone(), Level::new(depth, breadth));

                let children = adjacency
                    .get(*bud)
                    .ok_or_else(|| NetworkError::missing_key(bud.as_str()))?;
                for child in children.iter().filter(|child| *child != end) {
                    if !next_buds.contains(&child)
                        && !buds.contains(&child)
                        && !levels.contains_key(child)
                    {
                        next_buds.push(child);
                    }
                }

                remaining.remove(bud);
            }

            trace!(depth, buds = buds.len(), "Placed level");
            width_by_depth.push(buds.len());
            buds = next_buds;
            depth += 1;
        }

        levels.insert(end.clone(), Level::new(depth, 0));
        width_by_depth.push(1);

        let width = width_by_depth.iter().copied().max().unwrap_or(1);
        let height = depth + 1;

        debug!(height, width, "Assigned levels");
        Ok(LevelAssignment {
            levels,
            width_by_depth,
            height,
            width,
        })
    }

    /// Second pass: translate levels into coordinates
    ///
    /// Returns the center axis and the position of every node. The deepest
    /// level sits at `y = 2`; each level's nodes are spread `axis_sep` apart
    /// around the center axis.
    pub fn translate(
        &self,
        assignment: &LevelAssignment,
    ) -> NetworkResult<(f64, IndexMap<NodeId, Position>)> {
        let sep = self.config.axis_sep;
        let width = assignment.width as f64;
        let x_center = (width * sep - width / 2.0).ceil() + X_OFFSET;
        let top = assignment.height.saturating_sub(1);

        let mut positions = IndexMap::with_capacity(assignment.levels.len());
        for (node, level) in &assignment.levels {
            let level_width = *assignment
                .width_by_depth
                .get(level.depth)
                .ok_or_else(|| NetworkError::missing_key(node.as_str()))?
                as f64;

            let y = top.saturating_sub(level.depth) as f64 * sep + Y_OFFSET;
            let x = x_center - ((level_width / 2.0).ceil() - level.breadth as f64) * sep;
            positions.insert(node.clone(), Position::new(x, y));
        }

        Ok((x_center, positions))
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute levels and positions for an adjacency map
///
/// # Example
/// ```
/// use netlayout::core::{parse_connections, LayoutConfig};
/// use netlayout::network::{map_from_start, node_positions};
///
/// let config = LayoutConfig::default();
/// let connections = parse_connections(&["0-2", "2-3", "3-1"]).unwrap();
/// let map = map_from_start(&config.start, &connections, &config.end).unwrap();
/// let layout = node_positions(map.adjacency(), &config).unwrap();
/// assert_eq!(layout.height, 4);
/// assert_eq!(layout.level("1").unwrap().depth, 3);
/// ```
pub fn node_positions(
    adjacency: &AdjacencyMap,
    config: &LayoutConfig,
) -> NetworkResult<NetworkLayout> {
    LayoutEngine::with_config(config.clone()).layout(adjacency)
}
