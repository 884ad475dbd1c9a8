//! Drawable view of a laid out network
//!
//! A [`Plot`] is what every renderer consumes: node positions plus the
//! connections that are safe to draw, with floating connections removed.

use indexmap::IndexMap;
use tracing::trace;

use super::{Connection, NetworkError, NetworkResult, NodeId, Position};

/// Positions and drawable connections of a network
#[derive(Debug, Clone)]
pub struct Plot<'a> {
    positions: &'a IndexMap<NodeId, Position>,
    connections: Vec<&'a Connection>,
}

impl<'a> Plot<'a> {
    /// Build a plot from every connection of the network and its floating subset
    ///
    /// One instance is dropped from `connections` per entry of `floating`, so
    /// duplicated connections that were partly consumed keep the consumed
    /// copies. Every remaining connection must have both endpoints positioned.
    pub fn new(
        positions: &'a IndexMap<NodeId, Position>,
        connections: &'a [Connection],
        floating: &[Connection],
    ) -> NetworkResult<Self> {
        let mut drawable: Vec<&'a Connection> = connections.iter().collect();
        for floating_connection in floating {
            if let Some(idx) = drawable.iter().position(|c| *c == floating_connection) {
                drawable.remove(idx);
            } else {
                return Err(NetworkError::render_error(format!(
                    "floating connection '{}' is not part of the network",
                    floating_connection
                )));
            }
        }

        for connection in &drawable {
            for node in connection.endpoints() {
                if !positions.contains_key(node) {
                    return Err(NetworkError::render_error(format!(
                        "no position for node '{}' of connection '{}'",
                        node, connection
                    )));
                }
            }
        }

        trace!(
            drawable = drawable.len(),
            floating = floating.len(),
            "Prepared plot"
        );
        Ok(Self {
            positions,
            connections: drawable,
        })
    }

    pub fn positions(&self) -> &'a IndexMap<NodeId, Position> {
        self.positions
    }

    /// Connections to draw, in network order
    pub fn connections(&self) -> &[&'a Connection] {
        &self.connections
    }

    /// Endpoint positions of a drawable connection
    pub fn segment(&self, connection: &Connection) -> Option<(Position, Position)> {
        let from = self.positions.get(connection.a())?;
        let to = self.positions.get(connection.b())?;
        Some((*from, *to))
    }

    /// Bounding box of all node positions as `(min, max)`
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let mut iter = self.positions.values();
        let first = *iter.next()?;
        Some(iter.fold((first, first), |(min, max), p| {
            (
                Position::new(min.x.min(p.x), min.y.min(p.y)),
                Position::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }
}
