//! Core type definitions for network processing
//!
//! This module contains the fundamental types used throughout netlayout:
//! node identifiers, connections between nodes, and the per-node level and
//! position records produced by the layout.

use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::NetworkError;

/// Separator used by the textual `"a-b"` form of a connection
pub const CONNECTION_SEPARATOR: char = '-';

/// Opaque node identifier, compared by value
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An undirected connection (a "neck") between two nodes
///
/// The endpoints keep the orientation they were written in, so a connection
/// displays exactly as it was parsed. Equality and hashing ignore the
/// orientation: `2-3` and `3-2` are the same connection.
#[derive(Debug, Clone)]
pub struct Connection {
    a: NodeId,
    b: NodeId,
}

impl Connection {
    /// Create a connection between two nodes
    pub fn new(a: impl Into<NodeId>, b: impl Into<NodeId>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// First endpoint, as written
    pub fn a(&self) -> &NodeId {
        &self.a
    }

    /// Second endpoint, as written
    pub fn b(&self) -> &NodeId {
        &self.b
    }

    /// Both endpoints in written order
    pub fn endpoints(&self) -> [&NodeId; 2] {
        [&self.a, &self.b]
    }

    /// Endpoints in sorted order
    pub fn canonical(&self) -> (&NodeId, &NodeId) {
        if self.a <= self.b {
            (&self.a, &self.b)
        } else {
            (&self.b, &self.a)
        }
    }

    /// Returns true if `node` is either endpoint
    pub fn contains(&self, node: &str) -> bool {
        self.a == node || self.b == node
    }

    /// The endpoint opposite to `node`, or `None` if `node` is not an endpoint
    ///
    /// A self loop returns the node itself.
    pub fn other(&self, node: &str) -> Option<&NodeId> {
        if self.a == node {
            Some(&self.b)
        } else if self.b == node {
            Some(&self.a)
        } else {
            None
        }
    }

    /// Returns true if both endpoints are the same node
    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Connection {}

impl Hash for Connection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.a, CONNECTION_SEPARATOR, self.b)
    }
}

impl FromStr for Connection {
    type Err = NetworkError;

    /// Parse the `"a-b"` form; anything other than two non-empty tokens is malformed
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(CONNECTION_SEPARATOR).collect();
        match parts.as_slice() {
            [a, b] if !a.is_empty() && !b.is_empty() => Ok(Self::new(*a, *b)),
            _ => Err(NetworkError::malformed_edge(s)),
        }
    }
}

impl Serialize for Connection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a list of `"a-b"` strings, aborting on the first malformed entry
pub fn parse_connections<S: AsRef<str>>(edges: &[S]) -> Result<Vec<Connection>, NetworkError> {
    edges.iter().map(|edge| edge.as_ref().parse()).collect()
}

/// Depth and breadth of a node in the layered layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Level {
    /// Distance in connections from the start node
    pub depth: usize,
    /// Position within the depth, in discovery order
    pub breadth: usize,
}

impl Level {
    pub fn new(depth: usize, breadth: usize) -> Self {
        Self { depth, breadth }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.depth, self.breadth)
    }
}

/// Final 2D coordinate of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_parse_and_display() {
        let connection: Connection = "10-11".parse().unwrap();
        assert_eq!(connection.a(), &NodeId::from("10"));
        assert_eq!(connection.b(), &NodeId::from("11"));
        assert_eq!(connection.to_string(), "10-11");
    }

    #[test]
    fn test_connection_parse_rejects_malformed() {
        for bad in ["10", "10-11-12", "-11", "10-", ""] {
            let result: Result<Connection, _> = bad.parse();
            assert!(
                matches!(result, Err(NetworkError::MalformedEdge { .. })),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_connection_equality_ignores_orientation() {
        assert_eq!(Connection::new("2", "3"), Connection::new("3", "2"));
        assert_ne!(Connection::new("2", "3"), Connection::new("2", "4"));
    }

    #[test]
    fn test_connection_other_endpoint() {
        let connection = Connection::new("0", "2");
        assert_eq!(connection.other("0"), Some(&NodeId::from("2")));
        assert_eq!(connection.other("2"), Some(&NodeId::from("0")));
        assert_eq!(connection.other("5"), None);

        let self_loop = Connection::new("4", "4");
        assert!(self_loop.is_self_loop());
        assert_eq!(self_loop.other("4"), Some(&NodeId::from("4")));
    }

    #[test]
    fn test_parse_connections_aborts_on_first_bad_entry() {
        let result = parse_connections(&["0-2", "2", "3-1"]);
        match result {
            Err(NetworkError::MalformedEdge { edge }) => assert_eq!(edge, "2"),
            other => panic!("Expected MalformedEdge, got {:?}", other),
        }
    }

    #[test]
    fn test_level_and_position_display() {
        assert_eq!(Level::new(2, 1).to_string(), "(2, 1)");
        assert_eq!(Position::new(4.0, 17.0).to_string(), "(4, 17)");
    }
}
