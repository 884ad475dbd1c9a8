//! Parsed resistor network storage
//!
//! A netlist is the ordered list of connections read from a circuit
//! description, together with the designator and source line of each one.

use super::{Connection, NodeId};

/// A single resistor entry of a netlist
#[derive(Debug, Clone, PartialEq)]
pub struct Resistor {
    /// Designator token as written, e.g. `R12`
    pub designator: String,
    /// The two nodes the resistor sits between
    pub connection: Connection,
    /// 1-based line number in the source text
    pub line: usize,
}

/// Ordered collection of resistors
///
/// Maintains insertion order; the order matters to the graph mapper because
/// it decides which connections are scanned first.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    resistors: Vec<Resistor>,
}

impl Netlist {
    /// Create a new empty netlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a netlist straight from connections, numbering them as lines
    pub fn from_connections(connections: impl IntoIterator<Item = Connection>) -> Self {
        let resistors = connections
            .into_iter()
            .enumerate()
            .map(|(idx, connection)| Resistor {
                designator: format!("R{}", idx + 1),
                connection,
                line: idx + 1,
            })
            .collect();
        Self { resistors }
    }

    pub fn add_resistor(&mut self, resistor: Resistor) {
        self.resistors.push(resistor);
    }

    pub fn resistors(&self) -> &[Resistor] {
        &self.resistors
    }

    /// Connections in netlist order
    pub fn connections(&self) -> Vec<Connection> {
        self.resistors.iter().map(|r| r.connection.clone()).collect()
    }

    /// Distinct nodes in order of first appearance
    pub fn nodes(&self) -> Vec<&NodeId> {
        let mut seen: Vec<&NodeId> = Vec::new();
        for resistor in &self.resistors {
            for node in resistor.connection.endpoints() {
                if !seen.contains(&node) {
                    seen.push(node);
                }
            }
        }
        seen
    }

    /// Returns true if any resistor touches `node`
    pub fn has_node(&self, node: &str) -> bool {
        self.resistors.iter().any(|r| r.connection.contains(node))
    }

    pub fn len(&self) -> usize {
        self.resistors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resistors.is_empty()
    }

    pub fn clear(&mut self) {
        self.resistors.clear();
    }
}
