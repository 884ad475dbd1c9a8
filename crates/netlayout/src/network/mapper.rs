//! Breadth-first mapping of a network from its start node
//!
//! Walks the connection list outward from the start node, recording for each
//! visited node the neighbours discovered while it was expanded. Connections
//! never reached by the walk are reported as floating.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, span, trace, Level};

use crate::core::{Connection, LayoutConfig, Netlist, NetworkError, NetworkResult, NodeId};

/// Node → neighbours recorded while that node was expanded, in discovery order
pub type AdjacencyMap = IndexMap<NodeId, Vec<NodeId>>;

/// One connection moved out of the unconsumed pool during the walk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consumption {
    /// Node being expanded when the connection was consumed
    pub key: NodeId,
    /// The opposite endpoint
    pub entry: NodeId,
    pub connection: Connection,
}

/// Result of mapping a network from its start node
#[derive(Debug, Clone)]
pub struct NetworkMap {
    start: NodeId,
    end: NodeId,
    adjacency: AdjacencyMap,
    floating: Vec<Connection>,
    consumed: Vec<Consumption>,
}

impl NetworkMap {
    pub fn start(&self) -> &NodeId {
        &self.start
    }

    pub fn end(&self) -> &NodeId {
        &self.end
    }

    pub fn adjacency(&self) -> &AdjacencyMap {
        &self.adjacency
    }

    /// Connections the walk never consumed, in their original order
    pub fn floating(&self) -> &[Connection] {
        &self.floating
    }

    /// Consumed connections in the order they were consumed
    pub fn consumed(&self) -> &[Consumption] {
        &self.consumed
    }

    /// Returns true if some expanded node recorded the end node as a neighbour
    pub fn reaches_end(&self) -> bool {
        self.adjacency
            .values()
            .any(|entries| entries.contains(&self.end))
    }

    /// Number of connections the map accounts for, consumed plus floating
    pub fn connection_count(&self) -> usize {
        self.consumed.len() + self.floating.len()
    }

    pub fn into_parts(self) -> (AdjacencyMap, Vec<Connection>) {
        (self.adjacency, self.floating)
    }
}

/// Map `connections` breadth-first from `start`, treating `end` as a terminal
///
/// Each dequeued node snapshots every still-unconsumed connection touching it,
/// in list order, then consumes them one by one: the opposite endpoint is
/// appended to the node's adjacency list and, unless it is `end` or already
/// known, becomes a new key and joins the queue. `end` is never expanded, so
/// connections beyond it stay floating unless reached another way.
///
/// A self loop on a key (`2-2`) appends the key to its own list and keeps
/// what the list already holds; the key is neither re-queued nor reset, which
/// deliberately departs from resetting the list on every re-discovery.
///
/// # Example
/// ```
/// use netlayout::core::{parse_connections, NodeId};
/// use netlayout::network::map_from_start;
///
/// let connections = parse_connections(&["0-2", "3-4", "2-1"]).unwrap();
/// let map = map_from_start(&NodeId::from("0"), &connections, &NodeId::from("1")).unwrap();
/// assert_eq!(map.floating().len(), 1);
/// assert_eq!(map.floating()[0].to_string(), "3-4");
/// ```
pub fn map_from_start(
    start: &NodeId,
    connections: &[Connection],
    end: &NodeId,
) -> NetworkResult<NetworkMap> {
    let map_span = span!(
        Level::INFO,
        "map_from_start",
        start = %start,
        end = %end,
        connection_count = connections.len()
    );
    let _enter = map_span.enter();

    if start == end {
        return Err(NetworkError::InvalidEndpoints {
            node: start.to_string(),
        });
    }

    // Slots are emptied as connections are consumed; the index keeps each
    // node's slots in list order so snapshots match a full rescan.
    let mut unconsumed: Vec<Option<&Connection>> = connections.iter().map(Some).collect();
    let mut incidence: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, connection) in connections.iter().enumerate() {
        incidence.entry(connection.a().as_str()).or_default().push(idx);
        if !connection.is_self_loop() {
            incidence.entry(connection.b().as_str()).or_default().push(idx);
        }
    }

    let mut adjacency = AdjacencyMap::new();
    adjacency.insert(start.clone(), Vec::new());
    let mut queue = VecDeque::from([start.clone()]);
    let mut consumed = Vec::with_capacity(connections.len());

    while let Some(key) = queue.pop_front() {
        let snapshot: Vec<usize> = incidence
            .get(key.as_str())
            .map(|slots| {
                slots
                    .iter()
                    .copied()
                    .filter(|&idx| unconsumed[idx].is_some())
                    .collect()
            })
            .unwrap_or_default();
        trace!(key = %key, found = snapshot.len(), "Expanding node");

        for idx in snapshot {
            let Some(connection) = unconsumed[idx].take() else {
                continue;
            };
            let entry = connection
                .other(key.as_str())
                .ok_or_else(|| NetworkError::malformed_edge(connection.to_string()))?
                .clone();

            if entry != *end && !adjacency.contains_key(&entry) {
                trace!(entry = %entry, "Enqueuing node");
                adjacency.insert(entry.clone(), Vec::new());
                queue.push_back(entry.clone());
            }

            adjacency
                .get_mut(&key)
                .ok_or_else(|| NetworkError::missing_key(key.as_str()))?
                .push(entry.clone());
            consumed.push(Consumption {
                key: key.clone(),
                entry,
                connection: connection.clone(),
            });
        }
    }

    let floating: Vec<Connection> = unconsumed.into_iter().flatten().cloned().collect();

    debug!(
        nodes = adjacency.len(),
        consumed = consumed.len(),
        floating = floating.len(),
        "Mapped network"
    );
    info!("Mapping completed");

    Ok(NetworkMap {
        start: start.clone(),
        end: end.clone(),
        adjacency,
        floating,
        consumed,
    })
}

/// Graph mapper bound to a layout configuration
pub struct GraphMapper {
    config: LayoutConfig,
}

impl GraphMapper {
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

    /// Map a list of connections between the configured terminals
    pub fn map(&self, connections: &[Connection]) -> NetworkResult<NetworkMap> {
        map_from_start(&self.config.start, connections, &self.config.end)
    }

    /// Map every resistor of a netlist
    pub fn map_netlist(&self, netlist: &Netlist) -> NetworkResult<NetworkMap> {
        self.map(&netlist.connections())
    }
}

impl Default for GraphMapper {
    fn default() -> Self {
        Self::new()
    }
}
