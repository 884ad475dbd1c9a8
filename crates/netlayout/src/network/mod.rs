//! Resistor network mapping, layout and rendering
//!
//! The pipeline runs in order:
//! NetlistParser → GraphMapper → LayoutEngine → Renderer

use tracing::{info, span, Level};

use crate::core::{Connection, LayoutConfig, Netlist, NetworkResult, Plot};

mod ascii;
mod grammar;
mod layout;
mod mapper;
mod parser;
mod svg;

pub use ascii::*;
pub use layout::*;
pub use mapper::*;
pub use parser::*;
pub use svg::*;

/// Mapping and layout of one network, kept together for rendering
#[derive(Debug, Clone)]
pub struct NetworkAnalysis {
    connections: Vec<Connection>,
    map: NetworkMap,
    layout: NetworkLayout,
}

impl NetworkAnalysis {
    /// Map and lay out `connections` between the configured terminals
    pub fn new(connections: Vec<Connection>, config: &LayoutConfig) -> NetworkResult<Self> {
        let analysis_span = span!(
            Level::INFO,
            "analyze_network",
            connection_count = connections.len()
        );
        let _enter = analysis_span.enter();

        let map = GraphMapper::with_config(config.clone()).map(&connections)?;
        let layout = LayoutEngine::with_config(config.clone()).layout(map.adjacency())?;

        info!(
            height = layout.height,
            width = layout.width,
            floating = map.floating().len(),
            "Tree dimensions"
        );
        Ok(Self {
            connections,
            map,
            layout,
        })
    }

    /// Map and lay out every resistor of a netlist
    pub fn from_netlist(netlist: &Netlist, config: &LayoutConfig) -> NetworkResult<Self> {
        Self::new(netlist.connections(), config)
    }

    /// All connections of the network, in input order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn map(&self) -> &NetworkMap {
        &self.map
    }

    pub fn layout(&self) -> &NetworkLayout {
        &self.layout
    }

    pub fn floating(&self) -> &[Connection] {
        self.map.floating()
    }

    /// Drawable view: positions plus every non-floating connection
    pub fn plot(&self) -> NetworkResult<Plot<'_>> {
        Plot::new(
            &self.layout.positions,
            &self.connections,
            self.map.floating(),
        )
    }
}
