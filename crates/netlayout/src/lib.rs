//! Netlayout - Layered layout of resistor networks
//!
//! A library for turning the resistors of a circuit description into a
//! layered, tree-like drawing hung between a start node and an end node.
//!
//! # Quick Start
//!
//! ```rust
//! use netlayout::render;
//!
//! let netlist = "R1 0 2 1k\nR2 2 3 1k\nR3 3 1 1k";
//! let text = render(netlist).unwrap();
//! println!("{}", text);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use netlayout::prelude::*;
//!
//! let connections = parse_connections(&["0-2", "3-4", "2-1"]).unwrap();
//! let config = LayoutConfig::default();
//!
//! // Walk the network from the start node
//! let map = map_from_start(&config.start, &connections, &config.end).unwrap();
//! assert_eq!(map.floating().len(), 1);
//!
//! // Assign levels and coordinates
//! let layout = node_positions(map.adjacency(), &config).unwrap();
//! assert_eq!(layout.height, 3);
//!
//! // Draw everything that is not floating
//! let plot = Plot::new(&layout.positions, &connections, map.floating()).unwrap();
//! let svg = SvgRenderer::new().render(&plot).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod core;
pub mod network;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        parse_connections, Connection, LayoutConfig, Level, Netlist, NetworkError, NodeId,
        Parser, Plot, Position, RenderConfig, Renderer,
    };
    pub use crate::network::{
        map_from_start, node_positions, AsciiRenderer, GraphMapper, LayoutEngine,
        NetlistParser, NetworkAnalysis, NetworkLayout, NetworkMap, SvgRenderer,
    };
}

/// Parse a circuit description and lay it out between the configured terminals
///
/// # Example
/// ```rust
/// use netlayout::{analyze, LayoutConfig};
///
/// let analysis = analyze("R1 0 2\nR2 2 1", &LayoutConfig::default()).unwrap();
/// assert_eq!(analysis.layout().height, 3);
/// assert!(analysis.floating().is_empty());
/// ```
pub fn analyze(input: &str, config: &LayoutConfig) -> anyhow::Result<network::NetworkAnalysis> {
    let netlist = network::parse_netlist(input)?;
    Ok(network::NetworkAnalysis::from_netlist(&netlist, config)?)
}

/// Render a circuit description as a text plot with default settings
///
/// Uses start node `0`, end node `1` and an axis separation of 5.
pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_config(input, &LayoutConfig::default(), RenderConfig::default())
}

/// Render a circuit description as a text plot
pub fn render_with_config(
    input: &str,
    config: &LayoutConfig,
    render_config: RenderConfig,
) -> anyhow::Result<String> {
    let analysis = analyze(input, config)?;
    let plot = analysis.plot()?;
    network::AsciiRenderer::with_config(render_config).render(&plot)
}

/// Render a circuit description as an SVG document
pub fn render_svg(
    input: &str,
    config: &LayoutConfig,
    render_config: RenderConfig,
) -> anyhow::Result<String> {
    let analysis = analyze(input, config)?;
    let plot = analysis.plot()?;
    network::SvgRenderer::with_config(render_config).render(&plot)
}
