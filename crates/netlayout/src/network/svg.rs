//! SVG renderer for network plots
//!
//! Produces a standalone SVG document: one thin line per drawable
//! connection and a filled circle with a centered label per node.

use anyhow::Result;
use std::fmt::Write as _;
use tracing::{debug, span, Level};

use crate::core::{Plot, Position, RenderConfig, Renderer};

/// Pixels per layout unit before scaling
const UNIT: f64 = 12.0;
const PADDING: f64 = 24.0;
const NODE_RADIUS: f64 = 9.0;
const FONT_SIZE: f64 = 9.0;
const FONT_FAMILY: &str = "sans-serif";
const NODE_FILL: &str = "lightcyan";
const LINE_STROKE: &str = r#"stroke="black" stroke-width="0.75""#;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders a plot as an SVG document
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    fn px(&self, position: Position, min: Position, max: Position) -> (f64, f64) {
        let x = PADDING + (position.x - min.x) * UNIT * self.config.scale_x / 2.0;
        let y = PADDING + (max.y - position.y) * UNIT * self.config.scale_y;
        (x, y)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, plot: &Plot<'_>) -> Result<Self::Output> {
        let render_span = span!(
            Level::INFO,
            "render_svg",
            nodes = plot.positions().len(),
            connections = plot.connections().len()
        );
        let _enter = render_span.enter();

        let (min, max) = plot
            .bounds()
            .unwrap_or((Position::new(0.0, 0.0), Position::new(0.0, 0.0)));
        let (right, bottom) = self.px(Position::new(max.x, min.y), min, max);
        let width = right + PADDING;
        let height = bottom + PADDING;

        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

        writeln!(out, r#"<g class="connections">"#)?;
        for connection in plot.connections() {
            if let Some((from, to)) = plot.segment(connection) {
                let (x1, y1) = self.px(from, min, max);
                let (x2, y2) = self.px(to, min, max);
                writeln!(
                    out,
                    r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" {LINE_STROKE}><title>{}</title></line>"#,
                    escape(&connection.to_string())
                )?;
            }
        }
        writeln!(out, "</g>")?;

        writeln!(out, r#"<g class="nodes">"#)?;
        for (node, position) in plot.positions() {
            let (cx, cy) = self.px(*position, min, max);
            writeln!(
                out,
                r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{NODE_RADIUS}" fill="{NODE_FILL}"/>"#
            )?;
            writeln!(
                out,
                r#"<text x="{cx:.1}" y="{cy:.1}" font-family="{FONT_FAMILY}" font-size="{FONT_SIZE}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                escape(node.as_str())
            )?;
        }
        writeln!(out, "</g>")?;
        out.push_str("</svg>\n");

        debug!(bytes = out.len(), "Rendered svg");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "svg"
    }

    fn format(&self) -> &'static str {
        "svg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Connection, NodeId};
    use indexmap::IndexMap;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_document_structure() {
        let mut positions = IndexMap::new();
        positions.insert(NodeId::from("0"), Position::new(4.0, 7.0));
        positions.insert(NodeId::from("1"), Position::new(4.0, 2.0));
        let connections = vec![Connection::new("0", "1"), Connection::new("5", "6")];
        let floating = vec![Connection::new("5", "6")];
        let plot = Plot::new(&positions, &connections, &floating).unwrap();

        let svg = SvgRenderer::new().render(&plot).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("<title>0-1</title>"));
        assert!(!svg.contains("5-6"));
    }

    #[test]
    fn test_start_drawn_above_end() {
        let mut positions = IndexMap::new();
        positions.insert(NodeId::from("0"), Position::new(4.0, 7.0));
        positions.insert(NodeId::from("1"), Position::new(4.0, 2.0));
        let plot = Plot::new(&positions, &[], &[]).unwrap();
        let renderer = SvgRenderer::new();
        let (min, max) = plot.bounds().unwrap();
        let (_, start_y) = renderer.px(Position::new(4.0, 7.0), min, max);
        let (_, end_y) = renderer.px(Position::new(4.0, 2.0), min, max);
        assert!(start_y < end_y);
    }
}
