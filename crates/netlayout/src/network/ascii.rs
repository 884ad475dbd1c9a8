//! Text renderer for network plots
//!
//! Draws connections as character lines on an [`AsciiCanvas`] and writes
//! each node label centered on its position. The layout's y axis points up,
//! so rows are flipped to put the start node at the top.

use anyhow::Result;
use tracing::{debug, span, Level};
use unicode_width::UnicodeWidthStr;

use crate::core::{AsciiCanvas, NetworkError, Plot, Position, RenderConfig, Renderer};

/// Renders a plot as plain text
pub struct AsciiRenderer {
    config: RenderConfig,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self {
            config: RenderConfig::default(),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    fn cell(
        &self,
        position: Position,
        min: Position,
        max: Position,
        margin: usize,
    ) -> Result<(usize, usize)> {
        let col = scaled((position.x - min.x) * self.config.scale_x)?;
        let row = scaled((max.y - position.y) * self.config.scale_y)?;
        Ok((canvas_side(col.checked_add(margin))?, row))
    }
}

/// Largest canvas side, in characters
const MAX_CANVAS_SIDE: usize = 16_384;

fn scaled(units: f64) -> Result<usize> {
    let units = units.round();
    if !units.is_finite() || units >= MAX_CANVAS_SIDE as f64 {
        return Err(NetworkError::render_error(format!(
            "plot spans {} characters, more than the canvas limit of {}",
            units, MAX_CANVAS_SIDE
        ))
        .into());
    }
    Ok(units.max(0.0) as usize)
}

fn canvas_side(side: Option<usize>) -> Result<usize> {
    match side {
        Some(side) if side <= MAX_CANVAS_SIDE => Ok(side),
        _ => Err(NetworkError::render_error(format!(
            "plot is larger than the canvas limit of {} characters",
            MAX_CANVAS_SIDE
        ))
        .into()),
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AsciiRenderer {
    type Output = String;

    fn render(&self, plot: &Plot<'_>) -> Result<Self::Output> {
        let render_span = span!(
            Level::INFO,
            "render_ascii",
            nodes = plot.positions().len(),
            connections = plot.connections().len()
        );
        let _enter = render_span.enter();

        let Some((min, max)) = plot.bounds() else {
            return Ok(String::new());
        };

        // Leave room for labels centered on the leftmost column
        let margin = plot
            .positions()
            .keys()
            .map(|node| UnicodeWidthStr::width(node.as_str()))
            .max()
            .unwrap_or(0);

        let (right, bottom) = self.cell(Position::new(max.x, min.y), min, max, margin)?;
        let width = canvas_side(right.checked_add(margin).and_then(|w| w.checked_add(1)))?;
        let height = canvas_side(bottom.checked_add(1))?;
        let mut canvas = AsciiCanvas::new(width, height);

        for connection in plot.connections() {
            if let Some((from, to)) = plot.segment(connection) {
                canvas.draw_line(
                    self.cell(from, min, max, margin)?,
                    self.cell(to, min, max, margin)?,
                );
            }
        }

        for (node, position) in plot.positions() {
            let (col, row) = self.cell(*position, min, max, margin)?;
            canvas.draw_text_centered(col, row, node.as_str());
        }

        debug!(width = canvas.width, height = canvas.height, "Rendered canvas");
        Ok(canvas.to_string())
    }

    fn name(&self) -> &'static str {
        "ascii"
    }

    fn format(&self) -> &'static str {
        "text"
    }
}
