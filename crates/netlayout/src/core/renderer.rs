//! Core renderer trait for plot output
//!
//! This trait defines the interface for turning a [`Plot`] into an output
//! format (text canvas, SVG, ...).

use anyhow::Result;

use super::Plot;

/// Core trait for plot renderers
pub trait Renderer: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the plot into the output format
    fn render(&self, plot: &Plot<'_>) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
