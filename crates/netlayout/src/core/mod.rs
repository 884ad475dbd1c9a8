//! Core abstractions for network processing
//!
//! This module defines the shared types, errors and configuration, plus the
//! traits the parser and renderers implement.

mod canvas;
mod config;
mod error;
pub mod logging;
mod netlist;
mod parser;
mod plot;
mod renderer;
mod types;

pub use canvas::*;
pub use config::*;
pub use error::*;
pub use logging::*;
pub use netlist::*;
pub use parser::*;
pub use plot::*;
pub use renderer::*;
pub use types::*;
