//! Core parser trait for circuit descriptions
//!
//! This trait defines the interface for turning circuit description text
//! into a [`Netlist`].

use anyhow::Result;

use super::Netlist;

/// Core trait for netlist parsers
///
/// # Example
/// ```
/// use netlayout::core::{Netlist, Parser};
/// use netlayout::network::NetlistParser;
///
/// let parser = NetlistParser::new();
/// let mut netlist = Netlist::new();
/// parser.parse("R1 0 2 1k\nR2 2 1 1k", &mut netlist).unwrap();
/// assert_eq!(netlist.len(), 2);
/// ```
pub trait Parser: Send + Sync {
    /// Parse circuit text, appending its resistors to `netlist`
    fn parse(&self, input: &str, netlist: &mut Netlist) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input looks like something this parser understands
    fn can_parse(&self, input: &str) -> bool;
}
