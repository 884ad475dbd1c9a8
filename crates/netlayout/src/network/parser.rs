//! Netlist parser implementation
//!
//! Reads a circuit description line by line and collects every resistor
//! statement into a [`Netlist`]. Lines that are not resistor statements
//! (comments, sources, dot commands) are skipped.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::grammar::{is_resistor_line, parse_resistor};
use crate::core::{Connection, Netlist, NetworkError, NetworkResult, Parser, Resistor};

/// Parse a circuit description into a netlist
///
/// A resistor line that does not carry two node tokens aborts parsing with
/// its 1-based line number.
pub fn parse_netlist(input: &str) -> NetworkResult<Netlist> {
    let mut netlist = Netlist::new();
    append_resistors(input, &mut netlist)?;
    Ok(netlist)
}

fn append_resistors(input: &str, netlist: &mut Netlist) -> NetworkResult<()> {
    let parse_span = span!(Level::INFO, "parse_netlist", input_len = input.len());
    let _enter = parse_span.enter();

    let mut skipped = 0usize;
    for (idx, line) in input.lines().enumerate() {
        let line_number = idx + 1;
        if !is_resistor_line(line) {
            if !line.trim().is_empty() {
                trace!(line = line_number, "Skipping non-resistor line");
                skipped += 1;
            }
            continue;
        }

        let statement = parse_resistor(line)
            .map_err(|message| NetworkError::parse_error(message, line_number))?;
        trace!(
            line = line_number,
            designator = statement.designator,
            "Parsed resistor"
        );
        netlist.add_resistor(Resistor {
            designator: statement.designator.to_string(),
            connection: Connection::new(statement.a, statement.b),
            line: line_number,
        });
    }

    debug!(resistors = netlist.len(), skipped, "Parsed netlist");
    info!("Parsing completed");
    Ok(())
}

/// Resistor netlist parser
pub struct NetlistParser;

impl NetlistParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NetlistParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for NetlistParser {
    fn parse(&self, input: &str, netlist: &mut Netlist) -> Result<()> {
        append_resistors(input, netlist)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "netlist"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.lines().any(is_resistor_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIVIDER: &str = "* voltage divider\nV1 0 1 5\nR1 0 2 1k\nR2 2 1 2k\n.end\n";

    #[test]
    fn test_parser_metadata() {
        let parser = NetlistParser::new();
        assert_eq!(parser.name(), "netlist");
        assert_eq!(parser.version(), "0.1.0");
    }

    #[test]
    fn test_can_parse() {
        let parser = NetlistParser::new();
        assert!(parser.can_parse(DIVIDER));
        assert!(!parser.can_parse("* only a comment\nV1 0 1 5"));
    }

    #[test]
    fn test_parse_divider() {
        let netlist = parse_netlist(DIVIDER).unwrap();
        assert_eq!(netlist.len(), 2);
        let resistors = netlist.resistors();
        assert_eq!(resistors[0].designator, "R1");
        assert_eq!(resistors[0].connection.to_string(), "0-2");
        assert_eq!(resistors[0].line, 3);
        assert_eq!(resistors[1].connection.to_string(), "2-1");
    }

    #[test]
    fn test_parse_appends_to_existing_netlist() {
        let parser = NetlistParser::new();
        let mut netlist = Netlist::new();
        parser.parse("R1 0 2", &mut netlist).unwrap();
        parser.parse("R2 2 1", &mut netlist).unwrap();
        assert_eq!(netlist.len(), 2);
    }

    #[test]
    fn test_parse_reports_line_of_bad_resistor() {
        let result = parse_netlist("R1 0 2\n* ok\nR2 2\n");
        match result {
            Err(NetworkError::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_dash_in_node_name_reported_with_line() {
        match parse_netlist("R1 0 2 1k\nR2 a-b 1 1k\n") {
            Err(NetworkError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("'-'"));
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_windows_line_endings() {
        let netlist = parse_netlist("R1 0 2\r\nR2 2 1\r\n").unwrap();
        assert_eq!(netlist.resistors()[1].connection.to_string(), "2-1");
    }

    #[test]
    fn test_empty_input() {
        let netlist = parse_netlist("").unwrap();
        assert!(netlist.is_empty());
    }
}
