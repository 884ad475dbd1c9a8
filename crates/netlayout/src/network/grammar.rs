//! Netlist line grammar using chumsky
//!
//! Recognises resistor statements of a circuit description: a designator
//! starting with `R`, followed by two whitespace separated node tokens.
//! Anything after the second node (value, model, comments) is ignored.
//! Node tokens may not contain `-`, the separator of a displayed connection.

use chumsky::prelude::*;

/// A resistor statement split into its tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResistorStatement<'src> {
    pub designator: &'src str,
    pub a: &'src str,
    pub b: &'src str,
}

/// Returns true if the line is a resistor statement and must parse as one
pub fn is_resistor_line(line: &str) -> bool {
    line.starts_with('R')
}

/// Parse one resistor statement
pub fn parse_resistor(line: &str) -> Result<ResistorStatement<'_>, String> {
    resistor_parser()
        .then_ignore(end())
        .parse(line)
        .into_result()
        .map_err(|errors| {
            format!(
                concat!(
                    "expected '<designator> <node> <node>' with no '-' in node names, ",
                    "got {:?} ({} error(s))"
                ),
                line,
                errors.len()
            )
        })
}

fn gap<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

fn token<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    none_of(" \t\r\n-").repeated().at_least(1).to_slice()
}

fn resistor_parser<'src>() -> impl Parser<'src, &'src str, ResistorStatement<'src>> + Clone {
    let designator = just('R')
        .then(none_of(" \t\r\n").repeated())
        .to_slice()
        .labelled("designator");

    designator
        .then_ignore(gap())
        .then(token().labelled("first node"))
        .then_ignore(gap())
        .then(token().labelled("second node"))
        .then_ignore(one_of(" \t\r").then(any().repeated()).or_not())
        .map(|((designator, a), b)| ResistorStatement { designator, a, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_statement() {
        let statement = parse_resistor("R1 0 2").unwrap();
        assert_eq!(statement.designator, "R1");
        assert_eq!(statement.a, "0");
        assert_eq!(statement.b, "2");
    }

    #[test]
    fn test_trailing_value_ignored() {
        let statement = parse_resistor("R12\t10   11 4.7k ; load").unwrap();
        assert_eq!(statement.designator, "R12");
        assert_eq!(statement.a, "10");
        assert_eq!(statement.b, "11");
    }

    #[test]
    fn test_bare_designator() {
        let statement = parse_resistor("R a b").unwrap();
        assert_eq!(statement.designator, "R");
        assert_eq!((statement.a, statement.b), ("a", "b"));
    }

    #[test]
    fn test_missing_node_rejected() {
        assert!(parse_resistor("R1 0").is_err());
        assert!(parse_resistor("R1").is_err());
        assert!(parse_resistor("R1 0 ").is_err());
    }

    #[test]
    fn test_dash_in_node_rejected() {
        assert!(parse_resistor("R1 a-b c").is_err());
        assert!(parse_resistor("R1 0 2-3").is_err());
        assert!(parse_resistor("R1 -0 2").is_err());
    }

    #[test]
    fn test_dash_after_nodes_allowed() {
        let statement = parse_resistor("R-load 0 2 -5 ; negative value").unwrap();
        assert_eq!(statement.designator, "R-load");
        assert_eq!((statement.a, statement.b), ("0", "2"));
    }

    #[test]
    fn test_resistor_line_detection() {
        assert!(is_resistor_line("R1 0 2"));
        assert!(!is_resistor_line("* comment"));
        assert!(!is_resistor_line("V1 0 1 5"));
        assert!(!is_resistor_line(" R1 0 2"));
    }
}
