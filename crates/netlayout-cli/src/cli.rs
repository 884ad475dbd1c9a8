//! Command-line interface for the netlayout utility
//!
//! Reads a circuit description, walks it from the start node and prints the
//! layered plot, the node levels or the floating connections.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

use netlayout::core::logging::{LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use netlayout::core::Parser as NetlistSource;
use netlayout::network::{AsciiRenderer, NetlistParser, NetworkAnalysis, SvgRenderer};
use netlayout::{validate_axis_sep, LayoutConfig, Netlist, RenderConfig, Renderer};

/// Netlayout - Plot resistor networks as layered trees
#[derive(Parser)]
#[command(name = "netlayout")]
#[command(about = "Lay out the resistors of a netlist between a start and an end node")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error) [default: warn]
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json) [default: compact]
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Log level and format to install, from the flags and the environment
    pub fn log_settings(&self) -> (String, String) {
        let level = resolve_log_level(
            self.log_level,
            std::env::var(LOG_LEVEL_ENV).ok(),
            std::env::var("RUST_LOG").ok(),
        );
        let format = resolve_log_format(self.log_format, std::env::var(LOG_FORMAT_ENV).ok());
        (level, format)
    }
}

/// Flag, then `NETLAYOUT_LOG_LEVEL`, then `RUST_LOG`, then `warn`
pub fn resolve_log_level(
    flag: Option<LogLevel>,
    env_level: Option<String>,
    rust_log: Option<String>,
) -> String {
    flag.map(|level| level.as_str().to_string())
        .or(env_level)
        .or(rust_log)
        .unwrap_or_else(|| LogLevel::Warn.as_str().to_string())
}

/// Flag, then `NETLAYOUT_LOG_FORMAT`, then `compact`
pub fn resolve_log_format(flag: Option<LogFormat>, env_format: Option<String>) -> String {
    flag.map(|format| format.as_str().to_string())
        .or(env_format)
        .unwrap_or_else(|| LogFormat::Compact.as_str().to_string())
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Terminals and spacing shared by every network command
#[derive(clap::Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Input netlist (use - for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Node the walk starts from
    #[arg(short, long, default_value = netlayout::DEFAULT_START_NODE)]
    pub start: String,

    /// Node placed alone on the deepest level
    #[arg(short, long, default_value = netlayout::DEFAULT_END_NODE)]
    pub end: String,

    /// Separation between neighbouring nodes
    #[arg(long, default_value_t = netlayout::DEFAULT_AXIS_SEP, value_parser = parse_axis_sep)]
    pub sep: f64,

    /// Fail when the end node is never reached
    #[arg(long)]
    pub strict: bool,
}

fn parse_axis_sep(value: &str) -> Result<f64, String> {
    let sep: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    validate_axis_sep(sep).map_err(|e| e.to_string())?;
    Ok(sep)
}

impl NetworkArgs {
    fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::new(self.start.as_str(), self.end.as_str())
            .with_axis_sep(self.sep)
            .with_require_end_reachable(self.strict)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plot the non-floating connections of a netlist
    Plot {
        #[command(flatten)]
        network: NetworkArgs,

        /// Output file for the plot (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = FormatChoice::Ascii)]
        format: FormatChoice,
    },

    /// Show the level and position of every placed node
    Levels {
        #[command(flatten)]
        network: NetworkArgs,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List connections the walk never consumed
    Floating {
        #[command(flatten)]
        network: NetworkArgs,
    },

    /// Validate netlist syntax
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Supported plot formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum FormatChoice {
    /// Character canvas
    #[default]
    Ascii,
    /// Standalone SVG document
    Svg,
}

/// One row of the `levels` report
#[derive(Debug, Serialize)]
struct LevelRow<'a> {
    node: &'a str,
    depth: usize,
    breadth: usize,
    x: f64,
    y: f64,
}

/// Main CLI application
pub struct NetlayoutApp {
    parser: NetlistParser,
    render_config: RenderConfig,
}

impl NetlayoutApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(render_config: RenderConfig) -> Self {
        Self {
            parser: NetlistParser::new(),
            render_config,
        }
    }

    /// Run the application with the given CLI arguments
    ///
    /// Logging is expected to be installed already, see [`Cli::log_settings`].
    pub fn run(&self, cli: Cli) -> Result<()> {
        if cli.verbose {
            eprintln!("Netlayout v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Plot {
                network,
                output,
                format,
            } => {
                let text = self.plot_command(&network, format, cli.verbose)?;
                self.write_output(output, &text)
            }
            Commands::Levels { network, json } => {
                let text = self.levels_command(&network, json, cli.verbose)?;
                self.write_output(None, &text)
            }
            Commands::Floating { network } => {
                let text = self.floating_command(&network, cli.verbose)?;
                self.write_output(None, &text)
            }
            Commands::Validate { input } => {
                let text = self.validate_command(input, cli.verbose)?;
                self.write_output(None, &text)
            }
        }
    }

    /// Parse the input named by `network` and lay it out
    fn analyze(&self, network: &NetworkArgs, verbose: bool) -> Result<NetworkAnalysis> {
        let content = self.read_input(network.input.clone())?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        self.analyze_str(&content, &network.layout_config())
    }

    fn analyze_str(&self, content: &str, config: &LayoutConfig) -> Result<NetworkAnalysis> {
        let mut netlist = Netlist::new();
        self.parser.parse(content, &mut netlist)?;
        info!(resistors = netlist.len(), "Parsed netlist");
        Ok(NetworkAnalysis::from_netlist(&netlist, config)?)
    }

    /// Handle the plot command
    fn plot_command(
        &self,
        network: &NetworkArgs,
        format: FormatChoice,
        verbose: bool,
    ) -> Result<String> {
        let analysis = self.analyze(network, verbose)?;
        if verbose {
            let layout = analysis.layout();
            eprintln!("Tree dimensions: {} x {}", layout.height, layout.width);
        }
        self.render(&analysis, format)
    }

    fn render(&self, analysis: &NetworkAnalysis, format: FormatChoice) -> Result<String> {
        let plot = analysis.plot()?;
        match format {
            FormatChoice::Ascii => AsciiRenderer::with_config(self.render_config).render(&plot),
            FormatChoice::Svg => SvgRenderer::with_config(self.render_config).render(&plot),
        }
    }

    /// Handle the levels command
    fn levels_command(&self, network: &NetworkArgs, json: bool, verbose: bool) -> Result<String> {
        let analysis = self.analyze(network, verbose)?;
        Self::format_levels(&analysis, json)
    }

    fn format_levels(analysis: &NetworkAnalysis, json: bool) -> Result<String> {
        let layout = analysis.layout();
        let mut rows = Vec::with_capacity(layout.levels.len());
        for (node, level) in &layout.levels {
            let position = layout
                .position(node.as_str())
                .ok_or_else(|| anyhow!("Node '{}' has a level but no position", node))?;
            rows.push(LevelRow {
                node: node.as_str(),
                depth: level.depth,
                breadth: level.breadth,
                x: position.x,
                y: position.y,
            });
        }

        if json {
            return Ok(serde_json::to_string_pretty(&rows)?);
        }

        let mut text = String::from("node\tdepth\tbreadth\tx\ty\n");
        for row in &rows {
            text.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                row.node, row.depth, row.breadth, row.x, row.y
            ));
        }
        Ok(text)
    }

    /// Handle the floating command
    fn floating_command(&self, network: &NetworkArgs, verbose: bool) -> Result<String> {
        let analysis = self.analyze(network, verbose)?;
        if verbose {
            eprintln!(
                "{} of {} connections floating",
                analysis.floating().len(),
                analysis.connections().len()
            );
        }
        Ok(Self::format_floating(&analysis))
    }

    fn format_floating(analysis: &NetworkAnalysis) -> String {
        analysis
            .floating()
            .iter()
            .map(|connection| format!("{}\n", connection))
            .collect()
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<String> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let mut netlist = Netlist::new();
        match self.parser.parse(&content, &mut netlist) {
            Ok(()) => Ok(format!("✓ Valid netlist: {} connections", netlist.len())),
            Err(e) => {
                println!("✗ Invalid netlist: {}", e);
                Err(e)
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for NetlayoutApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const DIVIDER: &str = "* divider with a stray resistor\nR1 0 2 1k\nR2 2 1 1k\nR3 7 8 1k\n";

    fn network_args(input: PathBuf) -> NetworkArgs {
        NetworkArgs {
            input: Some(input),
            start: "0".to_string(),
            end: "1".to_string(),
            sep: 5.0,
            strict: false,
        }
    }

    #[test]
    fn test_cli_parsing_plot_command() {
        let args = vec![
            "netlayout",
            "plot",
            "--input",
            "net.cir",
            "--output",
            "net.svg",
            "--start",
            "5",
            "--sep",
            "3",
            "--format",
            "svg",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Plot {
                network,
                output,
                format,
            } => {
                assert_eq!(network.input.unwrap().to_string_lossy(), "net.cir");
                assert_eq!(output.unwrap().to_string_lossy(), "net.svg");
                assert_eq!(network.start, "5");
                assert_eq!(network.end, "1"); // default
                assert_eq!(network.sep, 3.0);
                assert!(!network.strict);
                assert_eq!(format, FormatChoice::Svg);
            }
            _ => panic!("Expected Plot command"),
        }
    }

    #[test]
    fn test_cli_parsing_levels_command() {
        let args = vec!["netlayout", "levels", "--json", "-e", "9"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Levels { network, json } => {
                assert!(json);
                assert_eq!(network.end, "9");
                assert!(network.input.is_none());
            }
            _ => panic!("Expected Levels command"),
        }
    }

    #[test]
    fn test_cli_parsing_validate_command() {
        let args = vec!["netlayout", "validate"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Validate { input } => assert!(input.is_none()),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(vec!["netlayout", "--verbose", "floating"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log_level, None);
    }

    #[test]
    fn test_log_level_flag_wins_without_env() {
        let args = vec!["netlayout", "--log-level", "error", "floating"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Error));
        assert_eq!(resolve_log_level(cli.log_level, None, None), "error");
    }

    #[test]
    fn test_log_level_flag_wins_over_env() {
        let level = resolve_log_level(
            Some(LogLevel::Error),
            Some("debug".to_string()),
            Some("trace".to_string()),
        );
        assert_eq!(level, "error");
    }

    #[test]
    fn test_log_level_fallbacks() {
        assert_eq!(resolve_log_level(None, None, None), "warn");
        assert_eq!(resolve_log_level(None, None, Some("debug".to_string())), "debug");
        assert_eq!(
            resolve_log_level(None, Some("info".to_string()), Some("debug".to_string())),
            "info"
        );
    }

    #[test]
    fn test_log_format_resolution() {
        let args = vec!["netlayout", "validate", "--log-format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(resolve_log_format(cli.log_format, None), "json");
        assert_eq!(resolve_log_format(None, None), "compact");
        assert_eq!(resolve_log_format(None, Some("pretty".to_string())), "pretty");
    }

    #[test]
    fn test_sep_flag_rejects_unusable_values() {
        for sep in ["0", "-5", "NaN", "inf", "1e300", "wide"] {
            let result = Cli::try_parse_from(vec!["netlayout", "plot", "--sep", sep]);
            assert!(result.is_err(), "--sep {} accepted", sep);
        }
        let cli = Cli::try_parse_from(vec!["netlayout", "plot", "--sep", "2.5"]).unwrap();
        match cli.command {
            Commands::Plot { network, .. } => assert_eq!(network.sep, 2.5),
            _ => panic!("Expected Plot command"),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = Cli::try_parse_from(vec!["netlayout", "plot", "--format", "jpg"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let app = NetlayoutApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("net.cir");
        fs::write(&file_path, DIVIDER).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, DIVIDER);
    }

    #[test]
    fn test_read_missing_input_fails() {
        let app = NetlayoutApp::new();
        let dir = tempdir().unwrap();
        let result = app.read_input(Some(dir.path().join("missing.cir")));
        assert!(result.unwrap_err().to_string().contains("missing.cir"));
    }

    #[test]
    fn test_write_output_to_file() {
        let app = NetlayoutApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("plot.txt");

        app.write_output(Some(file_path.clone()), "0\n|\n1").unwrap();

        let read_content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(read_content, "0\n|\n1");
    }

    #[test]
    fn test_plot_command_svg() {
        let app = NetlayoutApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("net.cir");
        fs::write(&file_path, DIVIDER).unwrap();

        let svg = app
            .plot_command(&network_args(file_path), FormatChoice::Svg, false)
            .unwrap();
        assert!(svg.starts_with("<svg"));
        // The stray resistor is not drawn
        assert_eq!(svg.matches("<line").count(), 2);
    }

    #[test]
    fn test_levels_json() {
        let app = NetlayoutApp::new();
        let analysis = app.analyze_str(DIVIDER, &LayoutConfig::default()).unwrap();
        let json = NetlayoutApp::format_levels(&analysis, true).unwrap();

        let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["node"], "0");
        assert_eq!(rows[0]["depth"], 0);
        assert_eq!(rows[2]["node"], "1");
        assert_eq!(rows[2]["depth"], 2);
    }

    #[test]
    fn test_levels_table() {
        let app = NetlayoutApp::new();
        let analysis = app.analyze_str(DIVIDER, &LayoutConfig::default()).unwrap();
        let table = NetlayoutApp::format_levels(&analysis, false).unwrap();
        assert!(table.starts_with("node\tdepth"));
        assert_eq!(table.lines().count(), 4);
    }

    #[test]
    fn test_floating_lists_stray_resistor() {
        let app = NetlayoutApp::new();
        let analysis = app.analyze_str(DIVIDER, &LayoutConfig::default()).unwrap();
        assert_eq!(NetlayoutApp::format_floating(&analysis), "7-8\n");
    }

    #[test]
    fn test_floating_output_parses_back() {
        let app = NetlayoutApp::new();
        let input = "R1 0 2\nR2 2 1\nR3 n7 n8\nR4 n8 n9\n";
        let analysis = app.analyze_str(input, &LayoutConfig::default()).unwrap();
        let listed = NetlayoutApp::format_floating(&analysis);

        let lines: Vec<&str> = listed.lines().collect();
        let parsed = netlayout::parse_connections(&lines).unwrap();
        assert_eq!(parsed, analysis.floating());
    }

    #[test]
    fn test_dashed_node_names_rejected() {
        let app = NetlayoutApp::new();
        let result = app.analyze_str("R1 0 a-b\nR2 a-b 1\n", &LayoutConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_strict_mode_rejects_unreachable_end() {
        let app = NetlayoutApp::new();
        let config = LayoutConfig::default().with_require_end_reachable(true);
        assert!(app.analyze_str("R1 0 2\nR2 2 3\n", &config).is_err());
    }

    #[test]
    fn test_validate_command() {
        let app = NetlayoutApp::new();
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.cir");
        let bad = dir.path().join("bad.cir");
        fs::write(&good, DIVIDER).unwrap();
        fs::write(&bad, "R1 0\n").unwrap();

        let report = app.validate_command(Some(good), false).unwrap();
        assert!(report.contains("3 connections"));
        assert!(app.validate_command(Some(bad), false).is_err());
    }
}
