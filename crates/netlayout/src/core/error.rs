//! Core error types for network mapping and layout
//!
//! This module defines the error taxonomy shared by the parser, the graph
//! mapper, the layout engine and the renderers.

use thiserror::Error;

/// Core error types for resistor network processing
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Malformed connection '{edge}': expected exactly two node identifiers")]
    MalformedEdge { edge: String },

    #[error("Node '{node}' has no adjacency entry")]
    MissingKey { node: String },

    #[error("Start and end node must differ, both are '{node}'")]
    InvalidEndpoints { node: String },

    #[error("End node '{node}' is never reached from the start node")]
    UnreachableEndNode { node: String },

    #[error("Layout stalled with {remaining} unplaced node(s)")]
    Disconnected { remaining: usize },

    #[error("Parse error: {message} at line {line}")]
    Parse { message: String, line: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl NetworkError {
    /// Create a new malformed edge error
    pub fn malformed_edge(edge: impl Into<String>) -> Self {
        Self::MalformedEdge { edge: edge.into() }
    }

    /// Create a new missing key error
    pub fn missing_key(node: impl Into<String>) -> Self {
        Self::MissingKey { node: node.into() }
    }

    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>, line: usize) -> Self {
        Self::Parse {
            message: message.into(),
            line,
        }
    }

    /// Create a new invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}

/// Result alias used by the mapping and layout stages
pub type NetworkResult<T> = Result<T, NetworkError>;
