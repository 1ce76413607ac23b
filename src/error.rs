//! Error types for the netgames crate

use thiserror::Error;

use crate::graph::NodeId;

/// Main error type for the netgames crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid probability {value} (must lie in [0, 1])")]
    InvalidProbability { value: f64 },

    #[error("invalid parameter {name}={value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("unknown arm '{arm}' (expected 'A' or 'B')")]
    UnknownArm { arm: String },

    #[error("invalid action {value} (expected 0 or 1)")]
    InvalidAction { value: u8 },

    #[error("self loop on node {node} is not allowed")]
    SelfLoop { node: NodeId },

    #[error("node {node} is not part of the graph")]
    UnknownNode { node: NodeId },

    #[error("node {node} appears more than once in exchange data")]
    DuplicateNode { node: NodeId },

    #[error(
        "history of node {node} is inconsistent: {actions} actions, {outcomes} outcomes, {beliefs} beliefs"
    )]
    InconsistentHistory {
        node: NodeId,
        actions: usize,
        outcomes: usize,
        beliefs: usize,
    },

    #[error("no learning parameters supplied for node {node}")]
    MissingNodeParams { node: NodeId },

    #[error("invalid preset '{input}'. Expected one of: {expected}")]
    ParsePreset { input: String, expected: String },

    #[error("invalid game variant '{input}'. Expected one of: {expected}")]
    ParseVariant { input: String, expected: String },

    #[error("invalid edge '{input}' (expected format 'u-v')")]
    ParseEdge { input: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

/// Reject probabilities outside `[0, 1]` (NaN included).
pub(crate) fn check_probability(value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidProbability { value })
    }
}
