//! Configuration shared across CLI commands

use std::{fmt, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use crate::{
    config::NetgamesConfig,
    graph::{Edge, Graph},
};

/// Flags accepted by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// JSON file with engine parameters; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl CommonArgs {
    /// File configuration, or the defaults when no file was given.
    pub fn load_config(&self) -> Result<NetgamesConfig> {
        match &self.config {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration");
                NetgamesConfig::load(path)
                    .with_context(|| format!("invalid configuration file {}", path.display()))
            }
            None => Ok(NetgamesConfig::default()),
        }
    }
}

/// Per-link cost as typed on the command line: a number or `none`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkCost(pub Option<f64>);

impl FromStr for LinkCost {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(LinkCost(None));
        }
        s.parse::<f64>()
            .map(|cost| LinkCost(Some(cost)))
            .map_err(|_| format!("invalid cost '{s}' (expected a number or 'none')"))
    }
}

impl fmt::Display for LinkCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(cost) => write!(f, "{cost}"),
            None => f.write_str("none"),
        }
    }
}

/// `nodes` isolated nodes plus the given edges.
pub fn build_graph(nodes: usize, edges: &[Edge]) -> Graph {
    let mut graph = Graph::empty(nodes);
    for &edge in edges {
        graph.add_edge(edge);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_cost_parsing() {
        assert_eq!("0.25".parse::<LinkCost>().unwrap(), LinkCost(Some(0.25)));
        assert_eq!("None".parse::<LinkCost>().unwrap(), LinkCost(None));
        assert!("cheap".parse::<LinkCost>().is_err());
    }

    #[test]
    fn build_graph_keeps_isolated_nodes() {
        let graph = build_graph(4, &[Edge::pair(0, 5).unwrap()]);
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.degree(crate::graph::NodeId::new(3)), 0);
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = CommonArgs {
            config: Some(PathBuf::from("/nonexistent/netgames.json")),
            verbose: false,
        };
        assert!(args.load_config().is_err());
    }
}
