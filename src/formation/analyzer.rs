//! Single-edge perturbation analysis
//!
//! Every missing edge is tried as an addition and every existing edge as a
//! removal. Each hypothetical graph is scored with [`compute_utility`] from
//! scratch. The work is O((E + N^2) * N * (N + E)), which is fine for the
//! tens of nodes this is meant for.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    formation::utility::{UtilityMap, compute_utility},
    graph::{Edge, Graph, NodeId},
};

/// Which way an edge is toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeChange {
    /// Candidate edge, deltas are `with_edge - current`.
    Addition,
    /// Existing edge, deltas are `current - without_edge`.
    Removal,
}

/// Outcome of toggling one edge.
///
/// Deltas are always oriented so that a non-negative value means the edge's
/// presence is justified.
#[derive(Debug, Clone)]
pub struct EdgeStat {
    pub change: EdgeChange,
    /// Graph after the toggle
    pub graph: Graph,
    /// Utility of every node in the toggled graph
    pub nodes_util: UtilityMap,
    pub nodes_diff: UtilityMap,
    pub total_util: f64,
    pub total_diff: f64,
    /// Neither endpoint loses utility from the edge being present
    pub pair_supported: bool,
    /// Total utility does not drop from the edge being present
    pub net_supported: bool,
}

impl EdgeStat {
    fn evaluate(
        edge: Edge,
        change: EdgeChange,
        current: &UtilityMap,
        graph: Graph,
        delta: f64,
        cost: Option<f64>,
    ) -> Self {
        let nodes_util = compute_utility(&graph, delta, cost);
        let total_util = nodes_util.total();
        let (nodes_diff, total_diff) = match change {
            EdgeChange::Addition => (
                nodes_util.difference(current),
                total_util - current.total(),
            ),
            EdgeChange::Removal => (
                current.difference(&nodes_util),
                current.total() - total_util,
            ),
        };
        let endpoint_ok = |node: NodeId| nodes_diff.get(node).is_some_and(|diff| diff >= 0.0);
        let pair_supported = endpoint_ok(edge.low()) && endpoint_ok(edge.high());

        Self {
            change,
            graph,
            nodes_util,
            nodes_diff,
            total_util,
            total_diff,
            pair_supported,
            net_supported: total_diff >= 0.0,
        }
    }

    /// Utility change of the two endpoints, lower id first.
    pub fn endpoint_diffs(&self, edge: Edge) -> (f64, f64) {
        (
            self.nodes_diff.get(edge.low()).unwrap_or(0.0),
            self.nodes_diff.get(edge.high()).unwrap_or(0.0),
        )
    }
}

/// Flattened view of one [`EdgeStat`] for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeReport {
    pub edge: Edge,
    pub change: EdgeChange,
    pub total_diff: f64,
    pub low_diff: f64,
    pub high_diff: f64,
    pub pair_supported: bool,
    pub net_supported: bool,
}

/// Result of [`analyze`].
#[derive(Debug, Clone)]
pub struct NetworkAnalysis {
    pub graph: Graph,
    pub current_util: UtilityMap,
    /// One entry per missing edge
    pub added_edges: BTreeMap<Edge, EdgeStat>,
    /// One entry per existing edge
    pub existing_edges: BTreeMap<Edge, EdgeStat>,
    /// Net-supported addition with the largest total gain, if any
    pub best_addition: Option<Edge>,
}

impl NetworkAnalysis {
    pub fn total_utility(&self) -> f64 {
        self.current_util.total()
    }

    /// Existing edges first, then candidates, each in ascending edge order.
    pub fn edge_reports(&self) -> Vec<EdgeReport> {
        self.existing_edges
            .iter()
            .chain(self.added_edges.iter())
            .map(|(&edge, stat)| {
                let (low_diff, high_diff) = stat.endpoint_diffs(edge);
                EdgeReport {
                    edge,
                    change: stat.change,
                    total_diff: stat.total_diff,
                    low_diff,
                    high_diff,
                    pair_supported: stat.pair_supported,
                    net_supported: stat.net_supported,
                }
            })
            .collect()
    }

    /// No existing edge is worth dropping for either endpoint, and no
    /// candidate edge would leave one endpoint strictly better off without
    /// hurting the other.
    pub fn is_pairwise_stable(&self) -> bool {
        self.existing_edges.values().all(|stat| stat.pair_supported)
            && !self.added_edges.iter().any(|(&edge, stat)| {
                let (low, high) = stat.endpoint_diffs(edge);
                stat.pair_supported && (low > 0.0 || high > 0.0)
            })
    }
}

/// Score every single-edge addition and removal of `graph`.
pub fn analyze(graph: &Graph, delta: f64, cost: Option<f64>) -> NetworkAnalysis {
    let current_util = compute_utility(graph, delta, cost);
    let candidates = graph.non_edges();
    let existing: Vec<Edge> = graph.edges().collect();
    debug!(
        nodes = graph.node_count(),
        candidates = candidates.len(),
        existing = existing.len(),
        "analyzing edge perturbations"
    );

    let added_edges: BTreeMap<Edge, EdgeStat> = candidates
        .par_iter()
        .map(|&edge| {
            let stat = EdgeStat::evaluate(
                edge,
                EdgeChange::Addition,
                &current_util,
                graph.with_edge(edge),
                delta,
                cost,
            );
            (edge, stat)
        })
        .collect();

    let existing_edges: BTreeMap<Edge, EdgeStat> = existing
        .par_iter()
        .map(|&edge| {
            let stat = EdgeStat::evaluate(
                edge,
                EdgeChange::Removal,
                &current_util,
                graph.without_edge(edge),
                delta,
                cost,
            );
            (edge, stat)
        })
        .collect();

    let best_addition = best_net_improving(&added_edges);
    debug!(?best_addition, "edge perturbation analysis complete");

    NetworkAnalysis {
        graph: graph.clone(),
        current_util,
        added_edges,
        existing_edges,
        best_addition,
    }
}

/// Net-supported edge with the strictly greatest `total_diff`; the lowest
/// edge wins ties.
pub(crate) fn best_net_improving(stats: &BTreeMap<Edge, EdgeStat>) -> Option<Edge> {
    let mut best: Option<(Edge, f64)> = None;
    for (&edge, stat) in stats.iter().filter(|(_, stat)| stat.net_supported) {
        match best {
            Some((_, diff)) if stat.total_diff <= diff => {}
            _ => best = Some((edge, stat.total_diff)),
        }
    }
    best.map(|(edge, _)| edge)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(u: usize, v: usize) -> Edge {
        Edge::pair(u, v).unwrap()
    }

    fn synthetic(total_diff: f64, net_supported: bool) -> EdgeStat {
        EdgeStat {
            change: EdgeChange::Addition,
            graph: Graph::new(),
            nodes_util: UtilityMap::default(),
            nodes_diff: UtilityMap::default(),
            total_util: 0.0,
            total_diff,
            pair_supported: false,
            net_supported,
        }
    }

    #[test]
    fn best_addition_ignores_unsupported_edges() {
        let stats = BTreeMap::from([
            (edge(0, 1), synthetic(-0.5, false)),
            (edge(0, 2), synthetic(1.5, true)),
            (edge(1, 2), synthetic(3.0, false)),
        ]);
        assert_eq!(best_net_improving(&stats), Some(edge(0, 2)));
    }

    #[test]
    fn best_addition_prefers_first_of_ties() {
        let stats = BTreeMap::from([
            (edge(1, 3), synthetic(0.8, true)),
            (edge(0, 3), synthetic(0.8, true)),
            (edge(0, 1), synthetic(0.2, true)),
        ]);
        assert_eq!(best_net_improving(&stats), Some(edge(0, 3)));
    }

    #[test]
    fn best_addition_none_when_nothing_supported() {
        let stats = BTreeMap::from([(edge(0, 1), synthetic(-0.1, false))]);
        assert_eq!(best_net_improving(&stats), None);
    }

    #[test]
    fn empty_graph_with_cheap_links_wants_every_edge() {
        let analysis = analyze(&Graph::empty(4), 0.5, Some(0.1));
        assert_eq!(analysis.added_edges.len(), 6);
        assert!(analysis.existing_edges.is_empty());
        for stat in analysis.added_edges.values() {
            assert!(stat.pair_supported);
            assert!(stat.net_supported);
            assert!((stat.total_diff - 0.8).abs() < 1e-12);
        }
        assert_eq!(analysis.best_addition, Some(edge(0, 1)));
        assert!(!analysis.is_pairwise_stable());
    }

    #[test]
    fn complete_graph_with_cheap_links_is_stable() {
        let graph = Graph::from_edges([(0, 1), (0, 2), (1, 2)]).unwrap();
        let analysis = analyze(&graph, 0.5, Some(0.1));
        assert!(analysis.added_edges.is_empty());
        assert!(analysis.is_pairwise_stable());
        assert_eq!(analysis.best_addition, None);
    }

    #[test]
    fn removal_deltas_use_current_minus_hypothetical() {
        let graph = Graph::from_edges([(0, 1)]).unwrap();
        let analysis = analyze(&graph, 0.5, Some(0.7));
        let stat = &analysis.existing_edges[&edge(0, 1)];
        assert_eq!(stat.change, EdgeChange::Removal);
        // Keeping the edge gives 0.5 - 0.7 per endpoint
        assert!((stat.total_diff + 0.4).abs() < 1e-12);
        assert!(!stat.net_supported);
        assert!(!stat.pair_supported);
    }

    #[test]
    fn degenerate_graphs_produce_empty_maps() {
        for graph in [Graph::new(), Graph::empty(1)] {
            let analysis = analyze(&graph, 0.5, Some(0.5));
            assert!(analysis.added_edges.is_empty());
            assert!(analysis.existing_edges.is_empty());
            assert_eq!(analysis.best_addition, None);
            assert_eq!(analysis.total_utility(), 0.0);
        }
    }

    #[test]
    fn reports_list_existing_then_candidates() {
        let mut graph = Graph::from_edges([(1, 2)]).unwrap();
        graph.add_node(NodeId::new(0));
        let reports = analyze(&graph, 0.5, Some(0.1)).edge_reports();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].edge, edge(1, 2));
        assert_eq!(reports[0].change, EdgeChange::Removal);
        assert!(
            reports[1..]
                .iter()
                .all(|report| report.change == EdgeChange::Addition)
        );
    }
}
