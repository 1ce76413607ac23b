//! Distance-decay utility of the symmetric connections model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId};

/// Per-node utility. Always recomputed from scratch, never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtilityMap(BTreeMap<NodeId, f64>);

impl UtilityMap {
    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.0.get(&node).copied()
    }

    /// Sum over all nodes, accumulated in ascending node order.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.0.iter().map(|(&node, &value)| (node, value))
    }

    /// Node-wise `self - other` over the nodes of `self`.
    pub fn difference(&self, other: &UtilityMap) -> UtilityMap {
        self.iter()
            .map(|(node, value)| (node, value - other.get(node).unwrap_or(0.0)))
            .collect()
    }
}

impl FromIterator<(NodeId, f64)> for UtilityMap {
    fn from_iter<I: IntoIterator<Item = (NodeId, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Utility of every node under the connections model.
///
/// Each unordered pair of distinct nodes joined by some path contributes
/// `delta^d` to both endpoints, where `d` is the shortest path length in
/// edges. Unreachable pairs contribute nothing. When `cost` is `Some(c)`,
/// every node then pays `c * degree`; `None` disables the cost term.
pub fn compute_utility(graph: &Graph, delta: f64, cost: Option<f64>) -> UtilityMap {
    let mut util: BTreeMap<NodeId, f64> = graph.nodes().map(|node| (node, 0.0)).collect();

    for source in graph.nodes() {
        for (target, hops) in graph.hop_distances(source).range(source..).skip(1) {
            let benefit = delta.powi(*hops as i32);
            *util.entry(source).or_default() += benefit;
            *util.entry(*target).or_default() += benefit;
        }
    }

    if let Some(cost) = cost {
        for (node, value) in util.iter_mut() {
            *value -= cost * graph.degree(*node) as f64;
        }
    }

    UtilityMap(util)
}
