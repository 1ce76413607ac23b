//! Common test utilities for the netgames test suite.

#![allow(dead_code)]

use netgames::{
    graph::{Edge, Graph, NodeId},
    networks::gnp_random,
};
use rand::{SeedableRng, rngs::StdRng};

/// Seeded G(n, p) graph.
pub fn random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    gnp_random(n, p, &mut rng).unwrap()
}

/// Copy of `graph` with node `i` renamed to `mapping[i]`.
pub fn relabel(graph: &Graph, mapping: &[usize]) -> Graph {
    let mut relabeled = Graph::new();
    for node in graph.nodes() {
        relabeled.add_node(NodeId::new(mapping[node.index()]));
    }
    for edge in graph.edges() {
        let (u, v) = edge.endpoints();
        relabeled.add_edge(Edge::pair(mapping[u.index()], mapping[v.index()]).unwrap());
    }
    relabeled
}

/// Every pair of `0..n` linked.
pub fn complete_graph(n: usize) -> Graph {
    let mut graph = Graph::empty(n);
    for u in 0..n {
        for v in u + 1..n {
            graph.connect(u, v).unwrap();
        }
    }
    graph
}

/// Node 0 linked to every other node of `0..n`.
pub fn star_graph(n: usize) -> Graph {
    let mut graph = Graph::empty(n);
    for v in 1..n {
        graph.connect(0, v).unwrap();
    }
    graph
}
