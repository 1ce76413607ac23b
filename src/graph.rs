//! Undirected simple graphs with ordered node identifiers.
//!
//! Every engine in the crate consumes a [`Graph`]. Nodes and adjacency are
//! kept in ordered maps so that iteration, and therefore every derived
//! result, is deterministic across runs.

use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a node in a [`Graph`].
///
/// # Examples
///
/// ```
/// use netgames::graph::NodeId;
///
/// let node = NodeId::new(3);
/// assert_eq!(node.index(), 3);
/// assert_eq!(node.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// An unordered pair of distinct nodes, stored with the smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge(NodeId, NodeId);

impl Edge {
    /// Build a normalised edge. Self loops are rejected.
    pub fn new(u: NodeId, v: NodeId) -> Result<Self> {
        match u.cmp(&v) {
            std::cmp::Ordering::Less => Ok(Self(u, v)),
            std::cmp::Ordering::Greater => Ok(Self(v, u)),
            std::cmp::Ordering::Equal => Err(Error::SelfLoop { node: u }),
        }
    }

    /// Same as [`Edge::new`] for plain indices.
    pub fn pair(u: usize, v: usize) -> Result<Self> {
        Self::new(NodeId(u), NodeId(v))
    }

    pub fn low(&self) -> NodeId {
        self.0
    }

    pub fn high(&self) -> NodeId {
        self.1
    }

    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.0, self.1)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl FromStr for Edge {
    type Err = Error;

    /// Parses `"u-v"`, `"u,v"` or `"(u, v)"`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parse_err = || Error::ParseEdge {
            input: s.to_string(),
        };
        let (u, v) = trimmed
            .split_once('-')
            .or_else(|| trimmed.split_once(','))
            .ok_or_else(parse_err)?;
        let u: usize = u.trim().parse().map_err(|_| parse_err())?;
        let v: usize = v.trim().parse().map_err(|_| parse_err())?;
        Edge::pair(u, v)
    }
}

/// Undirected graph without self loops or multi-edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with nodes `0..n` and no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            adjacency: (0..n).map(|i| (NodeId(i), BTreeSet::new())).collect(),
        }
    }

    /// Build a graph from an edge list. Endpoints are added as needed.
    pub fn from_edges(edges: impl IntoIterator<Item = (usize, usize)>) -> Result<Self> {
        let mut graph = Self::new();
        for (u, v) in edges {
            graph.connect(u, v)?;
        }
        Ok(graph)
    }

    /// Insert a node. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, BTreeSet::new());
        true
    }

    /// Insert an edge, adding missing endpoints. Returns `false` if the edge
    /// already existed.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        let (u, v) = edge.endpoints();
        let inserted = self.adjacency.entry(u).or_default().insert(v);
        self.adjacency.entry(v).or_default().insert(u);
        inserted
    }

    /// Convenience wrapper over [`Edge::pair`] and [`Graph::add_edge`].
    pub fn connect(&mut self, u: usize, v: usize) -> Result<bool> {
        Ok(self.add_edge(Edge::pair(u, v)?))
    }

    /// Remove an edge. Endpoints stay in the graph.
    pub fn remove_edge(&mut self, edge: Edge) -> bool {
        let (u, v) = edge.endpoints();
        let removed = self
            .adjacency
            .get_mut(&u)
            .is_some_and(|neighbors| neighbors.remove(&v));
        if let Some(neighbors) = self.adjacency.get_mut(&v) {
            neighbors.remove(&u);
        }
        removed
    }

    /// Copy of this graph with `edge` added.
    pub fn with_edge(&self, edge: Edge) -> Self {
        let mut graph = self.clone();
        graph.add_edge(edge);
        graph
    }

    /// Copy of this graph with `edge` removed.
    pub fn without_edge(&self, edge: Edge) -> Self {
        let mut graph = self.clone();
        graph.remove_edge(edge);
        graph
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    pub fn contains_edge(&self, edge: Edge) -> bool {
        self.adjacency
            .get(&edge.low())
            .is_some_and(|neighbors| neighbors.contains(&edge.high()))
    }

    /// Nodes in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Neighbors of `node` in ascending order; empty for unknown nodes.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|neighbors| neighbors.iter().copied())
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(&node).map_or(0, BTreeSet::len)
    }

    /// Existing edges in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(&u, neighbors)| {
            neighbors
                .iter()
                .filter(move |&&v| u < v)
                .map(move |&v| Edge(u, v))
        })
    }

    /// All unordered pairs of distinct nodes that are not connected.
    pub fn non_edges(&self) -> Vec<Edge> {
        let nodes: Vec<NodeId> = self.nodes().collect();
        let mut missing = Vec::new();
        for (i, &u) in nodes.iter().enumerate() {
            for &v in &nodes[i + 1..] {
                let edge = Edge(u, v);
                if !self.contains_edge(edge) {
                    missing.push(edge);
                }
            }
        }
        missing
    }

    /// Shortest path length in edges from `source` to every reachable node,
    /// `source` itself included at distance 0.
    pub fn hop_distances(&self, source: NodeId) -> BTreeMap<NodeId, usize> {
        let mut distances = BTreeMap::new();
        if !self.contains_node(source) {
            return distances;
        }
        distances.insert(source, 0);
        let mut queue = VecDeque::from([source]);
        while let Some(node) = queue.pop_front() {
            let next = distances[&node] + 1;
            for neighbor in self.neighbors(node) {
                if !distances.contains_key(&neighbor) {
                    distances.insert(neighbor, next);
                    queue.push_back(neighbor);
                }
            }
        }
        distances
    }
}
