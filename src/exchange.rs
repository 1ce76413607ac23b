//! Node-link exchange format
//!
//! The layout follows the node-link JSON used by networkx, so graphs can be
//! handed to a rendering shell and read back without loss:
//!
//! ```json
//! {
//!   "directed": false,
//!   "multigraph": false,
//!   "graph": {},
//!   "nodes": [{"id": 0, "action": 1, "util_0": 0.0, "util_1": 0.5, "optimal": true}],
//!   "links": [{"source": 0, "target": 1}]
//! }
//! ```
//!
//! Node attributes are flattened next to `id`. Which attributes are present
//! depends on the engine that produced the graph.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    error::{Error, Result},
    games::{GameBoard, NodeGameState},
    graph::{Edge, Graph, NodeId},
    learning::{BanditNodeState, LearningRun},
};

/// Attribute record for plain graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoAttributes {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord<A> {
    pub id: NodeId,
    #[serde(flatten)]
    pub attributes: A,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub source: NodeId,
    pub target: NodeId,
}

/// Graph with per-node attributes of type `A`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkData<A> {
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub multigraph: bool,
    #[serde(default)]
    pub graph: serde_json::Map<String, serde_json::Value>,
    pub nodes: Vec<NodeRecord<A>>,
    pub links: Vec<LinkRecord>,
}

impl<A> NodeLinkData<A> {
    /// Encode `graph`, asking `attributes` for each node's record.
    pub fn from_graph(graph: &Graph, mut attributes: impl FnMut(NodeId) -> A) -> Self {
        Self {
            directed: false,
            multigraph: false,
            graph: serde_json::Map::new(),
            nodes: graph
                .nodes()
                .map(|id| NodeRecord {
                    id,
                    attributes: attributes(id),
                })
                .collect(),
            links: graph
                .edges()
                .map(|edge| LinkRecord {
                    source: edge.low(),
                    target: edge.high(),
                })
                .collect(),
        }
    }

    /// Decode into a graph and its attribute map. Duplicate nodes, links to
    /// undeclared nodes and self loops are rejected; repeated links collapse
    /// into one edge.
    pub fn into_parts(self) -> Result<(Graph, BTreeMap<NodeId, A>)> {
        let mut graph = Graph::new();
        let mut attributes = BTreeMap::new();
        for record in self.nodes {
            if !graph.add_node(record.id) {
                return Err(Error::DuplicateNode { node: record.id });
            }
            attributes.insert(record.id, record.attributes);
        }
        for link in self.links {
            for node in [link.source, link.target] {
                if !graph.contains_node(node) {
                    return Err(Error::UnknownNode { node });
                }
            }
            graph.add_edge(Edge::new(link.source, link.target)?);
        }
        Ok((graph, attributes))
    }
}

impl<A: Serialize> NodeLinkData<A> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<A: DeserializeOwned> NodeLinkData<A> {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&Graph> for NodeLinkData<NoAttributes> {
    fn from(graph: &Graph) -> Self {
        Self::from_graph(graph, |_| NoAttributes {})
    }
}

impl TryFrom<NodeLinkData<NoAttributes>> for Graph {
    type Error = Error;

    fn try_from(data: NodeLinkData<NoAttributes>) -> Result<Self> {
        Ok(data.into_parts()?.0)
    }
}

impl From<&GameBoard> for NodeLinkData<NodeGameState> {
    fn from(board: &GameBoard) -> Self {
        let states = board.states();
        Self::from_graph(board.graph(), |node| states[&node])
    }
}

impl TryFrom<NodeLinkData<NodeGameState>> for GameBoard {
    type Error = Error;

    fn try_from(data: NodeLinkData<NodeGameState>) -> Result<Self> {
        let (graph, states) = data.into_parts()?;
        GameBoard::from_parts(graph, states)
    }
}

impl From<&LearningRun> for NodeLinkData<BanditNodeState> {
    fn from(run: &LearningRun) -> Self {
        let states = run.states();
        Self::from_graph(run.graph(), |node| states[&node].clone())
    }
}

impl TryFrom<NodeLinkData<BanditNodeState>> for LearningRun {
    type Error = Error;

    fn try_from(data: NodeLinkData<BanditNodeState>) -> Result<Self> {
        let (graph, states) = data.into_parts()?;
        LearningRun::from_parts(graph, states)
    }
}
