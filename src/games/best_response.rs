//! Best-response checks for binary-action peer-influence games
//!
//! Each node picks action 0 or 1. Given its neighbors' current actions the
//! node's payoff for either action is computed, and the node is flagged
//! optimal when its current action is strictly better than the other one.
//! Payoffs depend on neighbors, so every event triggers a full
//! recomputation of the board.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    graph::{Graph, NodeId},
};

/// Binary action of a node. Serialised as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Action {
    Passive,
    Active,
}

impl Action {
    pub fn toggled(self) -> Self {
        match self {
            Action::Passive => Action::Active,
            Action::Active => Action::Passive,
        }
    }
}

impl From<Action> for u8 {
    fn from(action: Action) -> Self {
        match action {
            Action::Passive => 0,
            Action::Active => 1,
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Action::Passive),
            1 => Ok(Action::Active),
            other => Err(Error::InvalidAction { value: other }),
        }
    }
}

/// Payoff structure of the game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameVariant {
    /// Any active neighbor already grants the passive payoff of 1;
    /// acting yourself pays 0.5.
    Substitutes,
    /// Acting pays `active_neighbors - threshold + 0.5`.
    Complements { threshold: f64 },
    /// Acting pays +1 when the active share of neighbors exceeds
    /// `threshold`, otherwise -1.
    Coordination { threshold: f64 },
}

impl GameVariant {
    /// `(util_0, util_1)` for a node with `active` active neighbors out of
    /// `degree`.
    pub fn payoffs(&self, active: usize, degree: usize) -> (f64, f64) {
        match *self {
            GameVariant::Substitutes => (active.min(1) as f64, 0.5),
            GameVariant::Complements { threshold } => (0.0, active as f64 - threshold + 0.5),
            GameVariant::Coordination { threshold } => {
                let util_1 = if active as f64 > threshold * degree as f64 {
                    1.0
                } else {
                    -1.0
                };
                (0.0, util_1)
            }
        }
    }

    pub fn kind(&self) -> VariantKind {
        match self {
            GameVariant::Substitutes => VariantKind::Substitutes,
            GameVariant::Complements { .. } => VariantKind::Complements,
            GameVariant::Coordination { .. } => VariantKind::Coordination,
        }
    }
}

/// Variant name without its parameter, for parsing user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    Substitutes,
    Complements,
    Coordination,
}

impl VariantKind {
    pub fn with_threshold(self, threshold: f64) -> GameVariant {
        match self {
            VariantKind::Substitutes => GameVariant::Substitutes,
            VariantKind::Complements => GameVariant::Complements { threshold },
            VariantKind::Coordination => GameVariant::Coordination { threshold },
        }
    }

    /// Threshold used by the dashboards when none is given.
    pub fn default_threshold(self) -> f64 {
        match self {
            VariantKind::Substitutes => 0.0,
            VariantKind::Complements => 2.0,
            VariantKind::Coordination => 0.5,
        }
    }

    /// Action every node starts with: the coordination board starts fully
    /// active, the others fully passive.
    pub fn initial_action(self) -> Action {
        match self {
            VariantKind::Coordination => Action::Active,
            VariantKind::Substitutes | VariantKind::Complements => Action::Passive,
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VariantKind::Substitutes => "substitute",
            VariantKind::Complements => "complement",
            VariantKind::Coordination => "coordination",
        };
        f.write_str(label)
    }
}

impl FromStr for VariantKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sub" | "substitute" | "substitutes" => Ok(VariantKind::Substitutes),
            "comp" | "complement" | "complements" => Ok(VariantKind::Complements),
            "coord" | "coordination" | "cohesion" => Ok(VariantKind::Coordination),
            _ => Err(Error::ParseVariant {
                input: s.to_string(),
                expected: "substitute, complement, coordination".to_string(),
            }),
        }
    }
}

/// Per-node state of a game board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeGameState {
    pub action: Action,
    pub util_0: f64,
    pub util_1: f64,
    pub optimal: bool,
}

impl NodeGameState {
    fn unevaluated(action: Action) -> Self {
        Self {
            action,
            util_0: 0.0,
            util_1: 0.0,
            optimal: false,
        }
    }
}

/// Current action strictly beats the alternative. Ties are never optimal.
pub fn is_optimal(action: Action, util_0: f64, util_1: f64) -> bool {
    match action {
        Action::Active => util_1 > util_0,
        Action::Passive => util_1 < util_0,
    }
}

/// External trigger for [`GameBoard::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Flip the action of one node
    Toggle(NodeId),
    /// Parameters changed; recompute payoffs only
    Recompute,
}

/// A graph with one action per node and the derived payoffs.
#[derive(Debug, Clone, PartialEq)]
pub struct GameBoard {
    graph: Graph,
    states: BTreeMap<NodeId, NodeGameState>,
}

impl GameBoard {
    /// Every node starts with `initial` and payoffs are evaluated under
    /// `variant`.
    pub fn new(graph: Graph, initial: Action, variant: &GameVariant) -> Self {
        let states = graph
            .nodes()
            .map(|node| (node, NodeGameState::unevaluated(initial)))
            .collect();
        Self { graph, states }.evaluate(variant)
    }

    /// Rebuild a board from stored node states. Nodes without a state are
    /// rejected, and stored payoffs are taken as they are.
    pub fn from_parts(graph: Graph, states: BTreeMap<NodeId, NodeGameState>) -> Result<Self> {
        if let Some(node) = graph.nodes().find(|node| !states.contains_key(node)) {
            return Err(Error::UnknownNode { node });
        }
        if let Some(&node) = states.keys().find(|&&node| !graph.contains_node(node)) {
            return Err(Error::UnknownNode { node });
        }
        Ok(Self { graph, states })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn states(&self) -> &BTreeMap<NodeId, NodeGameState> {
        &self.states
    }

    pub fn state(&self, node: NodeId) -> Option<&NodeGameState> {
        self.states.get(&node)
    }

    pub fn action(&self, node: NodeId) -> Option<Action> {
        self.states.get(&node).map(|state| state.action)
    }

    fn active_neighbors(&self, node: NodeId) -> usize {
        self.graph
            .neighbors(node)
            .filter(|neighbor| self.action(*neighbor) == Some(Action::Active))
            .count()
    }

    /// Recompute payoffs and optimality of every node from the current
    /// action assignment.
    pub fn evaluate(&self, variant: &GameVariant) -> Self {
        let states = self
            .states
            .iter()
            .map(|(&node, state)| {
                let (util_0, util_1) =
                    variant.payoffs(self.active_neighbors(node), self.graph.degree(node));
                let next = NodeGameState {
                    action: state.action,
                    util_0,
                    util_1,
                    optimal: is_optimal(state.action, util_0, util_1),
                };
                (node, next)
            })
            .collect();
        Self {
            graph: self.graph.clone(),
            states,
        }
    }

    /// Apply one event and return the fully re-evaluated board.
    pub fn step(&self, variant: &GameVariant, event: GameEvent) -> Result<Self> {
        let mut board = self.clone();
        if let GameEvent::Toggle(node) = event {
            let state = board
                .states
                .get_mut(&node)
                .ok_or(Error::UnknownNode { node })?;
            state.action = state.action.toggled();
        }
        let board = board.evaluate(variant);
        debug!(
            ?event,
            optimal = board.optimal_count(),
            nodes = board.states.len(),
            "best responses recomputed"
        );
        Ok(board)
    }

    pub fn optimal_count(&self) -> usize {
        self.states.values().filter(|state| state.optimal).count()
    }

    /// Every node is playing a strict best response.
    pub fn is_equilibrium(&self) -> bool {
        self.states.values().all(|state| state.optimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(i: usize) -> NodeId {
        NodeId::new(i)
    }

    fn star(leaves: usize) -> Graph {
        Graph::from_edges((1..=leaves).map(|leaf| (0, leaf))).unwrap()
    }

    #[test]
    fn ties_are_never_optimal() {
        assert!(!is_optimal(Action::Active, 0.5, 0.5));
        assert!(!is_optimal(Action::Passive, 0.5, 0.5));
        assert!(is_optimal(Action::Active, 0.0, 0.5));
        assert!(is_optimal(Action::Passive, 1.0, 0.5));
    }

    #[test]
    fn substitutes_star_with_active_center_is_equilibrium() {
        let variant = GameVariant::Substitutes;
        let board = GameBoard::new(star(3), Action::Passive, &variant);
        // Nobody active: acting (0.5) beats free riding (0) everywhere
        assert_eq!(board.optimal_count(), 0);

        let board = board.step(&variant, GameEvent::Toggle(node(0))).unwrap();
        assert!(board.is_equilibrium());
        let center = board.state(node(0)).unwrap();
        assert_eq!((center.util_0, center.util_1), (0.0, 0.5));
        let leaf = board.state(node(1)).unwrap();
        assert_eq!((leaf.util_0, leaf.util_1), (1.0, 0.5));
    }

    #[test]
    fn complements_payoff_counts_active_neighbors() {
        let variant = GameVariant::Complements { threshold: 2.0 };
        let mut board = GameBoard::new(star(3), Action::Passive, &variant);
        for leaf in 1..=3 {
            board = board.step(&variant, GameEvent::Toggle(node(leaf))).unwrap();
        }
        let center = board.state(node(0)).unwrap();
        assert_eq!(center.util_1, 3.0 - 2.0 + 0.5);
        assert!(!center.optimal);
        let leaf = board.state(node(1)).unwrap();
        assert_eq!(leaf.util_1, -1.5);
        assert!(!leaf.optimal);
    }

    #[test]
    fn coordination_uses_strict_fraction() {
        let variant = GameVariant::Coordination { threshold: 0.5 };
        assert_eq!(variant.payoffs(1, 2), (0.0, -1.0));
        assert_eq!(variant.payoffs(2, 3), (0.0, 1.0));
        // Isolated nodes never clear the threshold
        assert_eq!(variant.payoffs(0, 0), (0.0, -1.0));
    }

    #[test]
    fn toggle_twice_restores_board() {
        let variant = GameVariant::Complements { threshold: 1.0 };
        let board = GameBoard::new(star(2), Action::Passive, &variant);
        let flipped = board.step(&variant, GameEvent::Toggle(node(2))).unwrap();
        assert_ne!(flipped, board);
        let restored = flipped.step(&variant, GameEvent::Toggle(node(2))).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn recompute_follows_new_variant() {
        let board = GameBoard::new(star(2), Action::Active, &GameVariant::Substitutes);
        let board = board
            .step(&GameVariant::Complements { threshold: 1.0 }, GameEvent::Recompute)
            .unwrap();
        assert_eq!(board.state(node(0)).unwrap().util_1, 1.5);
        assert_eq!(board.action(node(0)), Some(Action::Active));
    }

    #[test]
    fn toggling_unknown_node_fails() {
        let board = GameBoard::new(star(2), Action::Passive, &GameVariant::Substitutes);
        let err = board
            .step(&GameVariant::Substitutes, GameEvent::Toggle(node(9)))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownNode { .. }));
    }

    #[test]
    fn action_rejects_out_of_range_values() {
        assert_eq!(Action::try_from(1u8).unwrap(), Action::Active);
        assert!(matches!(
            Action::try_from(2u8),
            Err(Error::InvalidAction { value: 2 })
        ));
    }

    #[test]
    fn parse_variant_names() {
        assert_eq!(
            "comp".parse::<VariantKind>().unwrap(),
            VariantKind::Complements
        );
        assert_eq!(
            "Coordination".parse::<VariantKind>().unwrap(),
            VariantKind::Coordination
        );
        assert!("bogus".parse::<VariantKind>().is_err());
    }

    #[test]
    fn initial_action_follows_variant() {
        assert_eq!(VariantKind::Substitutes.initial_action(), Action::Passive);
        assert_eq!(VariantKind::Complements.initial_action(), Action::Passive);
        assert_eq!(VariantKind::Coordination.initial_action(), Action::Active);
    }
}
