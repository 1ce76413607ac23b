//! Observational learning on a network of bandit players
//!
//! Every episode each node pulls one arm (ε-greedy on its own estimates)
//! and then updates its estimates from its own outcome and from the
//! outcomes its neighbors got in the same episode. A neighbor's outcome is
//! treated exactly like an extra trial of that arm by the node itself.
//!
//! All pulls of an episode are drawn before any node updates, so every
//! node sees the same set of episode outcomes regardless of update order.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::{Error, Result, check_probability},
    graph::{Graph, NodeId},
    learning::{
        bandit::{Arm, ArmTable, RISKY_PAYOUT, SAFE_PAYOUT, draw_reward},
        observer::{NoopObserver, TrainingObserver},
    },
};

/// Default number of episodes per run.
pub const DEFAULT_EPISODES: usize = 1000;

/// Per-node learning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeParams {
    /// Initial belief that the risky arm pays; seeds its estimate at
    /// `2 * prior_belief`
    pub prior_belief: f64,
    /// Probability of exploring with a uniformly random arm
    pub greedy: f64,
}

impl Default for NodeParams {
    fn default() -> Self {
        Self {
            prior_belief: 0.0,
            greedy: 0.05,
        }
    }
}

impl NodeParams {
    pub fn new(prior_belief: f64, greedy: f64) -> Self {
        Self {
            prior_belief,
            greedy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_probability(self.prior_belief)?;
        check_probability(self.greedy)?;
        Ok(())
    }
}

/// Default parameters for every node of `graph`.
pub fn default_node_params(graph: &Graph) -> BTreeMap<NodeId, NodeParams> {
    graph
        .nodes()
        .map(|node| (node, NodeParams::default()))
        .collect()
}

/// Learning state and full history of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanditNodeState {
    /// Sample-mean payout estimate per arm
    pub estimates: ArmTable<f64>,
    /// Number of observations folded into each estimate
    pub tries: ArmTable<u64>,
    /// Arm pulled in each episode
    pub actions: Vec<Arm>,
    /// Payout received in each episode
    pub outcomes: Vec<f64>,
    /// Belief that the risky arm pays, recorded after each episode
    pub beliefs: Vec<f64>,
}

impl BanditNodeState {
    pub fn new(params: &NodeParams) -> Self {
        Self {
            estimates: ArmTable::new(SAFE_PAYOUT, RISKY_PAYOUT * params.prior_belief),
            tries: ArmTable::default(),
            actions: Vec::new(),
            outcomes: Vec::new(),
            beliefs: Vec::new(),
        }
    }

    /// Fold one observed payout of `arm` into the running mean.
    pub fn observe(&mut self, arm: Arm, outcome: f64) {
        let tries = self.tries.get_mut(arm);
        *tries += 1;
        let count = *tries as f64;
        let estimate = self.estimates.get_mut(arm);
        *estimate += (outcome - *estimate) / count;
    }

    /// Implied probability that the risky arm pays.
    pub fn belief(&self) -> f64 {
        self.estimates.risky / RISKY_PAYOUT
    }

    pub fn last_pull(&self) -> Option<(Arm, f64)> {
        Some((*self.actions.last()?, *self.outcomes.last()?))
    }

    fn choose_arm<R: Rng + ?Sized>(&self, greedy: f64, rng: &mut R) -> Arm {
        if rng.random::<f64>() < greedy {
            Arm::ALL[rng.random_range(0..Arm::ALL.len())]
        } else {
            self.estimates.greedy_arm()
        }
    }
}

/// Graph plus the per-node histories of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningRun {
    graph: Graph,
    states: BTreeMap<NodeId, BanditNodeState>,
}

impl LearningRun {
    /// Reassemble a run, e.g. after decoding exchange data. Every node
    /// needs a state and every state a node, and each state must record
    /// one action, outcome and belief per episode.
    pub fn from_parts(graph: Graph, states: BTreeMap<NodeId, BanditNodeState>) -> Result<Self> {
        if let Some(node) = graph.nodes().find(|node| !states.contains_key(node)) {
            return Err(Error::UnknownNode { node });
        }
        if let Some(&node) = states.keys().find(|&&node| !graph.contains_node(node)) {
            return Err(Error::UnknownNode { node });
        }
        for (&node, state) in &states {
            let (actions, outcomes, beliefs) =
                (state.actions.len(), state.outcomes.len(), state.beliefs.len());
            if actions != outcomes || actions != beliefs {
                return Err(Error::InconsistentHistory {
                    node,
                    actions,
                    outcomes,
                    beliefs,
                });
            }
        }
        Ok(Self { graph, states })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn states(&self) -> &BTreeMap<NodeId, BanditNodeState> {
        &self.states
    }

    pub fn state(&self, node: NodeId) -> Option<&BanditNodeState> {
        self.states.get(&node)
    }

    /// Belief time series of `node`, one entry per episode.
    pub fn belief_series(&self, node: NodeId) -> Option<&[f64]> {
        self.states.get(&node).map(|state| state.beliefs.as_slice())
    }

    pub fn final_beliefs(&self) -> BTreeMap<NodeId, f64> {
        self.states
            .iter()
            .map(|(&node, state)| (node, state.belief()))
            .collect()
    }

    pub fn episodes(&self) -> usize {
        self.states
            .values()
            .map(|state| state.beliefs.len())
            .max()
            .unwrap_or(0)
    }
}

/// Seeded generator, or one drawn from OS entropy when `seed` is `None`.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Runs observational learning episodes on a graph.
#[derive(Debug, Clone)]
pub struct BanditTrainer {
    prior_prob: f64,
    episodes: usize,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl BanditTrainer {
    /// `prior_prob` is the true success probability of the risky arm.
    pub fn new(prior_prob: f64, episodes: usize) -> Result<Self> {
        check_probability(prior_prob)?;
        Ok(Self {
            prior_prob,
            episodes,
            rng: build_rng(None),
            rng_seed: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng_seed
    }

    pub fn train(
        &mut self,
        graph: &Graph,
        params: &BTreeMap<NodeId, NodeParams>,
    ) -> Result<LearningRun> {
        self.train_observed(graph, params, &mut NoopObserver)
    }

    pub fn train_observed(
        &mut self,
        graph: &Graph,
        params: &BTreeMap<NodeId, NodeParams>,
        observer: &mut dyn TrainingObserver,
    ) -> Result<LearningRun> {
        let mut node_params = BTreeMap::new();
        for node in graph.nodes() {
            let node_param = params
                .get(&node)
                .ok_or(Error::MissingNodeParams { node })?;
            node_param.validate()?;
            node_params.insert(node, *node_param);
        }

        let mut states: BTreeMap<NodeId, BanditNodeState> = node_params
            .iter()
            .map(|(&node, node_param)| (node, BanditNodeState::new(node_param)))
            .collect();

        info!(
            nodes = states.len(),
            episodes = self.episodes,
            prior_prob = self.prior_prob,
            seed = ?self.rng_seed,
            "starting observational learning run"
        );
        observer.on_training_start(self.episodes, states.len())?;

        for episode in 0..self.episodes {
            let mut pulls = BTreeMap::new();
            for (node, state) in states.iter_mut() {
                let arm = state.choose_arm(node_params[node].greedy, &mut self.rng);
                let outcome = draw_reward(arm, self.prior_prob, &mut self.rng)?;
                state.actions.push(arm);
                state.outcomes.push(outcome);
                pulls.insert(*node, (arm, outcome));
            }

            for (node, state) in states.iter_mut() {
                let (arm, outcome) = pulls[node];
                state.observe(arm, outcome);
                for neighbor in graph.neighbors(*node) {
                    let (arm, outcome) = pulls[&neighbor];
                    state.observe(arm, outcome);
                }
                state.beliefs.push(state.belief());
            }

            observer.on_episode_end(episode, &states)?;
        }

        let run = LearningRun {
            graph: graph.clone(),
            states,
        };
        debug!(beliefs = ?run.final_beliefs(), "observational learning run complete");
        observer.on_training_end(&run)?;
        Ok(run)
    }
}

/// One unseeded run of `episodes` episodes.
pub fn train(
    prior_prob: f64,
    graph: &Graph,
    params: &BTreeMap<NodeId, NodeParams>,
    episodes: usize,
) -> Result<LearningRun> {
    BanditTrainer::new(prior_prob, episodes)?.train(graph, params)
}
