//! Observational learning of a two-armed bandit on a network
//!
//! Nodes repeatedly choose between a safe arm and a risky arm, learning
//! from their own payouts and from what their neighbors received.
//!
//! ## Usage Example
//!
//! ```
//! use netgames::graph::Graph;
//! use netgames::learning::{BanditTrainer, default_node_params};
//!
//! let graph = Graph::from_edges([(0, 1), (1, 2)]).unwrap();
//! let params = default_node_params(&graph);
//! let run = BanditTrainer::new(0.7, 200)
//!     .unwrap()
//!     .with_seed(42)
//!     .train(&graph, &params)
//!     .unwrap();
//! assert_eq!(run.episodes(), 200);
//! ```

pub mod bandit;
pub mod observational;
pub mod observer;

pub use bandit::{Arm, ArmTable, draw_named_reward, draw_reward};
pub use observational::{
    BanditNodeState, BanditTrainer, DEFAULT_EPISODES, LearningRun, NodeParams, build_rng,
    default_node_params, train,
};
pub use observer::{MeanBeliefObserver, NoopObserver, TrainingObserver};
