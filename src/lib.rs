//! Strategic equilibria on graphs
//!
//! This crate provides:
//! - Graph model with deterministic ordering and BFS hop distances
//! - Network formation under the symmetric connections model, with
//!   perturbation analysis of every single-link change
//! - Closed-form bound on the best achievable total utility
//! - Best-response games (substitutes, complements, coordination) and the
//!   repeated favor-exchange game
//! - Observational learning of a two-armed bandit on a network
//! - Node-link JSON exchange and CSV export for plotting shells

pub mod cli;
pub mod config;
pub mod error;
pub mod exchange;
pub mod export;
pub mod formation;
pub mod games;
pub mod graph;
pub mod learning;
pub mod networks;

pub use error::{Error, Result};
pub use graph::{Edge, Graph, NodeId};
