//! Peer-influence games on graphs
//!
//! - [`best_response`]: binary-action games (substitutes, complements,
//!   coordination) with per-node best-response checks
//! - [`repeated`]: closed-form payoff of a repeated favor-exchange game

pub mod best_response;
pub mod repeated;

pub use best_response::{
    Action, GameBoard, GameEvent, GameVariant, NodeGameState, VariantKind, is_optimal,
};
pub use repeated::{FavorParams, favor_utility};
