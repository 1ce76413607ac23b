//! Subcommand implementations

pub mod favor;
pub mod formation;
pub mod game;
pub mod learn;
