//! CLI infrastructure for the netgames toolkit
//!
//! This module provides the command-line shell over the engines: formation
//! analysis, favor exchange, best-response games and observational learning.

pub mod commands;
pub mod config;
pub mod output;
