//! Observer port for learning runs
//!
//! A shell that wants to follow a long run (progress bars, live charts)
//! implements [`TrainingObserver`] instead of polling the trainer.
//!
//! # Event Sequence
//!
//! 1. `on_training_start(episodes, nodes)` - once
//! 2. `on_episode_end(episode, states)` - after every episode's updates
//! 3. `on_training_end(run)` - once, with the finished run

use std::collections::BTreeMap;

use crate::{
    Result,
    graph::NodeId,
    learning::observational::{BanditNodeState, LearningRun},
};

pub trait TrainingObserver {
    fn on_training_start(&mut self, _episodes: usize, _nodes: usize) -> Result<()> {
        Ok(())
    }

    /// `episode` is 0-based.
    fn on_episode_end(
        &mut self,
        _episode: usize,
        _states: &BTreeMap<NodeId, BanditNodeState>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_training_end(&mut self, _run: &LearningRun) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TrainingObserver for NoopObserver {}

/// Records the mean belief across nodes after every episode.
#[derive(Debug, Clone, Default)]
pub struct MeanBeliefObserver {
    means: Vec<f64>,
}

impl MeanBeliefObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }
}

impl TrainingObserver for MeanBeliefObserver {
    fn on_training_start(&mut self, episodes: usize, _nodes: usize) -> Result<()> {
        self.means = Vec::with_capacity(episodes);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        _episode: usize,
        states: &BTreeMap<NodeId, BanditNodeState>,
    ) -> Result<()> {
        if states.is_empty() {
            self.means.push(0.0);
            return Ok(());
        }
        let sum: f64 = states.values().map(BanditNodeState::belief).sum();
        self.means.push(sum / states.len() as f64);
        Ok(())
    }
}
