//! Output formatting and progress bars for CLI

use std::collections::BTreeMap;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::{
    Result,
    graph::NodeId,
    learning::{BanditNodeState, LearningRun, TrainingObserver},
};

/// Progress bar over learning episodes showing the mean belief.
#[derive(Default)]
pub struct LearningProgress {
    progress_bar: Option<ProgressBar>,
}

impl LearningProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

fn mean_belief(states: &BTreeMap<NodeId, BanditNodeState>) -> f64 {
    if states.is_empty() {
        return 0.0;
    }
    states.values().map(BanditNodeState::belief).sum::<f64>() / states.len() as f64
}

impl TrainingObserver for LearningProgress {
    fn on_training_start(&mut self, episodes: usize, _nodes: usize) -> Result<()> {
        let pb = ProgressBar::new(episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(
        &mut self,
        episode: usize,
        states: &BTreeMap<NodeId, BanditNodeState>,
    ) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("mean belief {:.3}", mean_belief(states)));
        }
        Ok(())
    }

    fn on_training_end(&mut self, run: &LearningRun) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("mean belief {:.3}", mean_belief(run.states())));
        }
        Ok(())
    }
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn format_utility(value: f64) -> String {
    format!("{value:.4}")
}
