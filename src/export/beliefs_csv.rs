//! CSV export of belief time series
//!
//! One row per node per episode, in long format:
//!
//! ```text
//! episode,node,belief
//! 0,0,0.5
//! 0,1,0.25
//! ```

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::{
    error::{Error, Result},
    graph::NodeId,
    learning::LearningRun,
};

/// A single row of the belief export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeliefRecord {
    pub episode: usize,
    pub node: NodeId,
    pub belief: f64,
}

/// Rows ordered by episode, then node.
pub fn belief_records(run: &LearningRun) -> Vec<BeliefRecord> {
    let mut records = Vec::with_capacity(run.episodes() * run.states().len());
    for episode in 0..run.episodes() {
        for (&node, state) in run.states() {
            if let Some(&belief) = state.beliefs.get(episode) {
                records.push(BeliefRecord {
                    episode,
                    node,
                    belief,
                });
            }
        }
    }
    records
}

/// Write the header and every row to `writer`; returns the row count.
pub fn write_beliefs<W: Write>(run: &LearningRun, mut writer: W) -> Result<usize> {
    writeln!(writer, "episode,node,belief")?;
    let records = belief_records(run);
    for record in &records {
        writeln!(
            writer,
            "{},{},{}",
            record.episode, record.node, record.belief
        )?;
    }
    writer.flush()?;
    Ok(records.len())
}

/// Export `run` to a CSV file at `path`.
pub fn write_beliefs_csv(run: &LearningRun, path: &Path) -> Result<usize> {
    let file = File::create(path).map_err(|source| Error::Io {
        operation: format!("create {}", path.display()),
        source,
    })?;
    write_beliefs(run, BufWriter::new(file))
}
