//! Export of learning runs for plotting
//!
//! Currently supports CSV export of per-node belief time series.

mod beliefs_csv;

pub use beliefs_csv::{BeliefRecord, belief_records, write_beliefs, write_beliefs_csv};
