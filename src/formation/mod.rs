//! Network formation under the symmetric connections model
//!
//! A node benefits from every other node it can reach, discounted by
//! `delta` per hop, and pays a linear cost per incident edge.
//!
//! ## Components
//!
//! - [`utility`]: per-node utility from shortest-path distances
//! - [`analyzer`]: exhaustive single-edge addition/removal analysis
//! - [`bound`]: closed-form maximum total utility
//!
//! ## Usage Example
//!
//! ```
//! use netgames::formation::{analyze, max_utility};
//! use netgames::graph::Graph;
//!
//! let graph = Graph::from_edges([(0, 1), (1, 2)]).unwrap();
//! let analysis = analyze(&graph, 0.5, Some(0.1));
//! assert_eq!(analysis.existing_edges.len(), 2);
//! assert!(analysis.total_utility() <= max_utility(3, 0.5, 0.1));
//! ```

pub mod analyzer;
pub mod bound;
pub mod utility;

pub use analyzer::{EdgeChange, EdgeReport, EdgeStat, NetworkAnalysis, analyze};
pub use bound::max_utility;
pub use utility::{UtilityMap, compute_utility};
