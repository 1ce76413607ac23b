//! Predefined networks and random graph generation

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result, check_probability},
    graph::{Edge, Graph, NodeId},
};

const ELEVEN: &[(usize, usize)] = &[
    (0, 1),
    (1, 2),
    (2, 0),
    (3, 2),
    (4, 2),
    (5, 2),
    (6, 2),
    (7, 6),
    (7, 5),
    (5, 8),
    (5, 9),
    (5, 10),
];

const SIX: &[(usize, usize)] = &[(0, 1), (1, 2), (2, 0), (3, 2), (4, 2), (5, 4), (5, 3)];

const COHESION: &[(usize, usize)] = &[
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 2),
    (1, 4),
    (2, 4),
    (3, 4),
    (2, 5),
    (4, 5),
    (6, 3),
    (7, 5),
    (6, 7),
    (7, 8),
    (6, 9),
    (8, 9),
    (10, 8),
    (10, 9),
    (11, 10),
    (11, 9),
    (11, 8),
];

/// Node count of the favor-exchange networks.
pub const FAVOR_NODES: usize = 7;

const FAVOR_A: &[(usize, usize)] = &[(0, 5), (3, 5), (2, 3), (2, 6), (1, 6), (1, 4), (0, 4)];

const FAVOR_B: &[(usize, usize)] = &[
    (0, 5),
    (2, 3),
    (2, 6),
    (1, 6),
    (1, 4),
    (0, 4),
    (4, 6),
    (3, 6),
    (4, 5),
];

/// Named example networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// 11 nodes with two hubs
    #[default]
    Eleven,
    /// 6 nodes: a triangle and a square sharing node 2
    Six,
    /// 12 nodes in two loosely joined cohesive groups
    Cohesion,
    /// 7-node cycle for the favor-exchange game
    FavorA,
    /// 7 nodes, denser favor-exchange network
    FavorB,
}

impl Preset {
    pub fn edges(self) -> &'static [(usize, usize)] {
        match self {
            Preset::Eleven => ELEVEN,
            Preset::Six => SIX,
            Preset::Cohesion => COHESION,
            Preset::FavorA => FAVOR_A,
            Preset::FavorB => FAVOR_B,
        }
    }

    pub fn graph(self) -> Result<Graph> {
        let mut graph = match self {
            Preset::FavorA | Preset::FavorB => Graph::empty(FAVOR_NODES),
            _ => Graph::new(),
        };
        for &(u, v) in self.edges() {
            graph.add_edge(Edge::pair(u, v)?);
        }
        Ok(graph)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Preset::Eleven => "eleven",
            Preset::Six => "six",
            Preset::Cohesion => "cohesion",
            Preset::FavorA => "favor-a",
            Preset::FavorB => "favor-b",
        };
        f.write_str(label)
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eleven" | "net11" | "11" => Ok(Preset::Eleven),
            "six" | "net6" | "6" => Ok(Preset::Six),
            "cohesion" | "net_coh" | "coh" => Ok(Preset::Cohesion),
            "favor-a" | "favor_a" | "net1" => Ok(Preset::FavorA),
            "favor-b" | "favor_b" | "net2" => Ok(Preset::FavorB),
            _ => Err(Error::ParsePreset {
                input: s.to_string(),
                expected: "eleven, six, cohesion, favor-a, favor-b".to_string(),
            }),
        }
    }
}

/// Erdős–Rényi G(n, p): every pair is linked independently with
/// probability `p`.
pub fn gnp_random<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Result<Graph> {
    let p = check_probability(p)?;
    let mut graph = Graph::empty(n);
    for u in 0..n {
        for v in u + 1..n {
            if rng.random_bool(p) {
                graph.add_edge(Edge::new(NodeId::new(u), NodeId::new(v))?);
            }
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn preset_sizes() {
        let cases = [
            (Preset::Eleven, 11, 12),
            (Preset::Six, 6, 7),
            (Preset::Cohesion, 12, 20),
            (Preset::FavorA, 7, 7),
            (Preset::FavorB, 7, 9),
        ];
        for (preset, nodes, edges) in cases {
            let graph = preset.graph().unwrap();
            assert_eq!(graph.node_count(), nodes, "{preset}");
            assert_eq!(graph.edge_count(), edges, "{preset}");
        }
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in [
            Preset::Eleven,
            Preset::Six,
            Preset::Cohesion,
            Preset::FavorA,
            Preset::FavorB,
        ] {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }
        assert!("twelve".parse::<Preset>().is_err());
    }

    #[test]
    fn gnp_extremes() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(gnp_random(5, 0.0, &mut rng).unwrap().edge_count(), 0);
        assert_eq!(gnp_random(5, 1.0, &mut rng).unwrap().edge_count(), 10);
        assert_eq!(gnp_random(5, 0.3, &mut rng).unwrap().node_count(), 5);
    }

    #[test]
    fn gnp_rejects_bad_probability() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            gnp_random(5, 2.0, &mut rng),
            Err(Error::InvalidProbability { .. })
        ));
    }
}
