//! Parameter sets for the four engines
//!
//! Defaults match the values the interactive dashboards start with. A
//! [`NetgamesConfig`] can be read from a JSON file; every section and field
//! is optional there and falls back to its default.
//!
//! # Examples
//!
//! ```
//! use netgames::config::LearningConfig;
//!
//! let config = LearningConfig::default()
//!     .with_prob(0.7)
//!     .with_episodes(250)
//!     .with_seed(3);
//! assert!(config.validate().is_ok());
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result, check_probability},
    games::{FavorParams, GameVariant, VariantKind},
    learning::{DEFAULT_EPISODES, NodeParams},
    networks::Preset,
};

/// Network formation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// Size of the starting empty network
    pub nodes: usize,
    /// Decay of benefit per hop
    pub delta: f64,
    /// Per-link cost; `None` disables the cost term
    pub cost: Option<f64>,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            nodes: 4,
            delta: 0.5,
            cost: Some(0.5),
        }
    }
}

impl FormationConfig {
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_cost(mut self, cost: Option<f64>) -> Self {
        self.cost = cost;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.delta.is_finite() {
            return Err(Error::InvalidParameter {
                name: "delta",
                value: self.delta,
                reason: "decay must be finite",
            });
        }
        if let Some(cost) = self.cost
            && !cost.is_finite()
        {
            return Err(Error::InvalidParameter {
                name: "cost",
                value: cost,
                reason: "link cost must be finite",
            });
        }
        Ok(())
    }
}

/// Favor-exchange parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavorConfig {
    pub prob: f64,
    pub value: f64,
    pub cost: f64,
    pub delta: f64,
}

impl Default for FavorConfig {
    fn default() -> Self {
        Self {
            prob: 0.1,
            value: 0.9,
            cost: 0.5,
            delta: 0.9,
        }
    }
}

impl FavorConfig {
    pub fn with_prob(mut self, prob: f64) -> Self {
        self.prob = prob;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn params(&self) -> FavorParams {
        FavorParams {
            delta: self.delta,
            prob: self.prob,
            value: self.value,
            cost: self.cost,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.params().validate()
    }
}

/// Best-response game parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub preset: Preset,
    pub variant: VariantKind,
    /// Falls back to the variant's usual threshold when unset
    pub threshold: Option<f64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            preset: Preset::Eleven,
            variant: VariantKind::Complements,
            threshold: None,
        }
    }
}

impl GameConfig {
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_variant(mut self, variant: VariantKind) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
            .unwrap_or_else(|| self.variant.default_threshold())
    }

    pub fn game_variant(&self) -> GameVariant {
        self.variant.with_threshold(self.threshold())
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.threshold();
        if !threshold.is_finite() {
            return Err(Error::InvalidParameter {
                name: "threshold",
                value: threshold,
                reason: "threshold must be finite",
            });
        }
        Ok(())
    }
}

/// Observational learning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Probability that the risky arm pays out
    pub prob: f64,
    pub nodes: usize,
    /// Link probability of the random network
    pub edge_prob: f64,
    pub episodes: usize,
    pub seed: Option<u64>,
    /// Parameters applied to every node
    pub node_params: NodeParams,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            prob: 0.5,
            nodes: 4,
            edge_prob: 0.5,
            episodes: DEFAULT_EPISODES,
            seed: None,
            node_params: NodeParams::default(),
        }
    }
}

impl LearningConfig {
    pub fn with_prob(mut self, prob: f64) -> Self {
        self.prob = prob;
        self
    }

    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_edge_prob(mut self, edge_prob: f64) -> Self {
        self.edge_prob = edge_prob;
        self
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_node_params(mut self, node_params: NodeParams) -> Self {
        self.node_params = node_params;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_probability(self.prob)?;
        check_probability(self.edge_prob)?;
        self.node_params.validate()
    }
}

/// All engine configurations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetgamesConfig {
    pub formation: FormationConfig,
    pub favor: FavorConfig,
    pub game: GameConfig,
    pub learning: LearningConfig,
}

impl NetgamesConfig {
    /// Read and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.formation.validate()?;
        self.favor.validate()?;
        self.game.validate()?;
        self.learning.validate()
    }
}
