//! Two-armed bandit used by the observational learning engine
//!
//! Arm `A` always pays 1. Arm `B` pays 2 with probability `prob` and 0
//! otherwise, so it is the better arm exactly when `prob > 0.5`.

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, check_probability};

/// Payout of the safe arm.
pub const SAFE_PAYOUT: f64 = 1.0;
/// Payout of the risky arm when it succeeds.
pub const RISKY_PAYOUT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Arm {
    /// Deterministic arm
    #[serde(rename = "A")]
    Safe,
    /// Stochastic arm
    #[serde(rename = "B")]
    Risky,
}

impl Arm {
    /// Fixed arm order, also used to break ties.
    pub const ALL: [Arm; 2] = [Arm::Safe, Arm::Risky];
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Arm::Safe => "A",
            Arm::Risky => "B",
        })
    }
}

impl FromStr for Arm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "A" | "a" => Ok(Arm::Safe),
            "B" | "b" => Ok(Arm::Risky),
            other => Err(Error::UnknownArm {
                arm: other.to_string(),
            }),
        }
    }
}

/// One value per arm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmTable<T> {
    #[serde(rename = "A")]
    pub safe: T,
    #[serde(rename = "B")]
    pub risky: T,
}

impl<T> ArmTable<T> {
    pub fn new(safe: T, risky: T) -> Self {
        Self { safe, risky }
    }

    pub fn get(&self, arm: Arm) -> &T {
        match arm {
            Arm::Safe => &self.safe,
            Arm::Risky => &self.risky,
        }
    }

    pub fn get_mut(&mut self, arm: Arm) -> &mut T {
        match arm {
            Arm::Safe => &mut self.safe,
            Arm::Risky => &mut self.risky,
        }
    }
}

impl ArmTable<f64> {
    /// Arm with the higher estimate; [`Arm::Safe`] wins ties.
    pub fn greedy_arm(&self) -> Arm {
        if self.risky > self.safe {
            Arm::Risky
        } else {
            Arm::Safe
        }
    }
}

/// Draw the realized payout of `arm` when the risky arm succeeds with
/// probability `prob`.
pub fn draw_reward<R: Rng + ?Sized>(arm: Arm, prob: f64, rng: &mut R) -> Result<f64> {
    let prob = check_probability(prob)?;
    Ok(match arm {
        Arm::Safe => SAFE_PAYOUT,
        Arm::Risky => {
            if rng.random_bool(prob) {
                RISKY_PAYOUT
            } else {
                0.0
            }
        }
    })
}

/// [`draw_reward`] for an arm given by name (`"A"` or `"B"`).
pub fn draw_named_reward<R: Rng + ?Sized>(arm: &str, prob: f64, rng: &mut R) -> Result<f64> {
    let prob = check_probability(prob)?;
    draw_reward(arm.parse()?, prob, rng)
}
