//! Rollout configuration parameters.

use rollout_eval::ValueWeights;
use serde::{Deserialize, Serialize};

use crate::candidates::TieRule;
use crate::error::ConfigError;

/// Configuration for the rollout search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutConfig {
    /// Continuation plies played by the one-ply policy after the candidate placement (K).
    pub lookahead_depth: usize,

    /// Independent trajectories averaged per placement (W).
    pub trajectory_samples: usize,

    /// Per-ply discount in (0, 1]; ply k is weighted by `discount^k`.
    pub discount: f32,

    pub weights: ValueWeights,

    pub tie_rule: TieRule,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            lookahead_depth: 2,
            trajectory_samples: 1,
            discount: 0.9,
            weights: ValueWeights::default(),
            tie_rule: TieRule::Exact,
        }
    }
}

impl RolloutConfig {
    /// No continuation plies: the rollout degenerates to a sampled one-ply search.
    pub fn greedy_only() -> Self {
        Self {
            lookahead_depth: 0,
            ..Self::default()
        }
    }

    /// Small but non-trivial, for tests and benches.
    pub fn for_testing() -> Self {
        Self {
            lookahead_depth: 1,
            trajectory_samples: 2,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trajectory_samples == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !(self.discount > 0.0 && self.discount <= 1.0) {
            return Err(ConfigError::DiscountOutOfRange(self.discount));
        }
        if let TieRule::Tolerance(eps) = self.tie_rule {
            if !(eps.is_finite() && eps >= 0.0) {
                return Err(ConfigError::NegativeTolerance(eps));
            }
        }
        Ok(())
    }
}
