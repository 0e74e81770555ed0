//! Monte-Carlo rollout search.
//!
//! Every legal placement is scored by playing it on `W` independent forks,
//! continuing each fork for `K` plies with the continuation policy, and
//! averaging the discounted per-move values. The best placement wins, ties
//! broken uniformly at random.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rollout_core::{Action, Simulator};
use rollout_eval::value_of_action_on_board;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::candidates::CandidateList;
use crate::config::RolloutConfig;
use crate::error::SearchError;
use crate::greedy::GreedyPolicy;
use crate::policy::Policy;

/// Averaged rollout value of one placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementScore {
    pub action: Action,
    pub score: f32,
}

#[derive(Clone, Debug)]
pub struct RolloutPolicy<P = GreedyPolicy> {
    config: RolloutConfig,
    continuation: P,
}

impl RolloutPolicy<GreedyPolicy> {
    /// Rollout with a one-ply continuation sharing the config's weights and tie rule.
    pub fn with_config(config: RolloutConfig) -> Result<Self, SearchError> {
        let continuation = GreedyPolicy::new(config.weights, config.tie_rule);
        Self::new(config, continuation)
    }
}

impl<P> RolloutPolicy<P> {
    pub fn new(config: RolloutConfig, continuation: P) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            config,
            continuation,
        })
    }

    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    pub fn continuation(&self) -> &P {
        &self.continuation
    }

    /// Score every legal placement, in scan order.
    ///
    /// One seed per placement is drawn from `rng` up front, so the scores do not
    /// depend on whether placements are evaluated sequentially or in parallel.
    pub fn evaluate<S>(
        &self,
        sim: &S,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<PlacementScore>, SearchError>
    where
        S: Simulator + Sync,
        P: Policy<S> + Sync,
    {
        let jobs: Vec<(Action, u64)> = sim
            .legal_actions()
            .into_iter()
            .map(|action| (action, rng.next_u64()))
            .collect();

        #[cfg(feature = "parallel")]
        let scores: Result<Vec<PlacementScore>, SearchError> = jobs
            .par_iter()
            .map(|&(action, seed)| self.score_placement(sim, action, seed))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let scores: Result<Vec<PlacementScore>, SearchError> = jobs
            .iter()
            .map(|&(action, seed)| self.score_placement(sim, action, seed))
            .collect();

        scores
    }

    fn score_placement<S>(
        &self,
        sim: &S,
        action: Action,
        seed: u64,
    ) -> Result<PlacementScore, SearchError>
    where
        S: Simulator,
        P: Policy<S>,
    {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let weights = &self.config.weights;

        let mut total = 0.0f32;
        for _ in 0..self.config.trajectory_samples {
            let mut trajectory = sim.fork(&mut rng);
            let mut value = value_of_action_on_board(action, &mut trajectory, weights);
            for ply in 1..=self.config.lookahead_depth {
                let next = self.continuation.choose_action(&trajectory, &mut rng)?;
                let discount = self.config.discount.powi(ply as i32);
                value += discount * value_of_action_on_board(next, &mut trajectory, weights);
            }
            total += value;
        }

        let score = total / self.config.trajectory_samples as f32;
        trace!(%action, score, "scored placement");
        Ok(PlacementScore { action, score })
    }
}

impl<S, P> Policy<S> for RolloutPolicy<P>
where
    S: Simulator + Sync,
    P: Policy<S> + Sync,
{
    fn choose_action(&self, sim: &S, rng: &mut dyn RngCore) -> Result<Action, SearchError> {
        let scores = self.evaluate(sim, rng)?;

        let mut candidates = CandidateList::new(self.config.tie_rule);
        for placement in &scores {
            candidates.consider(placement.score, placement.action);
        }
        let chosen = candidates.pick_random(rng)?;

        debug!(
            action = %chosen,
            best = ?candidates.best_score(),
            tied = candidates.len(),
            placements = scores.len(),
            "rollout decision"
        );
        Ok(chosen)
    }
}
